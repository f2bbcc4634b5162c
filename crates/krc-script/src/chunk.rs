//! Script chunk parsing and push-data encoding.
//!
//! Unlike a full interpreter, `OP_RETURN` is treated as an ordinary opcode so
//! the pushes that follow it in a data output decode as separate chunks.

use crate::opcodes::*;
use crate::ScriptError;

/// One parsed element of a script: an opcode, or a push with its bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptChunk {
    /// The opcode byte. For direct pushes this is the data length.
    pub op: u8,
    pub data: Option<Vec<u8>>,
}

/// Decode raw script bytes into chunks.
///
/// # Returns
/// The chunks in order, or `DataTooSmall` if a push runs past the end.
pub fn decode_script(bytes: &[u8]) -> Result<Vec<ScriptChunk>, ScriptError> {
    let mut chunks = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let op = bytes[pos];
        pos += 1;

        let length = match op {
            OP_DATA_1..=OP_DATA_75 => op as usize,
            OP_PUSHDATA1 => read_len(bytes, &mut pos, 1)?,
            OP_PUSHDATA2 => read_len(bytes, &mut pos, 2)?,
            OP_PUSHDATA4 => read_len(bytes, &mut pos, 4)?,
            _ => {
                chunks.push(ScriptChunk { op, data: None });
                continue;
            }
        };

        let end = pos.checked_add(length).ok_or(ScriptError::DataTooSmall)?;
        let data = bytes.get(pos..end).ok_or(ScriptError::DataTooSmall)?;
        chunks.push(ScriptChunk {
            op,
            data: Some(data.to_vec()),
        });
        pos = end;
    }

    Ok(chunks)
}

fn read_len(bytes: &[u8], pos: &mut usize, width: usize) -> Result<usize, ScriptError> {
    let raw = bytes
        .get(*pos..*pos + width)
        .ok_or(ScriptError::DataTooSmall)?;
    *pos += width;
    let mut le = [0u8; 4];
    le[..width].copy_from_slice(raw);
    Ok(u32::from_le_bytes(le) as usize)
}

/// The minimal push prefix for a payload of `data_len` bytes.
///
/// # Returns
/// The prefix bytes, or `DataTooBig` past the 4-byte length limit.
pub fn push_data_prefix(data_len: usize) -> Result<Vec<u8>, ScriptError> {
    if data_len <= OP_DATA_75 as usize {
        Ok(vec![data_len as u8])
    } else if data_len <= 0xFF {
        Ok(vec![OP_PUSHDATA1, data_len as u8])
    } else if data_len <= 0xFFFF {
        let mut buf = vec![OP_PUSHDATA2];
        buf.extend_from_slice(&(data_len as u16).to_le_bytes());
        Ok(buf)
    } else if data_len <= 0xFFFF_FFFF {
        let mut buf = vec![OP_PUSHDATA4];
        buf.extend_from_slice(&(data_len as u32).to_le_bytes());
        Ok(buf)
    } else {
        Err(ScriptError::DataTooBig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_p2pkh() {
        let mut bytes = vec![OP_DUP, OP_HASH160, OP_DATA_20];
        bytes.extend_from_slice(&[0xab; 20]);
        bytes.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);

        let chunks = decode_script(&bytes).unwrap();
        assert_eq!(chunks.len(), 5);
        assert_eq!(chunks[2].data.as_deref(), Some(&[0xab; 20][..]));
        assert_eq!(chunks[4].op, OP_CHECKSIG);
    }

    #[test]
    fn test_pushes_after_op_return_are_chunks() {
        let bytes = [OP_RETURN, 0x02, b'h', b'i', 0x01, 0xff];
        let chunks = decode_script(&bytes).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], ScriptChunk { op: OP_RETURN, data: None });
        assert_eq!(chunks[1].data.as_deref(), Some(&b"hi"[..]));
        assert_eq!(chunks[2].data.as_deref(), Some(&[0xff][..]));
    }

    #[test]
    fn test_pushdata1_and_truncation() {
        let mut bytes = vec![OP_PUSHDATA1, 80];
        bytes.extend_from_slice(&[7u8; 80]);
        assert_eq!(decode_script(&bytes).unwrap()[0].data.as_ref().unwrap().len(), 80);

        bytes.truncate(50);
        assert!(matches!(decode_script(&bytes), Err(ScriptError::DataTooSmall)));
        assert!(matches!(decode_script(&[OP_PUSHDATA2, 0x01]), Err(ScriptError::DataTooSmall)));
    }

    #[test]
    fn test_push_data_prefix_boundaries() {
        assert_eq!(push_data_prefix(0).unwrap(), vec![0x00]);
        assert_eq!(push_data_prefix(75).unwrap(), vec![0x4b]);
        assert_eq!(push_data_prefix(76).unwrap(), vec![OP_PUSHDATA1, 76]);
        assert_eq!(push_data_prefix(256).unwrap(), vec![OP_PUSHDATA2, 0x00, 0x01]);
        assert_eq!(
            push_data_prefix(65536).unwrap(),
            vec![OP_PUSHDATA4, 0x00, 0x00, 0x01, 0x00]
        );
    }
}
