//! Signature hash computation for transaction signing.
//!
//! A BIP-143-style digest: each input's signature commits to the spent
//! value and script code, all outpoints, all sequences and all outputs.
//! The wallet signs with `SIGHASH_ALL` only.

use krc_primitives::hash::sha256d;
use krc_primitives::util::{ByteWriter, VarInt};

use crate::transaction::Transaction;
use crate::TransactionError;

/// Sign all inputs and all outputs.
pub const SIGHASH_ALL: u32 = 0x01;

/// Compute the 32-byte digest signed for `input_index`.
///
/// # Arguments
/// * `tx` - The transaction being signed.
/// * `input_index` - Index of the input being signed.
/// * `prev_output_script` - Locking script of the output being spent.
/// * `sighash_type` - The sighash flag.
/// * `value` - Sompi value of the output being spent.
///
/// # Returns
/// `sha256d(preimage)`, or `InvalidTransaction` for an out-of-range index.
pub fn signature_hash(
    tx: &Transaction,
    input_index: usize,
    prev_output_script: &[u8],
    sighash_type: u32,
    value: u64,
) -> Result<[u8; 32], TransactionError> {
    let preimage = calc_preimage(tx, input_index, prev_output_script, sighash_type, value)?;
    Ok(sha256d(&preimage))
}

/// Build the preimage bytes.
///
/// 1. version (2 bytes LE)
/// 2. hashPrevouts (32 bytes)
/// 3. hashSequence (32 bytes)
/// 4. outpoint (32 + 4 bytes)
/// 5. scriptCode (varint + script)
/// 6. value (8 bytes LE)
/// 7. sequence (4 bytes LE)
/// 8. hashOutputs (32 bytes)
/// 9. lock time (8 bytes LE)
/// 10. sighash type (4 bytes LE)
pub fn calc_preimage(
    tx: &Transaction,
    input_index: usize,
    prev_output_script: &[u8],
    sighash_type: u32,
    value: u64,
) -> Result<Vec<u8>, TransactionError> {
    let input = tx.inputs.get(input_index).ok_or_else(|| {
        TransactionError::InvalidTransaction(format!(
            "input index {} out of range (tx has {} inputs)",
            input_index,
            tx.inputs.len()
        ))
    })?;

    let mut writer = ByteWriter::with_capacity(256);
    writer.write_u16_le(tx.version);
    writer.write_bytes(&prevouts_hash(tx));
    writer.write_bytes(&sequence_hash(tx));
    writer.write_bytes(input.previous_outpoint.transaction_id.as_bytes());
    writer.write_u32_le(input.previous_outpoint.index);
    writer.write_varint(VarInt::from(prev_output_script.len()));
    writer.write_bytes(prev_output_script);
    writer.write_u64_le(value);
    writer.write_u32_le(input.sequence);
    writer.write_bytes(&outputs_hash(tx));
    writer.write_u64_le(tx.lock_time);
    writer.write_u32_le(sighash_type);
    Ok(writer.into_bytes())
}

fn prevouts_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = ByteWriter::with_capacity(tx.inputs.len() * 36);
    for input in &tx.inputs {
        writer.write_bytes(input.previous_outpoint.transaction_id.as_bytes());
        writer.write_u32_le(input.previous_outpoint.index);
    }
    sha256d(writer.as_bytes())
}

fn sequence_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = ByteWriter::with_capacity(tx.inputs.len() * 4);
    for input in &tx.inputs {
        writer.write_u32_le(input.sequence);
    }
    sha256d(writer.as_bytes())
}

fn outputs_hash(tx: &Transaction) -> [u8; 32] {
    let mut writer = ByteWriter::new();
    for output in &tx.outputs {
        output.write_to(&mut writer);
    }
    sha256d(writer.as_bytes())
}
