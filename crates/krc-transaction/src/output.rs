//! Transaction output: a sompi value locked by a script.

use krc_primitives::util::{ByteReader, ByteWriter};
use krc_script::Script;

use crate::TransactionError;

/// # Wire format
///
/// | Field          | Size          |
/// |----------------|---------------|
/// | value          | 8 bytes (LE)  |
/// | script length  | VarInt        |
/// | locking_script | variable      |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionOutput {
    /// Value in sompi.
    pub value: u64,
    pub locking_script: Script,
}

impl TransactionOutput {
    pub fn new(value: u64, locking_script: Script) -> Self {
        TransactionOutput {
            value,
            locking_script,
        }
    }

    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let value = reader.read_u64_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading output value: {}", e))
        })?;
        let script = reader.read_var_bytes().map_err(|e| {
            TransactionError::SerializationError(format!("reading locking script: {}", e))
        })?;
        Ok(TransactionOutput {
            value,
            locking_script: Script::from_bytes(script),
        })
    }

    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_u64_le(self.value);
        writer.write_var_bytes(self.locking_script.to_bytes());
    }

    /// The serialized form committed to by the signature hash.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(8 + 1 + self.locking_script.len());
        self.write_to(&mut writer);
        writer.into_bytes()
    }
}
