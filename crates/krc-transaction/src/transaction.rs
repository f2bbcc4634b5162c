//! Core transaction type.
//!
//! Version, inputs, outputs and lock time, with little-endian wire
//! serialization and a transaction id equal to the double SHA-256 of the
//! serialized bytes (displayed reversed).

use krc_primitives::chainhash::Hash;
use krc_primitives::util::{ByteReader, ByteWriter, VarInt};

use crate::input::TransactionInput;
use crate::output::TransactionOutput;
use crate::sighash;
use crate::TransactionError;

/// Transaction format version emitted by the builder.
pub const TX_VERSION: u16 = 0;

/// # Wire format
///
/// | Field        | Size                 |
/// |--------------|----------------------|
/// | version      | 2 bytes (LE)         |
/// | input count  | VarInt               |
/// | inputs       | variable (per input) |
/// | output count | VarInt               |
/// | outputs      | variable             |
/// | lock_time    | 8 bytes (LE)         |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub version: u16,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub lock_time: u64,
}

impl Transaction {
    pub fn new() -> Self {
        Transaction {
            version: TX_VERSION,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_time: 0,
        }
    }

    pub fn from_hex(hex_str: &str) -> Result<Self, TransactionError> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| TransactionError::SerializationError(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Parse a serialized transaction.
    ///
    /// # Returns
    /// The transaction, or `SerializationError` for truncated input or
    /// trailing bytes. Parsed inputs carry no source output.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let tx = Self::read_from(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::SerializationError(format!(
                "{} trailing bytes after transaction",
                reader.remaining()
            )));
        }
        Ok(tx)
    }

    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let ser = |what: &str, e: krc_primitives::PrimitivesError| {
            TransactionError::SerializationError(format!("reading {}: {}", what, e))
        };

        let version = reader.read_u16_le().map_err(|e| ser("version", e))?;

        let input_count = reader.read_varint().map_err(|e| ser("input count", e))?;
        let mut inputs = Vec::new();
        for _ in 0..input_count.value() {
            inputs.push(TransactionInput::read_from(reader)?);
        }

        let output_count = reader.read_varint().map_err(|e| ser("output count", e))?;
        let mut outputs = Vec::new();
        for _ in 0..output_count.value() {
            outputs.push(TransactionOutput::read_from(reader)?);
        }

        let lock_time = reader.read_u64_le().map_err(|e| ser("lock time", e))?;

        Ok(Transaction {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(256);
        writer.write_u16_le(self.version);

        writer.write_varint(VarInt::from(self.inputs.len()));
        for input in &self.inputs {
            input.write_to(&mut writer);
        }

        writer.write_varint(VarInt::from(self.outputs.len()));
        for output in &self.outputs {
            output.write_to(&mut writer);
        }

        writer.write_u64_le(self.lock_time);
        writer.into_bytes()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Double SHA-256 of the serialized transaction.
    pub fn tx_id(&self) -> Hash {
        Hash::double_sha256(&self.to_bytes())
    }

    pub fn add_input(&mut self, input: TransactionInput) {
        self.inputs.push(input);
    }

    pub fn add_output(&mut self, output: TransactionOutput) {
        self.outputs.push(output);
    }

    /// Sum of all output values.
    ///
    /// # Returns
    /// `None` on overflow.
    pub fn total_output_value(&self) -> Option<u64> {
        self.outputs
            .iter()
            .try_fold(0u64, |acc, o| acc.checked_add(o.value))
    }

    /// Sum of the values of the outputs being spent.
    ///
    /// # Returns
    /// `SigningError` if any input lacks its source output, `FeeError` on
    /// overflow.
    pub fn total_input_value(&self) -> Result<u64, TransactionError> {
        self.inputs.iter().try_fold(0u64, |acc, input| {
            let value = input
                .source_output()
                .ok_or_else(|| {
                    TransactionError::SigningError(format!(
                        "missing source output for {}",
                        input.previous_outpoint
                    ))
                })?
                .value;
            acc.checked_add(value)
                .ok_or_else(|| TransactionError::FeeError("input total overflows".to_string()))
        })
    }

    /// Compute the signature hash for one input from its recorded source output.
    ///
    /// # Arguments
    /// * `input_index` - Index of the input being signed.
    /// * `sighash_type` - The sighash flag (only `SIGHASH_ALL` is emitted).
    pub fn calc_input_signature_hash(
        &self,
        input_index: usize,
        sighash_type: u32,
    ) -> Result<[u8; 32], TransactionError> {
        let input = self.inputs.get(input_index).ok_or_else(|| {
            TransactionError::InvalidTransaction(format!(
                "input index {} out of range (tx has {} inputs)",
                input_index,
                self.inputs.len()
            ))
        })?;
        let source = input.source_output().ok_or_else(|| {
            TransactionError::SigningError(format!(
                "missing source output for {}",
                input.previous_outpoint
            ))
        })?;

        sighash::signature_hash(
            self,
            input_index,
            source.locking_script.to_bytes(),
            sighash_type,
            source.value,
        )
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
