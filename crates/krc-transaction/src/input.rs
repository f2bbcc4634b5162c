//! Transaction input spending a previous output.
//!
//! Besides the wire fields, an input carries the output it spends
//! (`source_output`) so the signer can commit to the spent value and script
//! without a second ledger lookup.

use krc_primitives::chainhash::Hash;
use krc_primitives::util::{ByteReader, ByteWriter};
use krc_script::Script;

use crate::output::TransactionOutput;
use crate::TransactionError;

/// Sequence number for a final input.
pub const DEFAULT_SEQUENCE_NUMBER: u32 = 0xFFFF_FFFF;

/// A reference to one output of a previous transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Outpoint {
    pub transaction_id: Hash,
    pub index: u32,
}

impl std::fmt::Display for Outpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.transaction_id, self.index)
    }
}

/// # Wire format
///
/// | Field            | Size          |
/// |------------------|---------------|
/// | transaction id   | 32 bytes      |
/// | output index     | 4 bytes (LE)  |
/// | script length    | VarInt        |
/// | signature script | variable      |
/// | sequence         | 4 bytes (LE)  |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInput {
    pub previous_outpoint: Outpoint,

    /// `None` until the input is signed.
    pub signature_script: Option<Script>,

    pub sequence: u32,

    source_output: Option<TransactionOutput>,
}

impl TransactionInput {
    pub fn new(previous_outpoint: Outpoint) -> Self {
        TransactionInput {
            previous_outpoint,
            signature_script: None,
            sequence: DEFAULT_SEQUENCE_NUMBER,
            source_output: None,
        }
    }

    /// Create an input spending `outpoint`, recording the spent output.
    pub fn spending(outpoint: Outpoint, source_output: TransactionOutput) -> Self {
        let mut input = Self::new(outpoint);
        input.source_output = Some(source_output);
        input
    }

    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let txid: [u8; 32] = reader.read_array().map_err(|e| {
            TransactionError::SerializationError(format!("reading previous txid: {}", e))
        })?;
        let index = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading output index: {}", e))
        })?;
        let script = reader.read_var_bytes().map_err(|e| {
            TransactionError::SerializationError(format!("reading signature script: {}", e))
        })?;
        let sequence = reader.read_u32_le().map_err(|e| {
            TransactionError::SerializationError(format!("reading sequence: {}", e))
        })?;

        Ok(TransactionInput {
            previous_outpoint: Outpoint {
                transaction_id: Hash::new(txid),
                index,
            },
            signature_script: (!script.is_empty()).then(|| Script::from_bytes(script)),
            sequence,
            source_output: None,
        })
    }

    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_bytes(self.previous_outpoint.transaction_id.as_bytes());
        writer.write_u32_le(self.previous_outpoint.index);
        match &self.signature_script {
            Some(script) => writer.write_var_bytes(script.to_bytes()),
            None => writer.write_var_bytes(&[]),
        }
        writer.write_u32_le(self.sequence);
    }

    pub fn source_output(&self) -> Option<&TransactionOutput> {
        self.source_output.as_ref()
    }

    pub fn set_source_output(&mut self, output: Option<TransactionOutput>) {
        self.source_output = output;
    }
}
