/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// The transaction structure is invalid (e.g. input index out of range).
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Missing source output, or the key does not own the spent output.
    #[error("signing error: {0}")]
    SigningError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("invalid ticker '{0}': expected 1-16 ASCII letters or digits")]
    InvalidTicker(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Fee arithmetic overflowed.
    #[error("fee calculation error: {0}")]
    FeeError(String),

    /// The spendable UTXOs cannot cover the fee.
    #[error("insufficient funds: need {required} sompi, have {available} sompi")]
    InsufficientFunds { required: u64, available: u64 },

    #[error("script error: {0}")]
    Script(#[from] krc_script::ScriptError),

    #[error("primitives error: {0}")]
    Primitives(#[from] krc_primitives::PrimitivesError),
}
