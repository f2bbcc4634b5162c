/// Unified error type for all primitives operations.
///
/// Covers errors from hashing, EC operations, entropy, phrase decoding,
/// the PIN vault and binary encoding.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    #[error("secure random source unavailable: {0}")]
    EntropyUnavailable(String),

    #[error("entropy too short: need at least {min} bytes, got {got}")]
    EntropyTooShort { min: usize, got: usize },

    #[error("recovery phrase must have {expected} words, got {got}")]
    InvalidPhraseLength { expected: usize, got: usize },

    #[error("unknown recovery word '{0}'")]
    UnknownWord(String),

    #[error("seed derivation error: {0}")]
    DerivationError(String),

    #[error("encryption error: {0}")]
    EncryptionError(String),

    /// The vault rejected the blob: wrong PIN, tampered or truncated data.
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("unexpected end of data")]
    UnexpectedEof,
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}

impl From<k256::ecdsa::Error> for PrimitivesError {
    fn from(e: k256::ecdsa::Error) -> Self {
        PrimitivesError::InvalidSignature(e.to_string())
    }
}
