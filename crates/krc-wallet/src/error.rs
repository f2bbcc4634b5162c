//! Wallet error taxonomy and conversions from the lower crates.

use krc_primitives::PrimitivesError;
use krc_script::ScriptError;
use krc_transaction::{LedgerError, TransactionError};
use serde::{Deserialize, Serialize};

/// Coarse category of a [`WalletError`], recorded in batch failure entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    Validation,
    Cryptographic,
    Authentication,
    Network,
    InsufficientFunds,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Cryptographic => "cryptographic",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Network => "network",
            ErrorKind::InsufficientFunds => "insufficient funds",
        };
        f.write_str(s)
    }
}

/// Error types for wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// Malformed or missing input, rejected before any cryptographic work.
    #[error("validation error: {0}")]
    Validation(String),

    /// Derivation, key or signing failure.
    #[error("cryptographic error: {0}")]
    Cryptographic(String),

    /// Wrong PIN or tampered blob.
    #[error("authentication failed")]
    Authentication,

    #[error("network error: {0}")]
    Network(#[from] LedgerError),

    #[error("insufficient funds: need {required} sompi, have {available} sompi")]
    InsufficientFunds { required: u64, available: u64 },
}

impl WalletError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::Validation(_) => ErrorKind::Validation,
            WalletError::Cryptographic(_) => ErrorKind::Cryptographic,
            WalletError::Authentication => ErrorKind::Authentication,
            WalletError::Network(_) => ErrorKind::Network,
            WalletError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
        }
    }
}

impl From<PrimitivesError> for WalletError {
    fn from(e: PrimitivesError) -> Self {
        match e {
            PrimitivesError::AuthenticationFailed => WalletError::Authentication,
            PrimitivesError::InvalidHex(_)
            | PrimitivesError::InvalidKeyLength { .. }
            | PrimitivesError::InvalidPhraseLength { .. }
            | PrimitivesError::UnknownWord(_)
            | PrimitivesError::InvalidBase58(_)
            | PrimitivesError::ChecksumMismatch
            | PrimitivesError::InvalidHash(_)
            | PrimitivesError::UnexpectedEof => WalletError::Validation(e.to_string()),
            _ => WalletError::Cryptographic(e.to_string()),
        }
    }
}

impl From<ScriptError> for WalletError {
    fn from(e: ScriptError) -> Self {
        match e {
            ScriptError::Primitives(p) => p.into(),
            other => WalletError::Validation(other.to_string()),
        }
    }
}

impl From<TransactionError> for WalletError {
    fn from(e: TransactionError) -> Self {
        match e {
            TransactionError::InsufficientFunds { required, available } => {
                WalletError::InsufficientFunds { required, available }
            }
            TransactionError::SigningError(msg) => WalletError::Cryptographic(msg),
            TransactionError::Script(e) => e.into(),
            TransactionError::Primitives(e) => e.into(),
            other => WalletError::Validation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_errors_map_to_categories() {
        assert_eq!(
            WalletError::from(PrimitivesError::AuthenticationFailed).kind(),
            ErrorKind::Authentication
        );
        assert_eq!(
            WalletError::from(PrimitivesError::UnknownWord("zzz".into())).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            WalletError::from(PrimitivesError::InvalidPrivateKey("zero".into())).kind(),
            ErrorKind::Cryptographic
        );
    }

    #[test]
    fn transaction_errors_map_to_categories() {
        let e = WalletError::from(TransactionError::InsufficientFunds {
            required: 2_000,
            available: 10,
        });
        assert!(matches!(
            e,
            WalletError::InsufficientFunds { required: 2_000, available: 10 }
        ));
        assert_eq!(
            WalletError::from(TransactionError::InvalidTicker("".into())).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            WalletError::from(TransactionError::SigningError("mismatch".into())).kind(),
            ErrorKind::Cryptographic
        );
        assert_eq!(
            WalletError::from(LedgerError::Timeout).kind(),
            ErrorKind::Network
        );
    }

    #[test]
    fn kind_serializes_camel_case() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::InsufficientFunds).unwrap(),
            "\"insufficientFunds\""
        );
    }
}
