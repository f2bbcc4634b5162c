/// KRC wallet SDK - Wallet operations and batch minting.
///
/// Exposes the caller-facing operations (`create`, `import_mnemonic`,
/// `import_private_key`, `decrypt`, `balance`, `transfer`, `mint`,
/// `estimate_fee`), the serial batch mint orchestrator with pluggable
/// pacing, wallet configuration and the error taxonomy surfaced to callers.

mod error;
pub use error::{ErrorKind, WalletError};

pub mod batch;
pub mod config;
pub mod pacing;
pub mod types;
pub mod wallet;

pub use batch::{BatchState, MintBatch, MintBatchResult, MintFailure, MintSuccess};
pub use config::{PacingConfig, WalletConfig};
pub use pacing::{FixedDelay, NoDelay, Pacer};
pub use wallet::{parse_network, Wallet};
