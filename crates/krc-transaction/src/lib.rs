/// KRC wallet SDK - Token transaction building, signing, and serialization.
///
/// Provides the Transaction type with inputs and outputs, the token payload
/// codec, the fee policy, UTXO selection for transfer and mint transactions,
/// signature hash computation and P2PKH signing, and the `NetworkClient`
/// boundary through which UTXOs are fetched and transactions submitted.

pub mod transaction;
pub mod input;
pub mod output;
pub mod sighash;
pub mod template;
pub mod payload;
pub mod fee;
pub mod ledger;
pub mod builder;
pub mod signer;

mod error;
pub use error::TransactionError;
pub use transaction::Transaction;
pub use input::{Outpoint, TransactionInput};
pub use output::TransactionOutput;
pub use payload::{Ticker, TokenOp};
pub use ledger::{LedgerError, NetworkClient, Utxo};
pub use builder::{build_mint, build_transfer, UnsignedTransaction};
pub use signer::{sign, SignedTransaction};
