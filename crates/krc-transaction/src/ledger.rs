//! The boundary to the remote ledger.
//!
//! `NetworkClient` is blocking: callers issue one request at a time and
//! iterate strictly serially. Implementations live outside this crate
//! (`krc-rest`) or in tests.

use krc_primitives::chainhash::Hash;
use krc_script::{Address, Script};

use crate::input::Outpoint;
use crate::output::TransactionOutput;
use crate::signer::SignedTransaction;

/// An unspent output as reported by the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Utxo {
    pub transaction_id: Hash,
    pub output_index: u32,
    pub value_sompi: u64,
    pub owner_script: Script,
}

impl Utxo {
    pub fn outpoint(&self) -> Outpoint {
        Outpoint {
            transaction_id: self.transaction_id,
            index: self.output_index,
        }
    }

    /// The output this UTXO refers to, as recorded on a spending input.
    pub fn to_output(&self) -> TransactionOutput {
        TransactionOutput::new(self.value_sompi, self.owner_script.clone())
    }
}

/// Failures talking to the ledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Connection-level failure (DNS, TLS, reset).
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    /// Non-success HTTP status.
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },

    /// The ledger refused the transaction.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Blocking access to UTXOs, balances and submission.
pub trait NetworkClient {
    /// Fetch the spendable outputs of `address`, in ledger order.
    fn get_utxos(&self, address: &Address) -> Result<Vec<Utxo>, LedgerError>;

    /// Fetch the balance of `address` in sompi.
    fn get_balance(&self, address: &Address) -> Result<u64, LedgerError>;

    /// Submit a signed transaction.
    ///
    /// # Returns
    /// The transaction id accepted by the ledger.
    fn submit(&self, tx: &SignedTransaction) -> Result<Hash, LedgerError>;
}

impl<T: NetworkClient + ?Sized> NetworkClient for &T {
    fn get_utxos(&self, address: &Address) -> Result<Vec<Utxo>, LedgerError> {
        (**self).get_utxos(address)
    }

    fn get_balance(&self, address: &Address) -> Result<u64, LedgerError> {
        (**self).get_balance(address)
    }

    fn submit(&self, tx: &SignedTransaction) -> Result<Hash, LedgerError> {
        (**self).submit(tx)
    }
}

impl<T: NetworkClient + ?Sized> NetworkClient for Box<T> {
    fn get_utxos(&self, address: &Address) -> Result<Vec<Utxo>, LedgerError> {
        (**self).get_utxos(address)
    }

    fn get_balance(&self, address: &Address) -> Result<u64, LedgerError> {
        (**self).get_balance(address)
    }

    fn submit(&self, tx: &SignedTransaction) -> Result<Hash, LedgerError> {
        (**self).submit(tx)
    }
}
