//! Script templates used when signing transaction inputs.
//!
//! The `UnlockingScriptTemplate` trait is the seam between the signer and a
//! concrete script type; the wallet only spends pay-to-public-key-hash
//! outputs, so `p2pkh` is the one implementation.

pub mod p2pkh;

use krc_script::Script;

use crate::transaction::Transaction;
use crate::TransactionError;

/// Produces the signature script for one input of a transaction.
pub trait UnlockingScriptTemplate {
    /// Produce an unlocking script for the given input.
    ///
    /// # Arguments
    /// * `tx` - The transaction being signed.
    /// * `input_index` - The index of the input to sign.
    fn sign(&self, tx: &Transaction, input_index: usize) -> Result<Script, TransactionError>;
}
