//! Signing of built transactions.

use krc_primitives::chainhash::Hash;
use krc_primitives::ec::PrivateKey;

use crate::builder::UnsignedTransaction;
use crate::template::{p2pkh, UnlockingScriptTemplate};
use crate::transaction::Transaction;
use crate::TransactionError;

/// A transaction whose every input carries a signature script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransaction {
    tx: Transaction,
    tx_id: Hash,
    fee: u64,
}

impl SignedTransaction {
    pub fn tx(&self) -> &Transaction {
        &self.tx
    }

    pub fn tx_id(&self) -> Hash {
        self.tx_id
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.tx.to_bytes()
    }

    pub fn to_hex(&self) -> String {
        self.tx.to_hex()
    }
}

/// Sign every input of `unsigned` with `private_key`.
///
/// # Returns
/// `SigningError` if an input lacks its source output or spends an output
/// not locked to `private_key`.
pub fn sign(
    unsigned: UnsignedTransaction,
    private_key: &PrivateKey,
) -> Result<SignedTransaction, TransactionError> {
    let fee = unsigned.fee();
    let mut tx = unsigned.into_tx();
    if tx.inputs.is_empty() {
        return Err(TransactionError::InvalidTransaction(
            "transaction has no inputs".to_string(),
        ));
    }

    let unlocker = p2pkh::unlock(private_key);
    let scripts = (0..tx.inputs.len())
        .map(|i| unlocker.sign(&tx, i))
        .collect::<Result<Vec<_>, _>>()?;
    for (input, script) in tx.inputs.iter_mut().zip(scripts) {
        input.signature_script = Some(script);
    }

    let tx_id = tx.tx_id();
    Ok(SignedTransaction { tx, tx_id, fee })
}
