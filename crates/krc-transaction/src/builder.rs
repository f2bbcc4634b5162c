//! Assembly of unsigned token transactions from a UTXO snapshot.
//!
//! Coin selection is deterministic: UTXOs are considered in the order the
//! caller lists them. Each transaction has a zero-value data output first,
//! then (when non-zero) a change output back to the sender.

use krc_script::Address;

use crate::fee::calculate_fee;
use crate::input::TransactionInput;
use crate::ledger::Utxo;
use crate::output::TransactionOutput;
use crate::payload::{Ticker, TokenOp};
use crate::template::p2pkh;
use crate::transaction::Transaction;
use crate::TransactionError;

/// A built transaction whose inputs are not yet signed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsignedTransaction {
    tx: Transaction,
    fee: u64,
    selected_value: u64,
}

impl UnsignedTransaction {
    pub fn tx(&self) -> &Transaction {
        &self.tx
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }

    /// Total value of the selected inputs.
    pub fn selected_value(&self) -> u64 {
        self.selected_value
    }

    pub(crate) fn into_tx(self) -> Transaction {
        self.tx
    }
}

/// Build a token transfer.
///
/// # Arguments
/// * `utxos` - The sender's spendable outputs, in ledger order.
/// * `from` - Sender address; receives the change.
/// * `to` - Recipient address, pushed into the data output.
/// * `amount` - Token amount, must be positive.
/// * `ticker` - Token ticker.
/// * `priority_fee` - Extra sompi on top of the policy fee.
///
/// # Returns
/// `InvalidAmount` for a zero amount, `InvalidTransaction` when the
/// addresses belong to different networks, `InsufficientFunds` when the
/// UTXOs cannot cover the fee.
pub fn build_transfer(
    utxos: &[Utxo],
    from: &Address,
    to: &Address,
    amount: u64,
    ticker: &Ticker,
    priority_fee: u64,
) -> Result<UnsignedTransaction, TransactionError> {
    let op = TokenOp::transfer(ticker.clone(), amount, *to.hash160())?;
    if from.network() != to.network() {
        return Err(TransactionError::InvalidTransaction(format!(
            "recipient is on {}, sender on {}",
            to.network(),
            from.network()
        )));
    }
    let fee = calculate_fee(from.network(), priority_fee)?;

    let mut selected = Vec::new();
    let mut selected_value = 0u64;
    for utxo in utxos {
        if selected_value >= fee {
            break;
        }
        selected_value = selected_value
            .checked_add(utxo.value_sompi)
            .ok_or_else(|| TransactionError::FeeError("input total overflows".to_string()))?;
        selected.push(utxo);
    }
    if selected_value < fee {
        return Err(TransactionError::InsufficientFunds {
            required: fee,
            available: selected_value,
        });
    }

    assemble(&selected, from, &op, fee, selected_value)
}

/// Build a token mint spending exactly one UTXO.
///
/// The first listed UTXO whose value covers the fee is used.
///
/// # Returns
/// `InsufficientFunds` when no single UTXO covers the fee; `available` is
/// the largest single UTXO value.
pub fn build_mint(
    utxos: &[Utxo],
    from: &Address,
    ticker: &Ticker,
    priority_fee: u64,
) -> Result<UnsignedTransaction, TransactionError> {
    let op = TokenOp::mint(ticker.clone());
    let fee = calculate_fee(from.network(), priority_fee)?;

    let utxo = utxos
        .iter()
        .find(|u| u.value_sompi >= fee)
        .ok_or_else(|| TransactionError::InsufficientFunds {
            required: fee,
            available: utxos.iter().map(|u| u.value_sompi).max().unwrap_or(0),
        })?;

    assemble(&[utxo], from, &op, fee, utxo.value_sompi)
}

fn assemble(
    selected: &[&Utxo],
    from: &Address,
    op: &TokenOp,
    fee: u64,
    selected_value: u64,
) -> Result<UnsignedTransaction, TransactionError> {
    let mut tx = Transaction::new();
    for utxo in selected {
        tx.add_input(TransactionInput::spending(utxo.outpoint(), utxo.to_output()));
    }

    tx.add_output(TransactionOutput::new(0, op.data_script()?));
    let change = selected_value - fee;
    if change > 0 {
        tx.add_output(TransactionOutput::new(change, p2pkh::lock(from)));
    }

    Ok(UnsignedTransaction {
        tx,
        fee,
        selected_value,
    })
}
