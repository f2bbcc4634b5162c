//! Serial batch minting.
//!
//! Each iteration runs `FetchingUtxos -> Building -> Signing -> Submitting`
//! against a fresh UTXO snapshot and ends in `IterationSucceeded` or
//! `IterationFailed`. Failures are recorded and the run continues; the
//! batch always completes every configured iteration.

use std::fmt;

use krc_primitives::ec::PrivateKey;
use krc_script::{Address, Network};
use krc_transaction::{build_mint, sign, NetworkClient, Ticker};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ErrorKind, WalletError};
use crate::pacing::Pacer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    Idle,
    FetchingUtxos,
    Building,
    Signing,
    Submitting,
    IterationSucceeded,
    IterationFailed,
    Done,
}

impl fmt::Display for BatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BatchState::Idle => "idle",
            BatchState::FetchingUtxos => "fetching-utxos",
            BatchState::Building => "building",
            BatchState::Signing => "signing",
            BatchState::Submitting => "submitting",
            BatchState::IterationSucceeded => "iteration-succeeded",
            BatchState::IterationFailed => "iteration-failed",
            BatchState::Done => "done",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintSuccess {
    /// 1-based iteration number.
    pub iteration: u32,
    pub transaction_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintFailure {
    pub iteration: u32,
    pub kind: ErrorKind,
    pub reason: String,
}

/// Outcome of a batch mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintBatchResult {
    pub ticker: String,
    pub network: Network,
    pub successes: Vec<MintSuccess>,
    pub failures: Vec<MintFailure>,
}

impl MintBatchResult {
    /// At least one iteration failed.
    pub fn is_partial_failure(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn iterations(&self) -> usize {
        self.successes.len() + self.failures.len()
    }
}

/// Runs mint iterations one after another against a ledger.
pub struct MintBatch<'a, C: NetworkClient + ?Sized> {
    client: &'a C,
    key: &'a PrivateKey,
    address: Address,
    ticker: Ticker,
    priority_fee: u64,
    state: BatchState,
}

impl<'a, C: NetworkClient + ?Sized> MintBatch<'a, C> {
    pub fn new(
        client: &'a C,
        key: &'a PrivateKey,
        address: Address,
        ticker: Ticker,
        priority_fee: u64,
    ) -> Self {
        MintBatch {
            client,
            key,
            address,
            ticker,
            priority_fee,
            state: BatchState::Idle,
        }
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Run `iterations` mints, calling `pacer` between consecutive ones.
    pub fn run(&mut self, iterations: u32, pacer: &dyn Pacer) -> MintBatchResult {
        let mut result = MintBatchResult {
            ticker: self.ticker.to_string(),
            network: self.address.network(),
            successes: Vec::new(),
            failures: Vec::new(),
        };
        info!(
            ticker = %self.ticker,
            network = %self.address.network(),
            iterations,
            "starting batch mint"
        );

        for iteration in 1..=iterations {
            match self.mint_once(iteration) {
                Ok(tx_id) => {
                    self.transition(iteration, BatchState::IterationSucceeded);
                    info!(iteration, %tx_id, "mint submitted");
                    result.successes.push(MintSuccess {
                        iteration,
                        transaction_id: tx_id,
                    });
                }
                Err(e) => {
                    self.transition(iteration, BatchState::IterationFailed);
                    warn!(iteration, kind = %e.kind(), error = %e, "mint iteration failed");
                    result.failures.push(MintFailure {
                        iteration,
                        kind: e.kind(),
                        reason: e.to_string(),
                    });
                }
            }
            if iteration < iterations {
                pacer.pause(iteration);
            }
        }

        self.transition(iterations, BatchState::Done);
        info!(
            succeeded = result.successes.len(),
            failed = result.failures.len(),
            "batch mint finished"
        );
        result
    }

    fn mint_once(&mut self, iteration: u32) -> Result<String, WalletError> {
        self.transition(iteration, BatchState::FetchingUtxos);
        let utxos = self.client.get_utxos(&self.address)?;

        self.transition(iteration, BatchState::Building);
        let unsigned = build_mint(&utxos, &self.address, &self.ticker, self.priority_fee)?;

        self.transition(iteration, BatchState::Signing);
        let signed = sign(unsigned, self.key)?;

        self.transition(iteration, BatchState::Submitting);
        let tx_id = self.client.submit(&signed)?;
        Ok(tx_id.to_string())
    }

    fn transition(&mut self, iteration: u32, next: BatchState) {
        debug!(iteration, from = %self.state, to = %next, "batch state");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    use krc_primitives::chainhash::Hash;
    use krc_transaction::{LedgerError, SignedTransaction, Utxo};

    struct FlakyLedger {
        owner: Address,
        calls: Cell<u32>,
        submitted: RefCell<Vec<Hash>>,
    }

    impl NetworkClient for FlakyLedger {
        fn get_utxos(&self, _address: &Address) -> Result<Vec<Utxo>, LedgerError> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            if n == 2 {
                return Err(LedgerError::Timeout);
            }
            Ok(vec![Utxo {
                transaction_id: Hash::new([n as u8; 32]),
                output_index: 0,
                value_sompi: 10_000,
                owner_script: self.owner.locking_script(),
            }])
        }

        fn get_balance(&self, _address: &Address) -> Result<u64, LedgerError> {
            Ok(0)
        }

        fn submit(&self, tx: &SignedTransaction) -> Result<Hash, LedgerError> {
            self.submitted.borrow_mut().push(tx.tx_id());
            Ok(tx.tx_id())
        }
    }

    struct CountingPacer(Cell<Vec<u32>>);

    impl Pacer for CountingPacer {
        fn pause(&self, completed: u32) {
            let mut seen = self.0.take();
            seen.push(completed);
            self.0.set(seen);
        }
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let key = PrivateKey::new();
        let owner = Address::from_public_key(&key.pub_key(), Network::Testnet);
        let ledger = FlakyLedger {
            owner,
            calls: Cell::new(0),
            submitted: RefCell::new(Vec::new()),
        };
        let pacer = CountingPacer(Cell::new(Vec::new()));

        let mut batch = MintBatch::new(&ledger, &key, owner, Ticker::new("KAS").unwrap(), 0);
        let result = batch.run(3, &pacer);

        assert_eq!(batch.state(), BatchState::Done);
        assert_eq!(result.iterations(), 3);
        assert!(result.is_partial_failure());
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].iteration, 2);
        assert_eq!(result.failures[0].kind, ErrorKind::Network);
        assert_eq!(
            result.successes.iter().map(|s| s.iteration).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(ledger.submitted.borrow().len(), 2);
        assert_eq!(pacer.0.take(), vec![1, 2]);
    }

    #[test]
    fn signing_failure_is_recorded_as_cryptographic() {
        let key = PrivateKey::new();
        let stranger = Address::from_public_key(&PrivateKey::new().pub_key(), Network::Mainnet);
        let ledger = FlakyLedger {
            owner: stranger,
            calls: Cell::new(0),
            submitted: RefCell::new(Vec::new()),
        };
        let address = Address::from_public_key(&key.pub_key(), Network::Mainnet);

        let mut batch = MintBatch::new(&ledger, &key, address, Ticker::new("KAS").unwrap(), 0);
        let result = batch.run(1, &crate::pacing::NoDelay);
        assert_eq!(result.failures[0].kind, ErrorKind::Cryptographic);
        assert!(ledger.submitted.borrow().is_empty());
    }
}
