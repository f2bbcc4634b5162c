//! REST HTTP client for UTXO queries and transaction submission.

use std::future::Future;

use krc_primitives::chainhash::Hash;
use krc_script::Address;
use krc_transaction::{LedgerError, NetworkClient, SignedTransaction, Utxo};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, info, warn};

use crate::error::RestError;
use crate::types::{BalanceResponse, RestConfig, SubmitRequest, SubmitResponse, UtxoResponse};

/// HTTP client for the REST ledger API.
#[derive(Debug, Clone)]
pub struct RestClient {
    config: RestConfig,
    client: reqwest::Client,
}

impl RestClient {
    /// Create a client whose requests are bounded by `config.timeout`.
    pub fn new(config: RestConfig) -> Result<Self, RestError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(build_headers(&config))
            .build()?;
        Ok(Self { config, client })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    /// Fetch the UTXOs of `address`.
    pub async fn get_utxos_async(&self, address: &Address) -> Result<Vec<Utxo>, RestError> {
        let url = format!("{}/addresses/{}/utxos", self.config.base_url, address);
        debug!(%address, "fetching utxos");

        let resp = check_status(self.client.get(&url).send().await?).await?;
        let entries: Vec<UtxoResponse> = serde_json::from_str(&resp.text().await?)?;
        let utxos = entries
            .into_iter()
            .map(Utxo::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(%address, count = utxos.len(), "fetched utxos");
        Ok(utxos)
    }

    /// Fetch the balance of `address` in sompi.
    pub async fn get_balance_async(&self, address: &Address) -> Result<u64, RestError> {
        let url = format!("{}/addresses/{}/balance", self.config.base_url, address);
        debug!(%address, "fetching balance");

        let resp = check_status(self.client.get(&url).send().await?).await?;
        let body: BalanceResponse = serde_json::from_str(&resp.text().await?)?;
        Ok(body.balance)
    }

    /// Submit a signed transaction.
    ///
    /// # Returns
    /// The id the ledger assigned, or `Rejected` when the body carries an
    /// error.
    pub async fn submit_async(&self, tx: &SignedTransaction) -> Result<Hash, RestError> {
        let url = format!("{}/transactions", self.config.base_url);
        let request = SubmitRequest::from(tx);
        debug!(tx_id = %tx.tx_id(), inputs = tx.tx().inputs.len(), "submitting transaction");

        let resp = check_status(self.client.post(&url).json(&request).send().await?).await?;
        let body: SubmitResponse = serde_json::from_str(&resp.text().await?)?;

        if let Some(reason) = body.error {
            warn!(tx_id = %tx.tx_id(), %reason, "transaction rejected");
            return Err(RestError::Rejected(reason));
        }
        let id = body
            .transaction_id
            .ok_or_else(|| RestError::InvalidResponse("missing transactionId".to_string()))?;
        let id = Hash::from_hex(&id)
            .map_err(|e| RestError::InvalidResponse(format!("transactionId {:?}: {}", id, e)))?;

        if id != tx.tx_id() {
            warn!(local = %tx.tx_id(), remote = %id, "ledger reported a different transaction id");
        }
        info!(tx_id = %id, "transaction submitted");
        Ok(id)
    }

    /// Drive `fut` to completion from synchronous code.
    ///
    /// Inside a multi-threaded runtime the current worker is handed off
    /// with `block_in_place`; outside any runtime a private one is built.
    /// A current-thread runtime cannot block, so that case is an error.
    fn block_on<F: Future>(&self, fut: F) -> Result<F::Output, RestError> {
        match Handle::try_current() {
            Ok(handle) => match handle.runtime_flavor() {
                RuntimeFlavor::CurrentThread => Err(RestError::Runtime(
                    "blocking ledger call from a current-thread runtime".to_string(),
                )),
                _ => Ok(tokio::task::block_in_place(|| handle.block_on(fut))),
            },
            Err(_) => {
                let rt = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .map_err(|e| RestError::Runtime(e.to_string()))?;
                Ok(rt.block_on(fut))
            }
        }
    }
}

impl NetworkClient for RestClient {
    fn get_utxos(&self, address: &Address) -> Result<Vec<Utxo>, LedgerError> {
        Ok(self.block_on(self.get_utxos_async(address))??)
    }

    fn get_balance(&self, address: &Address) -> Result<u64, LedgerError> {
        Ok(self.block_on(self.get_balance_async(address))??)
    }

    fn submit(&self, tx: &SignedTransaction) -> Result<Hash, LedgerError> {
        Ok(self.block_on(self.submit_async(tx))??)
    }
}

fn build_headers(config: &RestConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(ref key) = config.api_key {
        if let Ok(mut val) = HeaderValue::from_str(&format!("Bearer {key}")) {
            val.set_sensitive(true);
            headers.insert(AUTHORIZATION, val);
        }
    }
    headers
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, RestError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(RestError::Status {
        status: status.as_u16(),
        body,
    })
}
