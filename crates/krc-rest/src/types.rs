//! REST client configuration and wire structures.

use std::time::Duration;

use krc_primitives::chainhash::Hash;
use krc_script::{Network, Script};
use krc_transaction::{SignedTransaction, Utxo};
use serde::{Deserialize, Serialize};

use crate::error::RestError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a [`RestClient`](crate::RestClient).
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Base URL of the API, without a trailing slash.
    pub base_url: String,
    /// Optional Bearer token for authentication.
    pub api_key: Option<String>,
    /// Bound on each request, connect through body.
    pub timeout: Duration,
}

impl RestConfig {
    /// Public endpoint defaults for `network`.
    pub fn for_network(network: Network) -> Self {
        let base_url = match network {
            Network::Mainnet => "https://api.kaspa.org",
            Network::Testnet => "https://api-tn10.kaspa.org",
        };
        RestConfig {
            base_url: base_url.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self::for_network(Network::Mainnet)
    }
}

/// Outpoint as the API spells it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutpointJson {
    /// Transaction id in display order.
    pub transaction_id: String,
    /// Output index.
    pub index: u32,
}

/// A locking script with its script version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptPublicKeyJson {
    /// Script version; always 0 for P2PKH.
    #[serde(default)]
    pub version: u16,
    /// Hex-encoded script.
    pub script_public_key: String,
}

/// The spendable part of a UTXO record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoEntryJson {
    /// Value in sompi, as a decimal string.
    pub amount: String,
    /// Owner script.
    pub script_public_key: ScriptPublicKeyJson,
}

/// One element of `GET /addresses/{address}/utxos`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtxoResponse {
    /// Where the output lives.
    pub outpoint: OutpointJson,
    /// Value and owner script.
    pub utxo_entry: UtxoEntryJson,
}

impl TryFrom<UtxoResponse> for Utxo {
    type Error = RestError;

    fn try_from(r: UtxoResponse) -> Result<Self, Self::Error> {
        let transaction_id = Hash::from_hex(&r.outpoint.transaction_id).map_err(|e| {
            RestError::InvalidResponse(format!(
                "utxo transaction id {:?}: {}",
                r.outpoint.transaction_id, e
            ))
        })?;
        let value_sompi = r.utxo_entry.amount.parse::<u64>().map_err(|_| {
            RestError::InvalidResponse(format!("utxo amount {:?}", r.utxo_entry.amount))
        })?;
        let owner_script = Script::from_hex(&r.utxo_entry.script_public_key.script_public_key)
            .map_err(|e| RestError::InvalidResponse(format!("utxo script: {}", e)))?;
        Ok(Utxo {
            transaction_id,
            output_index: r.outpoint.index,
            value_sompi,
            owner_script,
        })
    }
}

/// Body of `GET /addresses/{address}/balance`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    /// The queried address.
    pub address: String,
    /// Balance in sompi.
    pub balance: u64,
}

/// Transaction input for submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputJson {
    /// Outpoint being spent.
    pub previous_outpoint: OutpointJson,
    /// Hex-encoded signature script.
    pub signature_script: String,
    /// Input sequence.
    pub sequence: u32,
}

/// Transaction output for submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputJson {
    /// Value in sompi.
    pub amount: u64,
    /// Locking script.
    pub script_public_key: ScriptPublicKeyJson,
}

/// Transaction body for submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionJson {
    /// Transaction version.
    pub version: u16,
    /// Signed inputs.
    pub inputs: Vec<InputJson>,
    /// Outputs.
    pub outputs: Vec<OutputJson>,
    /// Lock time.
    pub lock_time: u64,
}

/// Body of `POST /transactions`.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitRequest {
    /// The transaction to submit.
    pub transaction: TransactionJson,
}

impl From<&SignedTransaction> for SubmitRequest {
    fn from(signed: &SignedTransaction) -> Self {
        let tx = signed.tx();
        let inputs = tx
            .inputs
            .iter()
            .map(|input| InputJson {
                previous_outpoint: OutpointJson {
                    transaction_id: input.previous_outpoint.transaction_id.to_string(),
                    index: input.previous_outpoint.index,
                },
                signature_script: input
                    .signature_script
                    .as_ref()
                    .map(|s| s.to_hex())
                    .unwrap_or_default(),
                sequence: input.sequence,
            })
            .collect();
        let outputs = tx
            .outputs
            .iter()
            .map(|output| OutputJson {
                amount: output.value,
                script_public_key: ScriptPublicKeyJson {
                    version: 0,
                    script_public_key: output.locking_script.to_hex(),
                },
            })
            .collect();

        SubmitRequest {
            transaction: TransactionJson {
                version: tx.version,
                inputs,
                outputs,
                lock_time: tx.lock_time,
            },
        }
    }
}

/// Body returned by `POST /transactions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    /// Accepted transaction id, in display order.
    pub transaction_id: Option<String>,
    /// Rejection reason, when the ledger refused the transaction.
    pub error: Option<String>,
}
