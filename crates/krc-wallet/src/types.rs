//! Response types returned by wallet operations.
//!
//! All serialize with camelCase field names.

use krc_script::Network;
use serde::Serialize;
use zeroize::Zeroize;

/// Result of `create`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletResponse {
    pub address: String,
    /// The 12 recovery words separated by single spaces.
    pub mnemonic: String,
    /// Hex-encoded PIN-sealed private key.
    pub encrypted_private_key: String,
}

impl Drop for CreateWalletResponse {
    fn drop(&mut self) {
        self.mnemonic.zeroize();
    }
}

impl std::fmt::Debug for CreateWalletResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateWalletResponse")
            .field("address", &self.address)
            .field("mnemonic", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Result of `import_mnemonic` and `import_private_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportWalletResponse {
    pub address: String,
    pub encrypted_private_key: String,
}

/// Result of `decrypt`. The key is wiped when the response is dropped.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptResponse {
    pub private_key_hex: String,
}

impl Drop for DecryptResponse {
    fn drop(&mut self) {
        self.private_key_hex.zeroize();
    }
}

impl std::fmt::Debug for DecryptResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DecryptResponse(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub address: String,
    /// Balance in sompi.
    pub balance: u64,
    /// `true` when the ledger could not be reached and `balance` is a
    /// placeholder zero.
    pub degraded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub transaction_id: String,
    pub from_address: String,
    pub to_address: String,
    pub amount: u64,
    pub ticker: String,
    pub network: Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeEstimateResponse {
    pub estimated_fee_sompi: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responses_use_camel_case() {
        let v = serde_json::to_value(TransferResponse {
            transaction_id: "ab".into(),
            from_address: "kaspa:a".into(),
            to_address: "kaspa:b".into(),
            amount: 100,
            ticker: "TEST".into(),
            network: Network::Mainnet,
        })
        .unwrap();
        assert_eq!(v["transactionId"], "ab");
        assert_eq!(v["fromAddress"], "kaspa:a");
        assert_eq!(v["network"], "mainnet");

        let v = serde_json::to_value(FeeEstimateResponse { estimated_fee_sompi: 2_000 }).unwrap();
        assert_eq!(v["estimatedFeeSompi"], 2_000);
    }

    #[test]
    fn secrets_are_not_debug_printed() {
        let created = CreateWalletResponse {
            address: "kaspa:x".into(),
            mnemonic: "abandon ability".into(),
            encrypted_private_key: "00".into(),
        };
        assert!(!format!("{:?}", created).contains("abandon"));
        let decrypted = DecryptResponse {
            private_key_hex: "deadbeef".into(),
        };
        assert!(!format!("{:?}", decrypted).contains("deadbeef"));
    }
}
