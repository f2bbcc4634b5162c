use proptest::prelude::*;

use krc_script::Network;
use krc_transaction::{LedgerError, NetworkClient, SignedTransaction, Utxo};
use krc_wallet::{ErrorKind, PacingConfig, Wallet, WalletConfig};

struct NoLedger;

impl NetworkClient for NoLedger {
    fn get_utxos(&self, _: &krc_script::Address) -> Result<Vec<Utxo>, LedgerError> {
        Err(LedgerError::Transport("unreachable".into()))
    }
    fn get_balance(&self, _: &krc_script::Address) -> Result<u64, LedgerError> {
        Err(LedgerError::Transport("unreachable".into()))
    }
    fn submit(&self, _: &SignedTransaction) -> Result<krc_primitives::chainhash::Hash, LedgerError> {
        Err(LedgerError::Transport("unreachable".into()))
    }
}

fn wallet() -> Wallet<NoLedger> {
    Wallet::new(WalletConfig {
        vault_iterations: 16,
        pacing: PacingConfig::None,
        ..WalletConfig::default()
    })
}

fn arb_network() -> impl Strategy<Value = Network> {
    prop_oneof![Just(Network::Mainnet), Just(Network::Testnet)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn import_is_deterministic_and_decrypt_round_trips(
        seed in prop::array::uniform32(1u8..),
        pin in "[0-9]{4,8}",
        network in arb_network(),
    ) {
        let key_hex = hex::encode(seed);
        let w = wallet();
        if let Ok(first) = w.import_private_key(&key_hex, &pin, network) {
            let second = w.import_private_key(&key_hex, &pin, network).unwrap();
            prop_assert_eq!(&first.address, &second.address);

            let decrypted = w.decrypt(&first.encrypted_private_key, &pin).unwrap();
            prop_assert_eq!(&decrypted.private_key_hex, &key_hex);

            let wrong = format!("{}x", pin);
            let err = w.decrypt(&first.encrypted_private_key, &wrong).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::Authentication);
        }
    }

    #[test]
    fn estimate_fee_is_at_least_minimum(network in arb_network()) {
        let fee = wallet().estimate_fee(network).unwrap().estimated_fee_sompi;
        prop_assert!(fee >= krc_transaction::fee::MIN_FEE_SOMPI);
    }
}
