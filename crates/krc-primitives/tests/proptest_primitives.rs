use proptest::prelude::*;

use krc_primitives::base58;
use krc_primitives::kdf::{derive_seed, seed_to_keypair};
use krc_primitives::mnemonic;
use krc_primitives::{PinVault, PrimitivesError};

/// A PIN of 4..12 printable characters.
fn arb_pin() -> impl Strategy<Value = String> {
    "[ -~]{4,12}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn vault_unseal_returns_sealed_key(key in prop::array::uniform32(any::<u8>()), pin in arb_pin()) {
        let vault = PinVault::with_iterations(64);
        let blob = vault.seal(&key, &pin).unwrap();
        prop_assert_eq!(blob.len(), 76);
        prop_assert_eq!(*vault.unseal(&blob, &pin).unwrap(), key);
    }

    #[test]
    fn vault_rejects_any_other_pin(
        key in prop::array::uniform32(any::<u8>()),
        pin in arb_pin(),
        other in arb_pin(),
    ) {
        prop_assume!(pin != other);
        let vault = PinVault::with_iterations(64);
        let blob = vault.seal(&key, &pin).unwrap();
        let result = vault.unseal(&blob, &other);
        prop_assert!(matches!(result, Err(PrimitivesError::AuthenticationFailed)));
    }

    #[test]
    fn phrase_codec_recovers_index_bytes(entropy in prop::collection::vec(any::<u8>(), 16..33)) {
        let phrase = mnemonic::encode(&entropy).unwrap();
        prop_assert_eq!(phrase.words().len(), 12);
        let expected: Vec<u16> = entropy[..12].iter().map(|b| u16::from(*b)).collect();
        prop_assert_eq!(&phrase.decode().unwrap()[..], &expected[..]);
    }

    #[test]
    fn phrase_text_parses_back(entropy in prop::collection::vec(any::<u8>(), 16..17)) {
        let phrase = mnemonic::encode(&entropy).unwrap();
        let parsed: mnemonic::RecoveryPhrase = phrase.to_string().parse().unwrap();
        prop_assert_eq!(parsed, phrase);
    }

    #[test]
    fn base58check_round_trip(data in prop::collection::vec(any::<u8>(), 0..40)) {
        let encoded = base58::check_encode(&data);
        prop_assert_eq!(base58::check_decode(&encoded).unwrap(), data);
    }

    #[test]
    fn seed_derivation_is_deterministic(input in prop::collection::vec(any::<u8>(), 1..64)) {
        let a = derive_seed(&input).unwrap();
        let b = derive_seed(&input).unwrap();
        prop_assert_eq!(a.as_bytes(), b.as_bytes());
        if let (Ok(ka), Ok(kb)) = (seed_to_keypair(&a), seed_to_keypair(&b)) {
            prop_assert_eq!(ka.public_key(), kb.public_key());
        }
    }
}
