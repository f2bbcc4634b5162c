//! Seed stretching and single-path key pair derivation.
//!
//! A recovery phrase (or raw key material) is stretched with
//! PBKDF2-HMAC-SHA512 under the fixed salt label `"mnemonic"`, and the first
//! 32 bytes of the resulting seed become the secp256k1 scalar. There is one
//! derivation path per wallet; no hierarchical child keys.

use hmac::Hmac;
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::ec::{PrivateKey, PublicKey};
use crate::mnemonic::RecoveryPhrase;
use crate::PrimitivesError;

/// Fixed PBKDF2 salt label.
pub const SEED_SALT: &[u8] = b"mnemonic";

/// PBKDF2 iteration count for seed stretching.
pub const SEED_ITERATIONS: u32 = 2048;

/// Seed length in bytes.
pub const SEED_LEN: usize = 64;

/// A 64-byte stretched seed, wiped on drop.
pub struct Seed(Zeroizing<[u8; SEED_LEN]>);

impl Seed {
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

/// A private key with its compressed public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    private_key: PrivateKey,
    public_key: PublicKey,
}

impl KeyPair {
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let public_key = private_key.pub_key();
        KeyPair {
            private_key,
            public_key,
        }
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

/// Stretch a phrase or raw key bytes into a 64-byte seed.
///
/// # Arguments
/// * `input` - The UTF-8 phrase bytes, or raw key material.
///
/// # Returns
/// `PBKDF2-HMAC-SHA512(input, "mnemonic", 2048)`.
pub fn derive_seed(input: &[u8]) -> Result<Seed, PrimitivesError> {
    let mut out = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2::pbkdf2::<Hmac<Sha512>>(input, SEED_SALT, SEED_ITERATIONS, &mut out[..])
        .map_err(|e| PrimitivesError::DerivationError(e.to_string()))?;
    Ok(Seed(out))
}

/// Stretch a recovery phrase into a seed.
pub fn derive_seed_from_phrase(phrase: &RecoveryPhrase) -> Result<Seed, PrimitivesError> {
    derive_seed(phrase.phrase().as_bytes())
}

/// Take the first 32 seed bytes as the private scalar.
///
/// # Returns
/// `InvalidPrivateKey` when those bytes are zero or not below the curve order.
pub fn seed_to_keypair(seed: &Seed) -> Result<KeyPair, PrimitivesError> {
    let private_key = PrivateKey::from_bytes(&seed.as_bytes()[..32])?;
    Ok(KeyPair::from_private_key(private_key))
}

/// Build a key pair from a 64-character hex private key.
///
/// # Returns
/// `InvalidHex` / `InvalidKeyLength` for malformed input and
/// `InvalidPrivateKey` for a rejected scalar.
pub fn import_private_key(hex_str: &str) -> Result<KeyPair, PrimitivesError> {
    let private_key = PrivateKey::from_hex(hex_str)?;
    Ok(KeyPair::from_private_key(private_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mnemonic;

    #[test]
    fn test_seed_matches_bip39_stretching() {
        // Standard BIP-39 vector: the all-"abandon ... about" phrase with an
        // empty passphrase stretches under the same salt and rounds.
        let phrase = "abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon about";
        let seed = derive_seed(phrase.as_bytes()).unwrap();
        assert_eq!(
            hex::encode(seed.as_bytes()),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_same_phrase_same_keypair() {
        let phrase = mnemonic::encode(&[42u8; 16]).unwrap();
        let a = seed_to_keypair(&derive_seed_from_phrase(&phrase).unwrap()).unwrap();
        let b = seed_to_keypair(&derive_seed_from_phrase(&phrase).unwrap()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.public_key().to_compressed().len(), 33);
    }

    #[test]
    fn test_different_phrases_differ() {
        let a = mnemonic::encode(&[1u8; 16]).unwrap();
        let b = mnemonic::encode(&[2u8; 16]).unwrap();
        let ka = seed_to_keypair(&derive_seed_from_phrase(&a).unwrap()).unwrap();
        let kb = seed_to_keypair(&derive_seed_from_phrase(&b).unwrap()).unwrap();
        assert_ne!(ka.public_key(), kb.public_key());
    }

    #[test]
    fn test_import_private_key() {
        let kp = import_private_key(
            "0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        assert_eq!(
            hex::encode(kp.public_key().hash160()),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
        assert!(matches!(
            import_private_key("abcd"),
            Err(PrimitivesError::InvalidKeyLength { .. })
        ));
        assert!(matches!(
            import_private_key(&"0".repeat(64)),
            Err(PrimitivesError::InvalidPrivateKey(_))
        ));
    }
}
