//! ECDSA signatures over secp256k1.
//!
//! Signatures are produced with RFC 6979 deterministic nonces over a prehashed
//! 32-byte digest and are always low-S normalized before serialization.

use k256::ecdsa;
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};

use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    inner: ecdsa::Signature,
}

impl Signature {
    /// Sign a 32-byte digest.
    ///
    /// # Arguments
    /// * `digest` - The signature hash to commit to.
    /// * `priv_key` - The signing key.
    ///
    /// # Returns
    /// A low-S signature, or `InvalidSignature` if signing fails.
    pub fn sign(digest: &[u8; 32], priv_key: &PrivateKey) -> Result<Self, PrimitivesError> {
        let sig: ecdsa::Signature = priv_key.signing_key().sign_prehash(digest)?;
        let inner = sig.normalize_s().unwrap_or(sig);
        Ok(Signature { inner })
    }

    /// Parse a DER-encoded signature.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let inner = ecdsa::Signature::from_der(bytes)?;
        Ok(Signature { inner })
    }

    /// Serialize as DER (`0x30 len 0x02 r 0x02 s`).
    pub fn to_der(&self) -> Vec<u8> {
        self.inner.to_der().as_bytes().to_vec()
    }

    /// Whether S is in the lower half of the curve order.
    pub fn is_low_s(&self) -> bool {
        self.inner.normalize_s().is_none()
    }

    /// Verify against a 32-byte digest and public key.
    pub fn verify(&self, digest: &[u8; 32], pub_key: &PublicKey) -> bool {
        pub_key
            .verifying_key()
            .verify_prehash(digest, &self.inner)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256;

    #[test]
    fn test_sign_verify() {
        let key = PrivateKey::new();
        let digest = sha256(b"krc20 signature test");
        let sig = key.sign(&digest).unwrap();
        assert!(sig.is_low_s());
        assert!(key.pub_key().verify(&digest, &sig));

        let other = sha256(b"different message");
        assert!(!key.pub_key().verify(&other, &sig));
        assert!(!PrivateKey::new().pub_key().verify(&digest, &sig));
    }

    #[test]
    fn test_signing_is_deterministic() {
        let key = PrivateKey::from_hex(
            "eaf02ca348c524e6392655ba4d29603cd1a7347d9d65cfe93ce1ebffdca22694",
        )
        .unwrap();
        let digest = sha256(b"same digest");
        assert_eq!(key.sign(&digest).unwrap(), key.sign(&digest).unwrap());
    }

    #[test]
    fn test_der_round_trip() {
        let key = PrivateKey::new();
        let digest = sha256(b"der");
        let sig = key.sign(&digest).unwrap();
        let der = sig.to_der();
        assert_eq!(der[0], 0x30);
        assert_eq!(der[1] as usize, der.len() - 2);
        assert_eq!(Signature::from_der(&der).unwrap(), sig);
    }

    #[test]
    fn test_from_der_rejects_garbage() {
        assert!(Signature::from_der(&[0x30, 0x01, 0x00]).is_err());
    }
}
