//! secp256k1 private key.
//!
//! Wraps a k256 signing key. The scalar is wiped when the key is dropped and
//! is never printed by `Debug`.

use std::fmt;

use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::ec::public_key::PublicKey;
use crate::ec::signature::Signature;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
pub const PRIVATE_KEY_LEN: usize = 32;

#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new random private key from the OS random number generator.
    pub fn new() -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Create a private key from a raw 32-byte big-endian scalar.
    ///
    /// # Arguments
    /// * `bytes` - The scalar bytes.
    ///
    /// # Returns
    /// `InvalidKeyLength` for anything but 32 bytes, `InvalidPrivateKey` if
    /// the scalar is zero or not below the curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_LEN {
            return Err(PrimitivesError::InvalidKeyLength {
                expected: PRIVATE_KEY_LEN,
                got: bytes.len(),
            });
        }
        let inner = SigningKey::from_slice(bytes)
            .map_err(|_| PrimitivesError::InvalidPrivateKey("scalar out of range".to_string()))?;
        Ok(PrivateKey { inner })
    }

    /// Create a private key from a 64-character hex string.
    ///
    /// # Returns
    /// `InvalidHex` or `InvalidKeyLength` for malformed input,
    /// `InvalidPrivateKey` for a rejected scalar.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = Zeroizing::new(hex::decode(hex_str.trim())?);
        Self::from_bytes(&bytes)
    }

    /// Serialize the scalar as 32 big-endian bytes.
    ///
    /// The returned buffer is wiped when dropped.
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_LEN]> {
        let mut out = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Serialize the scalar as lowercase hex.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(*self.to_bytes()))
    }

    /// The public key for this private key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(self.inner.verifying_key())
    }

    /// Sign a 32-byte digest with a deterministic (RFC 6979) nonce.
    ///
    /// The signature is low-S normalized.
    pub fn sign(&self, digest: &[u8; 32]) -> Result<Signature, PrimitivesError> {
        Signature::sign(digest, self)
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl Default for PrivateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        *self.to_bytes() == *other.to_bytes()
    }
}

impl Eq for PrivateKey {}
