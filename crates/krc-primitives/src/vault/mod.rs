//! PIN-sealed private key storage.
//!
//! A 32-byte AES key is derived from the PIN with PBKDF2-HMAC-SHA256 over a
//! fresh random salt, and the private key is sealed with AES-256-GCM under a
//! fresh 12-byte nonce. The blob layout is
//! `salt(16) || iv(12) || ciphertext(32) || tag(16)`.
//!
//! Unsealing never distinguishes a wrong PIN from a corrupted or truncated
//! blob: every failure is `AuthenticationFailed`, and no partial plaintext is
//! returned.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::ec::private_key::PRIVATE_KEY_LEN;
use crate::PrimitivesError;

pub const SALT_LEN: usize = 16;
pub const IV_LEN: usize = 12;
pub const TAG_LEN: usize = 16;

/// Total sealed blob length.
pub const BLOB_LEN: usize = SALT_LEN + IV_LEN + PRIVATE_KEY_LEN + TAG_LEN;

/// Default PBKDF2 iteration count for PIN stretching.
pub const DEFAULT_PIN_ITERATIONS: u32 = 100_000;

/// An opaque sealed private key, the only key artifact handed out for storage.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedPrivateKey(Vec<u8>);

impl EncryptedPrivateKey {
    /// Wrap raw blob bytes. The layout is only checked when unsealing.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        EncryptedPrivateKey(bytes.to_vec())
    }

    /// Parse the hex form produced by [`to_hex`](Self::to_hex).
    ///
    /// # Returns
    /// `InvalidHex` if the string is not hex.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        Ok(EncryptedPrivateKey(hex::decode(hex_str.trim())?))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for EncryptedPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EncryptedPrivateKey({} bytes)", self.0.len())
    }
}

/// Seals and unseals private keys under a PIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinVault {
    iterations: u32,
}

impl Default for PinVault {
    fn default() -> Self {
        PinVault {
            iterations: DEFAULT_PIN_ITERATIONS,
        }
    }
}

impl PinVault {
    /// A vault stretching PINs with the given PBKDF2 iteration count.
    ///
    /// A blob must be unsealed with the same count it was sealed with.
    pub fn with_iterations(iterations: u32) -> Self {
        PinVault {
            iterations: iterations.max(1),
        }
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Seal a 32-byte private key under `pin`.
    ///
    /// # Arguments
    /// * `private_key` - The raw scalar bytes.
    /// * `pin` - The caller's PIN.
    ///
    /// # Returns
    /// A fresh 76-byte blob; sealing the same key twice yields different blobs.
    pub fn seal(
        &self,
        private_key: &[u8; PRIVATE_KEY_LEN],
        pin: &str,
    ) -> Result<EncryptedPrivateKey, PrimitivesError> {
        let mut salt = [0u8; SALT_LEN];
        let mut iv = [0u8; IV_LEN];
        OsRng
            .try_fill_bytes(&mut salt)
            .and_then(|_| OsRng.try_fill_bytes(&mut iv))
            .map_err(|e| PrimitivesError::EntropyUnavailable(e.to_string()))?;

        let cipher = self.cipher(pin, &salt)?;
        let sealed = cipher
            .encrypt(Nonce::from_slice(&iv), private_key.as_slice())
            .map_err(|_| PrimitivesError::EncryptionError("AES-GCM seal failed".to_string()))?;

        let mut blob = Vec::with_capacity(BLOB_LEN);
        blob.extend_from_slice(&salt);
        blob.extend_from_slice(&iv);
        blob.extend_from_slice(&sealed);
        Ok(EncryptedPrivateKey(blob))
    }

    /// Recover the private key bytes from a blob.
    ///
    /// # Returns
    /// The 32-byte key in a wiping buffer, or `AuthenticationFailed` for a
    /// wrong PIN, tampered byte or wrong-length blob.
    pub fn unseal(
        &self,
        blob: &EncryptedPrivateKey,
        pin: &str,
    ) -> Result<Zeroizing<[u8; PRIVATE_KEY_LEN]>, PrimitivesError> {
        let bytes = blob.as_bytes();
        if bytes.len() != BLOB_LEN {
            return Err(PrimitivesError::AuthenticationFailed);
        }
        let (salt, rest) = bytes.split_at(SALT_LEN);
        let (iv, sealed) = rest.split_at(IV_LEN);

        let cipher = self
            .cipher(pin, salt)
            .map_err(|_| PrimitivesError::AuthenticationFailed)?;
        let plain = Zeroizing::new(
            cipher
                .decrypt(Nonce::from_slice(iv), sealed)
                .map_err(|_| PrimitivesError::AuthenticationFailed)?,
        );

        let mut out = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
        if plain.len() != PRIVATE_KEY_LEN {
            return Err(PrimitivesError::AuthenticationFailed);
        }
        out.copy_from_slice(&plain);
        Ok(out)
    }

    /// Unseal, run `f` over the plaintext, then wipe it.
    ///
    /// The plaintext never outlives the closure.
    pub fn with_unsealed<T, F>(
        &self,
        blob: &EncryptedPrivateKey,
        pin: &str,
        f: F,
    ) -> Result<T, PrimitivesError>
    where
        F: FnOnce(&[u8; PRIVATE_KEY_LEN]) -> T,
    {
        let key = self.unseal(blob, pin)?;
        Ok(f(&key))
    }

    fn cipher(&self, pin: &str, salt: &[u8]) -> Result<Aes256Gcm, PrimitivesError> {
        let mut key = Zeroizing::new([0u8; 32]);
        pbkdf2::pbkdf2::<hmac::Hmac<Sha256>>(pin.as_bytes(), salt, self.iterations, &mut key[..])
            .map_err(|e| PrimitivesError::DerivationError(e.to_string()))?;
        Aes256Gcm::new_from_slice(&key[..])
            .map_err(|e| PrimitivesError::EncryptionError(e.to_string()))
    }
}
