//! Secure random entropy for wallet creation.

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::PrimitivesError;

/// Minimum accepted entropy length in bytes.
pub const MIN_ENTROPY_LEN: usize = 16;

/// Default entropy length used by wallet creation.
pub const DEFAULT_ENTROPY_LEN: usize = 16;

/// A buffer of OS-sourced random bytes, wiped on drop.
pub struct Entropy(Zeroizing<Vec<u8>>);

impl Entropy {
    /// Wrap caller-provided bytes (tests and deterministic replays).
    ///
    /// # Returns
    /// `EntropyTooShort` when fewer than [`MIN_ENTROPY_LEN`] bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() < MIN_ENTROPY_LEN {
            return Err(PrimitivesError::EntropyTooShort {
                min: MIN_ENTROPY_LEN,
                got: bytes.len(),
            });
        }
        Ok(Entropy(Zeroizing::new(bytes.to_vec())))
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

impl std::fmt::Debug for Entropy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entropy({} bytes)", self.0.len())
    }
}

/// Draw `len` bytes from the operating system's secure random source.
///
/// # Arguments
/// * `len` - Number of bytes, at least [`MIN_ENTROPY_LEN`].
///
/// # Returns
/// The entropy, `EntropyTooShort` for a short request, or
/// `EntropyUnavailable` if the OS source fails.
pub fn generate_entropy(len: usize) -> Result<Entropy, PrimitivesError> {
    if len < MIN_ENTROPY_LEN {
        return Err(PrimitivesError::EntropyTooShort {
            min: MIN_ENTROPY_LEN,
            got: len,
        });
    }
    let mut buf = Zeroizing::new(vec![0u8; len]);
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| PrimitivesError::EntropyUnavailable(e.to_string()))?;
    Ok(Entropy(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_default_length() {
        let e = generate_entropy(DEFAULT_ENTROPY_LEN).unwrap();
        assert_eq!(e.len(), 16);
    }

    #[test]
    fn test_two_draws_differ() {
        let a = generate_entropy(32).unwrap();
        let b = generate_entropy(32).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_short_request_rejected() {
        assert!(matches!(
            generate_entropy(15),
            Err(PrimitivesError::EntropyTooShort { min: 16, got: 15 })
        ));
        assert!(Entropy::from_bytes(&[0u8; 8]).is_err());
    }

    #[test]
    fn test_debug_hides_bytes() {
        let e = Entropy::from_bytes(&[0xab; 16]).unwrap();
        assert_eq!(format!("{:?}", e), "Entropy(16 bytes)");
    }
}
