//! 32-byte hash used as a transaction identifier.
//!
//! Stored in internal (little-endian) order and displayed byte-reversed,
//! which is how ledger explorers and REST endpoints print transaction ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Size of a Hash in bytes.
pub const HASH_SIZE: usize = 32;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// Wrap 32 bytes given in internal order.
    pub fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    /// Create a Hash from a 32-byte slice in internal order.
    ///
    /// # Returns
    /// `InvalidHash` when the slice is not exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let arr: [u8; HASH_SIZE] = bytes.try_into().map_err(|_| {
            PrimitivesError::InvalidHash(format!(
                "invalid hash length of {}, want {}",
                bytes.len(),
                HASH_SIZE
            ))
        })?;
        Ok(Hash(arr))
    }

    /// Parse a 64-character hex string in display (reversed) order.
    ///
    /// # Arguments
    /// * `hex_str` - The transaction id as printed by explorers.
    ///
    /// # Returns
    /// The hash in internal order, or an error for bad hex or length.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let mut bytes = hex::decode(hex_str)?;
        bytes.reverse();
        Self::from_bytes(&bytes)
    }

    /// Hash `data` with double SHA-256.
    pub fn double_sha256(data: &[u8]) -> Self {
        Hash(sha256d(data))
    }

    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        f.write_str(&hex::encode(reversed))
    }
}

impl FromStr for Hash {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hash::from_hex(s)
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TXID: &str = "b0ed5f5d029d5ce7a2b4dbbcbfb0a1e43e4b6a4fd5ad7e2c6bca4b5e48b4cd0f";

    #[test]
    fn test_display_is_reversed() {
        let mut bytes = [0u8; HASH_SIZE];
        bytes[0] = 0x01;
        let h = Hash::new(bytes);
        let s = h.to_string();
        assert!(s.ends_with("01"));
        assert!(s.starts_with("00"));
    }

    #[test]
    fn test_from_hex_round_trip() {
        let h = Hash::from_hex(TXID).unwrap();
        assert_eq!(h.to_string(), TXID);
        assert_eq!(h.as_bytes()[0], 0x0f);
        assert_eq!(TXID.parse::<Hash>().unwrap(), h);
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        assert!(Hash::from_hex("abcd").is_err());
        assert!(Hash::from_hex(&format!("{}00", TXID)).is_err());
        assert!(Hash::from_hex("zz").is_err());
    }

    #[test]
    fn test_serde_as_display_string() {
        let h = Hash::from_hex(TXID).unwrap();
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{}\"", TXID));
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }
}
