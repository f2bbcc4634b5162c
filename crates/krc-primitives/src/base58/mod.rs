//! Base58 and Base58Check encoding.
//!
//! The address payload (`version || hash160`) is carried as Base58Check:
//! the Bitcoin Base58 alphabet with a 4-byte double-SHA-256 checksum
//! appended before encoding.

use crate::hash::sha256d;
use crate::PrimitivesError;

/// Number of checksum bytes appended by [`check_encode`].
pub const CHECKSUM_LEN: usize = 4;

/// Encode a byte slice to a Base58 string (Bitcoin alphabet).
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// Decode a Base58 string (Bitcoin alphabet) to bytes.
///
/// # Returns
/// The decoded bytes, or `InvalidBase58` for characters outside the alphabet.
pub fn decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| PrimitivesError::InvalidBase58(e.to_string()))
}

/// Encode `data || sha256d(data)[..4]` as Base58.
///
/// # Arguments
/// * `data` - The payload, typically version byte + hash.
///
/// # Returns
/// A Base58Check-encoded string.
pub fn check_encode(data: &[u8]) -> String {
    let checksum = sha256d(data);
    let mut payload = Vec::with_capacity(data.len() + CHECKSUM_LEN);
    payload.extend_from_slice(data);
    payload.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    encode(&payload)
}

/// Decode a Base58Check string and verify its trailing checksum.
///
/// # Returns
/// The payload without the checksum, `ChecksumMismatch` if the checksum does
/// not match, or `InvalidBase58` for malformed input.
pub fn check_decode(s: &str) -> Result<Vec<u8>, PrimitivesError> {
    let mut decoded = decode(s)?;
    if decoded.len() < CHECKSUM_LEN {
        return Err(PrimitivesError::InvalidBase58(
            "data too short for checksum".to_string(),
        ));
    }
    let split = decoded.len() - CHECKSUM_LEN;
    let expected = sha256d(&decoded[..split]);
    if decoded[split..] != expected[..CHECKSUM_LEN] {
        return Err(PrimitivesError::ChecksumMismatch);
    }
    decoded.truncate(split);
    Ok(decoded)
}
