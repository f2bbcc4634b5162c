/// KRC wallet SDK - Cryptographic primitives, hashing, and key handling.
///
/// This crate provides the foundational building blocks for the wallet core:
/// - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
/// - Chain hash type for transaction identification
/// - Base58 / Base58Check encoding
/// - Elliptic curve cryptography (secp256k1 keys and ECDSA signatures)
/// - Secure entropy and the 12-word recovery phrase codec
/// - Seed stretching and single-path key pair derivation
/// - PIN-sealed storage of private keys (PBKDF2 + AES-256-GCM)
/// - Variable-length integer encoding and binary reader/writer

pub mod hash;
pub mod chainhash;
pub mod util;
pub mod base58;
pub mod ec;
pub mod entropy;
pub mod mnemonic;
pub mod kdf;
pub mod vault;

mod error;
pub use error::PrimitivesError;
pub use entropy::Entropy;
pub use kdf::{KeyPair, Seed};
pub use mnemonic::RecoveryPhrase;
pub use vault::{EncryptedPrivateKey, PinVault};
