/// Elliptic curve cryptography on secp256k1.
///
/// Private keys, compressed public keys and low-S ECDSA signatures.

pub mod private_key;
pub mod public_key;
pub mod signature;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
pub use signature::Signature;
