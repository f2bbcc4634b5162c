#![deny(missing_docs)]

//! KRC wallet SDK - Complete SDK.
//!
//! Re-exports all SDK components for convenient single-crate usage.

pub use krc_primitives as primitives;
pub use krc_rest as rest;
pub use krc_script as script;
pub use krc_transaction as transaction;
pub use krc_wallet as wallet;

pub use krc_wallet::{Wallet, WalletConfig, WalletError};
