#![deny(missing_docs)]

//! # krc-rest
//!
//! HTTP client for a Kaspa-style REST ledger API: UTXO and balance lookups
//! and transaction submission.
//!
//! The client is async-first and also implements the blocking
//! [`NetworkClient`](krc_transaction::NetworkClient) trait used by the
//! wallet.
//!
//! # Example
//!
//! ```no_run
//! use krc_rest::{RestClient, RestConfig};
//! use krc_script::Network;
//!
//! let client = RestClient::new(RestConfig {
//!     api_key: Some("my-key".to_string()),
//!     ..RestConfig::for_network(Network::Testnet)
//! })
//! .unwrap();
//! ```

pub mod client;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::RestClient;
pub use error::RestError;
pub use types::RestConfig;
