//! Fee policy.
//!
//! `fee = network minimum + data surcharge + priority fee`, all in sompi.

use krc_script::Network;

use crate::TransactionError;

/// Minimum relay fee in sompi, the same on every network.
pub const MIN_FEE_SOMPI: u64 = 1_000;

/// Surcharge for the data-carrying output every token transaction has.
pub const DATA_SURCHARGE_SOMPI: u64 = 1_000;

pub fn minimum_fee(network: Network) -> u64 {
    match network {
        Network::Mainnet | Network::Testnet => MIN_FEE_SOMPI,
    }
}

/// Total fee for a token transaction.
///
/// # Arguments
/// * `network` - Network whose minimum fee applies.
/// * `priority_fee` - Extra sompi offered by the caller.
///
/// # Returns
/// The fee, or `FeeError` if the sum overflows `u64`.
pub fn calculate_fee(network: Network, priority_fee: u64) -> Result<u64, TransactionError> {
    minimum_fee(network)
        .checked_add(DATA_SURCHARGE_SOMPI)
        .and_then(|f| f.checked_add(priority_fee))
        .ok_or_else(|| {
            TransactionError::FeeError(format!("priority fee {} overflows", priority_fee))
        })
}
