//! Wallet configuration.

use std::time::Duration;

use krc_primitives::vault::DEFAULT_PIN_ITERATIONS;

use crate::pacing::{FixedDelay, NoDelay, Pacer};

/// Delay between batch mint iterations.
pub const DEFAULT_MINT_DELAY: Duration = Duration::from_secs(1);

/// Fresh-entropy draws `create` makes before giving up on a usable scalar.
pub const DEFAULT_MAX_KEY_ATTEMPTS: u32 = 8;

/// How batch iterations are spaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacingConfig {
    None,
    Fixed(Duration),
}

impl PacingConfig {
    pub fn pacer(&self) -> Box<dyn Pacer> {
        match *self {
            PacingConfig::None => Box::new(NoDelay),
            PacingConfig::Fixed(d) => Box::new(FixedDelay(d)),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        PacingConfig::Fixed(DEFAULT_MINT_DELAY)
    }
}

/// Configuration for a [`Wallet`](crate::Wallet).
#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// PBKDF2 iterations used to stretch the PIN.
    pub vault_iterations: u32,
    pub pacing: PacingConfig,
    pub max_key_attempts: u32,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            vault_iterations: DEFAULT_PIN_ITERATIONS,
            pacing: PacingConfig::default(),
            max_key_attempts: DEFAULT_MAX_KEY_ATTEMPTS,
        }
    }
}
