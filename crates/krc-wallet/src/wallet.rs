//! The wallet operation surface.
//!
//! Key material is derived from caller input inside each call and wiped
//! before the call returns; the sealed key blob is the only artifact meant
//! for storage. Ledger access goes through one `NetworkClient` per network.

use krc_primitives::entropy::{generate_entropy, DEFAULT_ENTROPY_LEN};
use krc_primitives::kdf::{self, KeyPair};
use krc_primitives::{EncryptedPrivateKey, PinVault, PrimitivesError, RecoveryPhrase};
use krc_rest::{RestClient, RestConfig};
use krc_script::{Address, Network};
use krc_transaction::fee::calculate_fee;
use krc_transaction::{build_transfer, sign, NetworkClient, Ticker};
use tracing::{debug, info, warn};

use crate::batch::{MintBatch, MintBatchResult};
use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::types::{
    BalanceResponse, CreateWalletResponse, DecryptResponse, FeeEstimateResponse,
    ImportWalletResponse, TransferResponse,
};

/// Shortest PIN accepted when sealing a key.
pub const MIN_PIN_LEN: usize = 4;

/// Parse `"mainnet"` or `"testnet"`.
pub fn parse_network(s: &str) -> Result<Network, WalletError> {
    s.parse::<Network>()
        .map_err(|_| WalletError::Validation(format!("unknown network '{}'", s)))
}

pub struct Wallet<C> {
    config: WalletConfig,
    vault: PinVault,
    clients: Vec<(Network, C)>,
}

impl Wallet<RestClient> {
    /// A wallet talking to the public REST endpoints of both networks.
    pub fn connect(config: WalletConfig) -> Result<Self, WalletError> {
        let mut wallet = Wallet::new(config);
        for network in Network::ALL {
            let client = RestClient::new(RestConfig::for_network(network))
                .map_err(|e| WalletError::Network(e.into()))?;
            wallet = wallet.with_client(network, client);
        }
        Ok(wallet)
    }
}

impl<C: NetworkClient> Wallet<C> {
    pub fn new(config: WalletConfig) -> Self {
        let vault = PinVault::with_iterations(config.vault_iterations);
        Wallet {
            config,
            vault,
            clients: Vec::new(),
        }
    }

    /// Route ledger calls for `network` to `client`, replacing any previous one.
    pub fn with_client(mut self, network: Network, client: C) -> Self {
        self.clients.retain(|(n, _)| *n != network);
        self.clients.push((network, client));
        self
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// The ledger client serving `network`, if one is attached.
    pub fn client_for(&self, network: Network) -> Option<&C> {
        self.clients
            .iter()
            .find(|(n, _)| *n == network)
            .map(|(_, c)| c)
    }

    /// Generate a fresh wallet sealed under `pin`.
    ///
    /// # Returns
    /// The address, the 12-word phrase and the sealed key, or `Validation`
    /// for a PIN shorter than four characters.
    pub fn create(&self, pin: &str, network: Network) -> Result<CreateWalletResponse, WalletError> {
        validate_pin(pin)?;
        info!(%network, "creating wallet");

        let attempts = self.config.max_key_attempts.max(1);
        for attempt in 1..=attempts {
            let entropy = generate_entropy(DEFAULT_ENTROPY_LEN)?;
            let phrase = RecoveryPhrase::encode(&entropy)?;
            let seed = kdf::derive_seed_from_phrase(&phrase)?;
            let key_pair = match kdf::seed_to_keypair(&seed) {
                Ok(kp) => kp,
                Err(PrimitivesError::InvalidPrivateKey(_)) => {
                    debug!(attempt, "derived scalar rejected, drawing new entropy");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let (address, sealed) = self.seal(&key_pair, pin, network)?;
            info!(%address, "wallet created");
            return Ok(CreateWalletResponse {
                address: address.to_string(),
                mnemonic: phrase.phrase().as_str().to_owned(),
                encrypted_private_key: sealed.to_hex(),
            });
        }

        Err(WalletError::Cryptographic(format!(
            "no usable key after {} entropy draws",
            attempts
        )))
    }

    /// Restore a wallet from its recovery phrase.
    pub fn import_mnemonic(
        &self,
        mnemonic: &str,
        pin: &str,
        network: Network,
    ) -> Result<ImportWalletResponse, WalletError> {
        validate_pin(pin)?;
        let phrase: RecoveryPhrase = mnemonic.parse()?;
        info!(%network, "importing wallet from recovery phrase");

        let seed = kdf::derive_seed_from_phrase(&phrase)?;
        let key_pair = kdf::seed_to_keypair(&seed)?;
        self.import(&key_pair, pin, network)
    }

    /// Seal an existing 64-hex-character private key.
    pub fn import_private_key(
        &self,
        private_key_hex: &str,
        pin: &str,
        network: Network,
    ) -> Result<ImportWalletResponse, WalletError> {
        validate_pin(pin)?;
        let key_pair = kdf::import_private_key(private_key_hex)?;
        info!(%network, "importing wallet from private key");
        self.import(&key_pair, pin, network)
    }

    /// Unseal a stored key.
    ///
    /// # Returns
    /// The private key as hex, `Validation` for a blob that is not hex and
    /// `Authentication` for a wrong PIN or damaged blob.
    pub fn decrypt(
        &self,
        encrypted_private_key: &str,
        pin: &str,
    ) -> Result<DecryptResponse, WalletError> {
        let blob = EncryptedPrivateKey::from_hex(encrypted_private_key)?;
        let private_key_hex = self.vault.with_unsealed(&blob, pin, |key| hex::encode(key))?;
        Ok(DecryptResponse { private_key_hex })
    }

    /// Query the balance of `address`.
    ///
    /// A ledger failure is not propagated: the response carries a zero
    /// balance with `degraded` set.
    pub fn balance(&self, address: &str, network: Network) -> Result<BalanceResponse, WalletError> {
        let address = parse_address(address, network)?;
        let client = self.client(network)?;

        match client.get_balance(&address) {
            Ok(balance) => Ok(BalanceResponse {
                address: address.to_string(),
                balance,
                degraded: false,
            }),
            Err(e) => {
                warn!(%address, error = %e, "balance lookup failed, reporting zero");
                Ok(BalanceResponse {
                    address: address.to_string(),
                    balance: 0,
                    degraded: true,
                })
            }
        }
    }

    /// Transfer `amount` of `ticker` to `to_address`.
    ///
    /// # Arguments
    /// * `from_private_key` - Sender key as 64 hex characters.
    /// * `to_address` - Recipient address on `network`.
    /// * `amount` - Token amount, must be positive.
    /// * `ticker` - Token ticker.
    /// * `network` - Network both addresses belong to.
    /// * `priority_fee` - Extra sompi on top of the policy fee.
    pub fn transfer(
        &self,
        from_private_key: &str,
        to_address: &str,
        amount: u64,
        ticker: &str,
        network: Network,
        priority_fee: u64,
    ) -> Result<TransferResponse, WalletError> {
        let ticker = Ticker::new(ticker)?;
        let to = parse_address(to_address, network)?;
        if amount == 0 {
            return Err(WalletError::Validation(
                "transfer amount must be positive".to_string(),
            ));
        }
        let client = self.client(network)?;
        let key_pair = kdf::import_private_key(from_private_key)?;
        let from = Address::from_public_key(key_pair.public_key(), network);
        info!(%from, %to, amount, %ticker, "starting transfer");

        let utxos = client.get_utxos(&from)?;
        let unsigned = build_transfer(&utxos, &from, &to, amount, &ticker, priority_fee)?;
        debug!(
            inputs = unsigned.tx().inputs.len(),
            fee = unsigned.fee(),
            "transfer built"
        );
        let signed = sign(unsigned, key_pair.private_key())?;
        let tx_id = client.submit(&signed)?;
        info!(%tx_id, "transfer submitted");

        Ok(TransferResponse {
            transaction_id: tx_id.to_string(),
            from_address: from.to_string(),
            to_address: to.to_string(),
            amount,
            ticker: ticker.to_string(),
            network,
        })
    }

    /// Submit `iterations` mint transactions one after another.
    ///
    /// Input problems fail the whole call; per-iteration failures are
    /// recorded in the result.
    pub fn mint(
        &self,
        from_private_key: &str,
        ticker: &str,
        network: Network,
        priority_fee: u64,
        iterations: u32,
    ) -> Result<MintBatchResult, WalletError> {
        let ticker = Ticker::new(ticker)?;
        if iterations == 0 {
            return Err(WalletError::Validation(
                "iterations must be positive".to_string(),
            ));
        }
        calculate_fee(network, priority_fee)?;
        let client = self.client(network)?;
        let key_pair = kdf::import_private_key(from_private_key)?;
        let from = Address::from_public_key(key_pair.public_key(), network);

        let pacer = self.config.pacing.pacer();
        let mut batch = MintBatch::new(client, key_pair.private_key(), from, ticker, priority_fee);
        Ok(batch.run(iterations, pacer.as_ref()))
    }

    /// Fee of a token transaction with no priority fee.
    pub fn estimate_fee(&self, network: Network) -> Result<FeeEstimateResponse, WalletError> {
        Ok(FeeEstimateResponse {
            estimated_fee_sompi: calculate_fee(network, 0)?,
        })
    }

    fn import(
        &self,
        key_pair: &KeyPair,
        pin: &str,
        network: Network,
    ) -> Result<ImportWalletResponse, WalletError> {
        let (address, sealed) = self.seal(key_pair, pin, network)?;
        info!(%address, "wallet imported");
        Ok(ImportWalletResponse {
            address: address.to_string(),
            encrypted_private_key: sealed.to_hex(),
        })
    }

    fn seal(
        &self,
        key_pair: &KeyPair,
        pin: &str,
        network: Network,
    ) -> Result<(Address, EncryptedPrivateKey), WalletError> {
        let address = Address::from_public_key(key_pair.public_key(), network);
        let sealed = self.vault.seal(&key_pair.private_key().to_bytes(), pin)?;
        Ok((address, sealed))
    }

    fn client(&self, network: Network) -> Result<&C, WalletError> {
        self.client_for(network).ok_or_else(|| {
            WalletError::Validation(format!("no ledger client configured for {}", network))
        })
    }
}

fn validate_pin(pin: &str) -> Result<(), WalletError> {
    if pin.chars().count() < MIN_PIN_LEN {
        return Err(WalletError::Validation(format!(
            "PIN must be at least {} characters",
            MIN_PIN_LEN
        )));
    }
    Ok(())
}

fn parse_address(s: &str, network: Network) -> Result<Address, WalletError> {
    let address = Address::from_string(s)?;
    if address.network() != network {
        return Err(WalletError::Validation(format!(
            "address {} is not a {} address",
            s, network
        )));
    }
    Ok(address)
}
