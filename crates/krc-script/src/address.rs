/// Network-prefixed address handling.
///
/// Addresses render as `<prefix>:<Base58Check(version || hash160)>` where the
/// prefix names the network (`kaspa` or `kaspatest`) and the version byte
/// names the script type. Only pay-to-public-key-hash (`0x00`) is supported.

use std::fmt;
use std::str::FromStr;

use krc_primitives::base58;
use krc_primitives::ec::PublicKey;
use krc_primitives::PrimitivesError;

use crate::{Script, ScriptError};

/// Version byte for pay-to-public-key-hash addresses.
pub const P2PKH_VERSION: u8 = 0x00;

const MAINNET_PREFIX: &str = "kaspa";
const TESTNET_PREFIX: &str = "kaspatest";

/// The ledger network an address or operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Mainnet, Network::Testnet];

    /// The name used in configuration and API calls.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }

    /// The human-readable address prefix.
    pub fn address_prefix(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_PREFIX,
            Network::Testnet => TESTNET_PREFIX,
        }
    }

    pub fn from_address_prefix(prefix: &str) -> Option<Network> {
        Network::ALL
            .into_iter()
            .find(|n| n.address_prefix() == prefix)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ScriptError;

    /// Accepts exactly `"mainnet"` or `"testnet"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(ScriptError::UnknownNetwork(other.to_string())),
        }
    }
}

/// The decoded components of an address string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressParts {
    pub prefix: String,
    pub version: u8,
    pub hash160: [u8; 20],
}

/// A pay-to-public-key-hash address on a specific network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    network: Network,
    version: u8,
    hash160: [u8; 20],
}

impl Address {
    /// Derive the address of a public key.
    ///
    /// # Arguments
    /// * `pub_key` - The owner's public key; its compressed form is hashed.
    /// * `network` - Selects the prefix.
    pub fn from_public_key(pub_key: &PublicKey, network: Network) -> Self {
        Self::from_public_key_hash(&pub_key.hash160(), network)
    }

    pub fn from_public_key_hash(hash: &[u8; 20], network: Network) -> Self {
        Address {
            network,
            version: P2PKH_VERSION,
            hash160: *hash,
        }
    }

    /// Parse and validate an address string.
    ///
    /// # Returns
    /// The address, or an error for an unknown prefix, bad Base58, wrong
    /// payload length, checksum mismatch or unsupported version.
    pub fn from_string(addr: &str) -> Result<Self, ScriptError> {
        let parts = address_to_parts(addr)?;
        let network = Network::from_address_prefix(&parts.prefix)
            .ok_or_else(|| ScriptError::UnknownPrefix(parts.prefix.clone()))?;
        Ok(Address {
            network,
            version: parts.version,
            hash160: parts.hash160,
        })
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn hash160(&self) -> &[u8; 20] {
        &self.hash160
    }

    /// The P2PKH locking script paying this address.
    pub fn locking_script(&self) -> Script {
        Script::p2pkh(&self.hash160)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut payload = Vec::with_capacity(21);
        payload.push(self.version);
        payload.extend_from_slice(&self.hash160);
        write!(
            f,
            "{}:{}",
            self.network.address_prefix(),
            base58::check_encode(&payload)
        )
    }
}

impl FromStr for Address {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_string(s)
    }
}

impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_string(&s).map_err(serde::de::Error::custom)
    }
}

/// Split an address into prefix, version byte and hash.
///
/// # Returns
/// The parts, or an error if the prefix is unknown, the Base58Check body is
/// malformed or fails its checksum, the payload is not 21 bytes, or the
/// version is not pay-to-public-key-hash.
pub fn address_to_parts(addr: &str) -> Result<AddressParts, ScriptError> {
    let (prefix, body) = addr
        .split_once(':')
        .ok_or_else(|| ScriptError::InvalidAddress(format!("missing prefix in '{}'", addr)))?;
    if Network::from_address_prefix(prefix).is_none() {
        return Err(ScriptError::UnknownPrefix(prefix.to_string()));
    }

    let payload = base58::check_decode(body).map_err(|e| match e {
        PrimitivesError::ChecksumMismatch => ScriptError::ChecksumMismatch,
        other => ScriptError::InvalidAddress(other.to_string()),
    })?;
    if payload.len() != 21 {
        return Err(ScriptError::InvalidAddressLength(payload.len()));
    }
    if payload[0] != P2PKH_VERSION {
        return Err(ScriptError::UnsupportedVersion(payload[0]));
    }

    let mut hash160 = [0u8; 20];
    hash160.copy_from_slice(&payload[1..]);
    Ok(AddressParts {
        prefix: prefix.to_string(),
        version: payload[0],
        hash160,
    })
}
