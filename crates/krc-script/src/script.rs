/// Script type - a sequence of opcodes and data pushes.
///
/// The wallet builds three shapes: pay-to-public-key-hash locking scripts,
/// `<sig> <pubkey>` unlocking scripts, and `OP_RETURN <push>...` data scripts
/// carrying token instructions.

use std::fmt;

use crate::chunk::{decode_script, push_data_prefix, ScriptChunk};
use crate::opcodes::*;
use crate::ScriptError;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Script(Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Script(Vec::new())
    }

    /// Create a script from a hex string such as `"76a914...88ac"`.
    pub fn from_hex(hex_str: &str) -> Result<Self, ScriptError> {
        Ok(Script(hex::decode(hex_str)?))
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Script(bytes.to_vec())
    }

    /// Build `OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG`.
    ///
    /// # Arguments
    /// * `pubkey_hash` - The owner's 20-byte Hash160.
    pub fn p2pkh(pubkey_hash: &[u8; 20]) -> Self {
        let mut b = Vec::with_capacity(25);
        b.extend_from_slice(&[OP_DUP, OP_HASH160, OP_DATA_20]);
        b.extend_from_slice(pubkey_hash);
        b.extend_from_slice(&[OP_EQUALVERIFY, OP_CHECKSIG]);
        Script(b)
    }

    /// Build `OP_RETURN <part>...` with one minimal push per part.
    ///
    /// # Returns
    /// The data script, or `DataTooBig` if a part exceeds push limits.
    pub fn data(parts: &[&[u8]]) -> Result<Self, ScriptError> {
        let mut script = Script(vec![OP_RETURN]);
        for part in parts {
            script.append_push_data(part)?;
        }
        Ok(script)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn to_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check for the 25-byte pay-to-public-key-hash pattern.
    pub fn is_p2pkh(&self) -> bool {
        let b = &self.0;
        b.len() == 25
            && b[0] == OP_DUP
            && b[1] == OP_HASH160
            && b[2] == OP_DATA_20
            && b[23] == OP_EQUALVERIFY
            && b[24] == OP_CHECKSIG
    }

    /// Check whether this is a data-carrying (`OP_RETURN`) script.
    pub fn is_data(&self) -> bool {
        let b = &self.0;
        (!b.is_empty() && b[0] == OP_RETURN)
            || (b.len() > 1 && b[0] == OP_FALSE && b[1] == OP_RETURN)
    }

    /// Extract the 20-byte hash from a P2PKH script.
    ///
    /// # Returns
    /// The public key hash, or `NotP2PKH` for any other script shape.
    pub fn public_key_hash(&self) -> Result<[u8; 20], ScriptError> {
        if !self.is_p2pkh() {
            return Err(ScriptError::NotP2PKH);
        }
        let mut out = [0u8; 20];
        out.copy_from_slice(&self.0[3..23]);
        Ok(out)
    }

    pub fn chunks(&self) -> Result<Vec<ScriptChunk>, ScriptError> {
        decode_script(&self.0)
    }

    /// The pushed payloads that follow `OP_RETURN` in a data script.
    ///
    /// # Returns
    /// The payloads in order, or `InvalidScript` if this is not a data script.
    pub fn data_pushes(&self) -> Result<Vec<Vec<u8>>, ScriptError> {
        if !self.is_data() {
            return Err(ScriptError::InvalidScript("not a data script".to_string()));
        }
        Ok(self
            .chunks()?
            .into_iter()
            .filter_map(|c| c.data)
            .collect())
    }

    /// Append `data` with its minimal push prefix.
    pub fn append_push_data(&mut self, data: &[u8]) -> Result<(), ScriptError> {
        let prefix = push_data_prefix(data.len())?;
        self.0.extend_from_slice(&prefix);
        self.0.extend_from_slice(data);
        Ok(())
    }

    /// Append raw opcodes.
    ///
    /// # Returns
    /// `InvalidOpcodeType` if any byte is a push-data opcode; use
    /// [`append_push_data`](Self::append_push_data) for those.
    pub fn append_opcodes(&mut self, opcodes: &[u8]) -> Result<(), ScriptError> {
        if let Some(&op) = opcodes.iter().find(|op| is_push_data(**op)) {
            return Err(ScriptError::InvalidOpcodeType(
                opcode_to_string(op).to_string(),
            ));
        }
        self.0.extend_from_slice(opcodes);
        Ok(())
    }
}

impl Default for Script {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", self.to_hex())
    }
}

impl serde::Serialize for Script {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Script {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Script::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
