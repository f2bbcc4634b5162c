/// Error types for script and address operations.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("invalid script: {0}")]
    InvalidScript(String),

    /// Attempted to append a push-data opcode without its payload.
    #[error("use append_push_data for push data opcodes: {0}")]
    InvalidOpcodeType(String),

    #[error("hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("not a P2PKH script")]
    NotP2PKH,

    /// Not enough bytes left in the script to complete a push.
    #[error("not enough data")]
    DataTooSmall,

    #[error("data too big")]
    DataTooBig,

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("unknown network '{0}'")]
    UnknownNetwork(String),

    #[error("unknown address prefix '{0}'")]
    UnknownPrefix(String),

    #[error("invalid address payload length: expected 21 bytes, got {0}")]
    InvalidAddressLength(usize),

    #[error("unsupported address version {0:#04x}")]
    UnsupportedVersion(u8),

    #[error("address checksum mismatch")]
    ChecksumMismatch,

    #[error("primitives error: {0}")]
    Primitives(#[from] krc_primitives::PrimitivesError),
}
