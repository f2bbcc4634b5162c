/// KRC wallet SDK - Script construction and address handling.
///
/// Provides the Script type, the opcodes the wallet emits, push-data chunk
/// parsing and the `<prefix>:<Base58Check>` address codec.

pub mod script;
pub mod opcodes;
pub mod chunk;
pub mod address;

mod error;
pub use error::ScriptError;
pub use script::Script;
pub use address::{Address, AddressParts, Network};
pub use chunk::ScriptChunk;
