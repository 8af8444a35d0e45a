//! Hathor SDK - Output script models, addresses, and networks.
//!
//! Provides the `Network` version-byte table, Base58Check `Address`
//! handling, the P2PKH / P2SH / data script models with structural
//! classifiers, and the generic `parse_script` dispatcher.

pub mod opcodes;
pub mod network;
pub mod address;
pub mod p2pkh;
pub mod p2sh;
pub mod data;
pub mod parser;

mod error;
pub use error::ScriptError;
pub use network::Network;
pub use address::{Address, AddressType};
pub use p2pkh::P2pkh;
pub use p2sh::P2sh;
pub use data::ScriptData;
pub use parser::{parse_script, ParsedScript};
