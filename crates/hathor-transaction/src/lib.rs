//! Hathor SDK - Transaction building, hashing, and serialization.
//!
//! Provides the `Transaction` family (base transaction, token creation,
//! nano contract, on-chain blueprint), their `Input`/`Output` models,
//! the pluggable header mechanism, and byte-exact wire
//! encoding/decoding with the two-stage transaction hash.

pub mod constants;
pub mod input;
pub mod output;
pub mod transaction;
pub mod create_token;
pub mod nano;
pub mod blueprint;
pub mod headers;
pub mod weight;

mod error;
pub use error::TransactionError;
pub use input::Input;
pub use output::Output;
pub use transaction::{tx_from_bytes, Transaction, TxVariant};
pub use create_token::CreateTokenTransaction;
pub use nano::NanoContract;
pub use blueprint::OnChainBlueprint;
pub use headers::{Header, NanoContractHeader};
pub use weight::WeightConstants;

#[cfg(test)]
mod tests;
