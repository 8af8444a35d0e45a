//! Hathor SDK - Fullnode HTTP API client.
//!
//! Provides `NodeClient` for fetching transactions, network version
//! constants, and pushing signed transactions to a fullnode. Also
//! implements the transaction provider used by swap proposal
//! validation.

pub mod client;
pub mod types;

mod error;
pub use client::NodeClient;
pub use error::ApiError;
pub use types::{
    ApiOutput, ApiToken, ApiTransaction, DecodedScript, NodeConfig, PushTxResponse,
    TransactionResponse, VersionResponse,
};

#[cfg(test)]
mod tests;
