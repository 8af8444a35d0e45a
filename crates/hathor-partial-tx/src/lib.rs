//! Hathor SDK - Atomic swap proposals.
//!
//! A `PartialTx` is a transaction being negotiated by several parties:
//! each adds inputs and outputs, the proposal travels between them as a
//! text string, and once token balances close it becomes a regular
//! transaction. `PartialTxInputData` collects the signatures in the
//! same fashion.

pub mod input_data;
pub mod partial_tx;

mod error;
pub use error::PartialTxError;
pub use input_data::PartialTxInputData;
pub use partial_tx::{
    PartialTx, ProposalInput, ProposalOutput, TokenBalance, TxOutputView, TxProvider, TxView,
};
