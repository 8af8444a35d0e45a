#![deny(missing_docs)]

//! Hathor SDK - Complete SDK.
//!
//! Re-exports all Hathor SDK components for convenient single-crate usage.

pub use hathor_api as api;
pub use hathor_partial_tx as partial_tx;
pub use hathor_primitives as primitives;
pub use hathor_script as script;
pub use hathor_transaction as transaction;
pub use hathor_wallet as wallet;
