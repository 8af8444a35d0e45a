//! Hathor SDK - UTXO selection and transaction signing.
//!
//! Pure selection algorithms over `Utxo` records and the glue that
//! turns a private key plus a transaction's bytes to sign into the
//! unlocking data of an input.

pub mod sign;
pub mod utxo;

mod error;
pub use error::WalletError;
pub use sign::{create_input_data, sign_input, sign_transaction};
pub use utxo::{best_utxo_selection, fast_utxo_selection, Utxo, UtxoSelection};
