/// Error types for wallet operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// Selected UTXOs cannot cover the requested amount.
    #[error("insufficient funds: {available} available, {requested} requested")]
    InsufficientFunds {
        /// Total value of the spendable UTXOs.
        available: i64,
        /// Amount asked for.
        requested: i64,
    },

    /// An input index does not exist on the transaction.
    #[error("no input at index {0}")]
    InputNotFound(usize),

    /// An underlying transaction error.
    #[error("transaction error: {0}")]
    Transaction(#[from] hathor_transaction::TransactionError),

    /// An underlying script or address error.
    #[error("script error: {0}")]
    Script(#[from] hathor_script::ScriptError),

    /// An underlying primitives error (codec or EC).
    #[error("primitives error: {0}")]
    Primitives(#[from] hathor_primitives::PrimitivesError),
}
