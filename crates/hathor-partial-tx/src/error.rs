/// Error types for swap proposal operations.
#[derive(Debug, thiserror::Error)]
pub enum PartialTxError {
    /// An input or output index does not exist.
    #[error("index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// A proposal was compiled for signing before balances closed.
    #[error("proposal token balances do not close")]
    Incomplete,

    /// A serialized proposal string is malformed.
    #[error("invalid proposal: {0}")]
    Syntax(String),

    /// An output script does not match any template with an address.
    #[error("unsupported output script")]
    UnsupportedScript,

    /// The transaction provider failed to fetch a spent transaction.
    #[error("provider error: {0}")]
    Provider(String),

    /// An underlying transaction error.
    #[error("transaction error: {0}")]
    Transaction(#[from] hathor_transaction::TransactionError),

    /// An underlying script or address error.
    #[error("script error: {0}")]
    Script(#[from] hathor_script::ScriptError),

    /// An underlying primitives error.
    #[error("primitives error: {0}")]
    Primitives(#[from] hathor_primitives::PrimitivesError),
}
