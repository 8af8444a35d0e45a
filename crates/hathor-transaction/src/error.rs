/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Malformed bytes encountered during deserialization.
    #[error("parse error: {0}")]
    Parse(String),

    /// The version byte does not identify a known transaction kind.
    #[error("unsupported transaction version: {0}")]
    UnsupportedVersion(u8),

    /// Too many inputs.
    #[error("maximum number of inputs exceeded: {0} > {max}", max = crate::constants::MAX_INPUTS)]
    MaximumInputs(usize),

    /// Too many outputs.
    #[error("maximum number of outputs exceeded: {0} > {max}", max = crate::constants::MAX_OUTPUTS)]
    MaximumOutputs(usize),

    /// Too many parents.
    #[error("maximum number of parents exceeded: {0} > {max}", max = crate::constants::MAX_PARENTS)]
    MaximumParents(usize),

    /// An output script exceeds the maximum length.
    #[error("script too long: {0} bytes")]
    ScriptTooLong(usize),

    /// Token name or symbol fails the protocol limits.
    #[error("invalid token info: {0}")]
    InvalidTokenInfo(String),

    /// Nano header requested on a transaction that has none.
    #[error("transaction has no nano contract header")]
    NanoHeaderNotFound,

    /// Weight calculation requested without the network constants.
    #[error("weight constants not set")]
    ConstantNotSet,

    /// An underlying script or address error.
    #[error("script error: {0}")]
    Script(#[from] hathor_script::ScriptError),

    /// An underlying primitives error (codec, output value, EC).
    #[error("primitives error: {0}")]
    Primitives(#[from] hathor_primitives::PrimitivesError),
}
