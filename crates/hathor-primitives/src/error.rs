/// Unified error type for all primitives operations.
///
/// Covers errors from hashing, EC operations, byte encoding, and the
/// output-value codec.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("uncompressed public key: expected 33-byte compressed SEC1 encoding")]
    UncompressedPublicKey,

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("value {value} does not fit in {width} bytes")]
    ValueOutOfRange {
        /// The value that failed to encode.
        value: i128,
        /// The requested encoding width in bytes.
        width: usize,
    },

    #[error("unsupported byte width: {0}")]
    InvalidWidth(usize),

    #[error("invalid output value: {0} (must be positive)")]
    InvalidOutputValue(i64),

    #[error("unexpected end of data")]
    UnexpectedEof,
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
