/// Error types for script and address operations.
///
/// Covers Base58Check address validation, script construction, and the
/// structural classification of raw output scripts.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Base58 decoding failed.
    #[error("invalid address: bad base58 for '{0}'")]
    InvalidAddress(String),

    /// Decoded address is not exactly 25 bytes.
    #[error("invalid address length: expected 25 bytes, got {0}")]
    InvalidAddressLength(usize),

    /// Base58Check checksum does not match.
    #[error("invalid address: checksum mismatch (expected {expected}, got {got})")]
    ChecksumFailed {
        /// Checksum computed from the payload, hex-encoded.
        expected: String,
        /// Checksum present in the decoded address, hex-encoded.
        got: String,
    },

    /// Address version byte does not match the network.
    #[error(
        "invalid address version byte: got {got:#04x}, expected {p2pkh:#04x} (p2pkh) \
         or {p2sh:#04x} (p2sh)"
    )]
    InvalidVersionByte {
        /// The version byte found in the address.
        got: u8,
        /// The network's P2PKH version byte.
        p2pkh: u8,
        /// The network's P2SH version byte.
        p2sh: u8,
    },

    /// A raw script did not match any known structural pattern.
    #[error("could not parse script: {0}")]
    ParseScript(String),

    /// Script data is not valid UTF-8.
    #[error("script data is not valid utf-8")]
    InvalidUtf8,

    /// Invalid hex string.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Error from the primitives crate.
    #[error("primitives error: {0}")]
    Primitives(#[from] hathor_primitives::PrimitivesError),
}

impl From<hex::FromHexError> for ScriptError {
    fn from(e: hex::FromHexError) -> Self {
        ScriptError::InvalidHex(e.to_string())
    }
}
