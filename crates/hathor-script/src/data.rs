//! Data (NFT) output script model.
//!
//! Script layout: `pushdata(utf8 bytes) OP_CHECKSIG`.  Used for NFT
//! metadata outputs; any script that is neither P2PKH nor P2SH is
//! classified as a data script by the parser.

use crate::opcodes::{get_push_data, push_data, OP_CHECKSIG};
use crate::ScriptError;

/// A data script carrying an arbitrary UTF-8 payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptData {
    /// The UTF-8 payload.
    pub data: String,
}

impl ScriptData {
    /// Create a new data script model.
    pub fn new(data: impl Into<String>) -> Self {
        ScriptData { data: data.into() }
    }

    /// Compile the script to bytes.
    pub fn create_script(&self) -> Result<Vec<u8>, ScriptError> {
        let mut script = push_data(self.data.as_bytes())?;
        script.push(OP_CHECKSIG);
        Ok(script)
    }

    /// Reconstruct the model from raw script bytes.
    ///
    /// # Arguments
    /// * `script` - Raw bytes: a single push followed by OP_CHECKSIG.
    ///
    /// # Returns
    /// The decoded model, or `ParseScript` if the shape does not match.
    pub fn parse(script: &[u8]) -> Result<Self, ScriptError> {
        let (payload, rest) = get_push_data(script)?;
        if rest != [OP_CHECKSIG] {
            return Err(ScriptError::ParseScript(
                "data script must end with OP_CHECKSIG".into(),
            ));
        }
        let data = std::str::from_utf8(payload).map_err(|_| ScriptError::InvalidUtf8)?;
        Ok(ScriptData::new(data))
    }
}
