//! Collection of per-input signatures for a swap proposal.
//!
//! Each participant signs their own inputs and exchanges the results
//! as a text string:
//!
//! ```text
//! PartialTxInputData|<sighash digest hex>|<index>:<data hex>|...
//! ```
//!
//! The digest ties the signatures to one exact proposal; merging blobs
//! signed over a different digest is rejected.

use std::collections::BTreeMap;

use crate::PartialTxError;

/// Prefix of the signature exchange text format.
const SERIALIZATION_PREFIX: &str = "PartialTxInputData";

/// Signatures collected for a proposal, keyed by input index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialTxInputData {
    /// Hex digest of the proposal's bytes to sign.
    pub hash: String,
    /// Number of inputs the final transaction will have.
    pub inputs_len: usize,
    /// Unlocking data per input index.
    pub data: BTreeMap<usize, Vec<u8>>,
}

impl PartialTxInputData {
    /// Create an empty signature collection.
    ///
    /// # Arguments
    /// * `hash` - Hex digest of the proposal's bytes to sign.
    /// * `inputs_len` - Number of inputs in the proposal.
    pub fn new(hash: impl Into<String>, inputs_len: usize) -> Self {
        PartialTxInputData {
            hash: hash.into(),
            inputs_len,
            data: BTreeMap::new(),
        }
    }

    /// Record the unlocking data for one input.
    ///
    /// # Arguments
    /// * `index` - Input index, must be below the declared input count.
    /// * `data` - The unlocking data (signature and public key pushes).
    pub fn add_data(&mut self, index: usize, data: Vec<u8>) -> Result<(), PartialTxError> {
        if index >= self.inputs_len {
            return Err(PartialTxError::IndexOutOfBounds(index));
        }
        self.data.insert(index, data);
        Ok(())
    }

    /// Whether every input has its unlocking data.
    pub fn is_complete(&self) -> bool {
        self.data.len() == self.inputs_len
    }

    /// Serialize to the text exchange form.
    pub fn serialize(&self) -> String {
        let mut parts = vec![SERIALIZATION_PREFIX.to_string(), self.hash.clone()];
        for (index, data) in &self.data {
            parts.push(format!("{index}:{}", hex::encode(data)));
        }
        parts.join("|")
    }

    /// Merge entries from another participant's serialized blob.
    ///
    /// The prefix and digest must match this collection. A blob with
    /// no entries is a valid no-op, covering participants who had
    /// nothing to sign.
    pub fn add_signatures(&mut self, serialized: &str) -> Result<(), PartialTxError> {
        let parts: Vec<&str> = serialized.split('|').collect();
        if parts.len() < 2 || parts[0] != SERIALIZATION_PREFIX {
            return Err(PartialTxError::Syntax(format!(
                "expected a {SERIALIZATION_PREFIX} payload"
            )));
        }
        if parts[1] != self.hash {
            return Err(PartialTxError::Syntax(
                "signature payload is for a different proposal".to_string(),
            ));
        }
        for entry in &parts[2..] {
            let (index, data_hex) = entry.split_once(':').ok_or_else(|| {
                PartialTxError::Syntax(format!("malformed signature entry: {entry}"))
            })?;
            let index: usize = index
                .parse()
                .map_err(|e| PartialTxError::Syntax(format!("invalid input index: {e}")))?;
            let data = hex::decode(data_hex)
                .map_err(|e| PartialTxError::Syntax(format!("invalid signature hex: {e}")))?;
            self.add_data(index, data)?;
        }
        Ok(())
    }
}
