//! Transaction input referencing a previous output.
//!
//! # Wire format
//!
//! | Field       | Size            |
//! |-------------|-----------------|
//! | tx hash     | 32 bytes        |
//! | index       | 1 byte          |
//! | data length | 2 bytes (BE)    |
//! | data        | variable        |
//!
//! When serialized for signing, the data length is written as zero no
//! matter what `data` holds, which makes the signed digest independent
//! of any signatures already collected.

use hathor_primitives::{ByteReader, ByteWriter};

use crate::constants::TX_HASH_SIZE;
use crate::TransactionError;

/// A single input, spending output `index` of transaction `hash`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Input {
    /// Hex id of the transaction whose output is being spent.
    pub hash: String,
    /// Position of the spent output (0-255).
    pub index: u8,
    /// Unlocking data (signature + public key). `None` until signed.
    pub data: Option<Vec<u8>>,
}

impl Input {
    /// Create a new unsigned input.
    ///
    /// # Arguments
    /// * `hash` - Hex id of the spent transaction.
    /// * `index` - Position of the spent output.
    pub fn new(hash: impl Into<String>, index: u8) -> Self {
        Input {
            hash: hash.into(),
            index,
            data: None,
        }
    }

    /// Set the unlocking data.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = Some(data);
    }

    /// Clear the unlocking data.
    pub fn clear_data(&mut self) {
        self.data = None;
    }

    /// Serialize this input into a writer.
    ///
    /// # Arguments
    /// * `writer` - The writer to append wire bytes to.
    /// * `add_data` - When `false` the data length is written as zero,
    ///   regardless of whether `data` is set.
    pub fn serialize(&self, writer: &mut ByteWriter, add_data: bool) -> Result<(), TransactionError> {
        let hash_bytes = hex::decode(&self.hash)
            .map_err(|e| TransactionError::Parse(format!("invalid input hash hex: {e}")))?;
        if hash_bytes.len() != TX_HASH_SIZE {
            return Err(TransactionError::Parse(format!(
                "input hash must be {} bytes, got {}",
                TX_HASH_SIZE,
                hash_bytes.len()
            )));
        }
        writer.write_bytes(&hash_bytes);
        writer.write_u8(self.index);
        match (&self.data, add_data) {
            (Some(data), true) => {
                writer.write_u16_be(data.len() as u16);
                writer.write_bytes(data);
            }
            _ => writer.write_u16_be(0),
        }
        Ok(())
    }

    /// Deserialize an input from a reader.
    ///
    /// # Arguments
    /// * `reader` - The reader positioned at the start of an encoded input.
    ///
    /// # Returns
    /// The decoded input, or a parse error if the buffer is truncated.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let hash = reader.read_hex(TX_HASH_SIZE)?;
        let index = reader.read_u8()?;
        let data_len = reader.read_u16_be()? as usize;
        let data = if data_len > 0 {
            Some(reader.read_bytes(data_len)?.to_vec())
        } else {
            None
        };
        Ok(Input { hash, index, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0101010101010101010101010101010101010101010101010101010101010101";

    #[test]
    fn test_serialize_with_data() {
        let mut input = Input::new(HASH, 2);
        input.set_data(vec![0xde, 0xad]);
        let mut w = ByteWriter::new();
        input.serialize(&mut w, true).unwrap();
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), 32 + 1 + 2 + 2);
        assert_eq!(&bytes[33..35], &[0x00, 0x02]);

        let mut reader = ByteReader::new(&bytes);
        let decoded = Input::read_from(&mut reader).unwrap();
        assert_eq!(decoded, input);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_serialize_without_data_writes_zero_length() {
        let mut input = Input::new(HASH, 0);
        input.set_data(vec![1, 2, 3]);
        let mut w = ByteWriter::new();
        input.serialize(&mut w, false).unwrap();
        let bytes = w.into_bytes();
        assert_eq!(bytes.len(), 35);
        assert_eq!(&bytes[33..35], &[0x00, 0x00]);
    }

    #[test]
    fn test_bad_hash_rejected() {
        let input = Input::new("zz", 0);
        let mut w = ByteWriter::new();
        assert!(input.serialize(&mut w, true).is_err());

        let short = Input::new("0102", 0);
        let mut w = ByteWriter::new();
        assert!(short.serialize(&mut w, true).is_err());
    }

    #[test]
    fn test_truncated_input() {
        let mut reader = ByteReader::new(&[0u8; 20]);
        assert!(Input::read_from(&mut reader).is_err());
    }
}
