//! Extension headers appended after the graph fields.
//!
//! Each header starts with a one-byte type id. Headers are read back
//! to back until only the nonce remains in the buffer.

pub mod nano;

use hathor_primitives::{ByteReader, ByteWriter};

use crate::TransactionError;

pub use nano::{NanoContractAction, NanoContractActionKind, NanoContractHeader};

/// Type id of the nano contract header.
pub const NANO_HEADER_ID: u8 = 0x10;

/// A parsed extension header.
#[derive(Clone, Debug, PartialEq)]
pub enum Header {
    /// Nano contract method call.
    NanoContract(NanoContractHeader),
}

impl Header {
    /// Serialize this header, including its type id byte.
    pub fn serialize(&self, writer: &mut ByteWriter) -> Result<(), TransactionError> {
        match self {
            Header::NanoContract(h) => h.serialize(writer, true),
        }
    }

    /// Serialize the portion of this header that is covered by
    /// signatures.
    pub fn serialize_sighash(&self, writer: &mut ByteWriter) -> Result<(), TransactionError> {
        match self {
            Header::NanoContract(h) => h.serialize(writer, false),
        }
    }

    /// Deserialize a header from a reader, dispatching on the type id.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let header_id = reader.read_u8()?;
        match header_id {
            NANO_HEADER_ID => Ok(Header::NanoContract(NanoContractHeader::read_from(reader)?)),
            other => Err(TransactionError::Parse(format!(
                "unknown header id {other:#04x}"
            ))),
        }
    }
}
