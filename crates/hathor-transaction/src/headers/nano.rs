//! Nano contract header: a method call on a contract, with the token
//! actions it performs.
//!
//! # Wire format (after the 0x10 type id)
//!
//! | Field          | Size           |
//! |----------------|----------------|
//! | contract id    | 32 bytes       |
//! | seqnum         | 8 bytes (BE)   |
//! | method length  | 1 byte         |
//! | method         | variable       |
//! | args length    | 2 bytes (BE)   |
//! | args           | variable       |
//! | action count   | 1 byte         |
//! | actions        | variable       |
//! | caller address | 25 bytes       |
//! | script length  | 2 bytes (BE)   |
//! | script         | variable       |
//!
//! The sighash form stops after the caller address: the script and
//! its length byte are not signed.

use hathor_primitives::{ByteReader, ByteWriter};

use crate::constants::TX_HASH_SIZE;
use crate::TransactionError;

/// Length of a raw (decoded) address.
const ADDRESS_LEN: usize = 25;

/// What a nano contract action does with tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NanoContractActionKind {
    /// Move tokens from the caller into the contract.
    Deposit,
    /// Move tokens from the contract to the caller.
    Withdrawal,
    /// Give the contract an authority held by the caller.
    GrantAuthority,
    /// Take an authority held by the contract.
    AcquireAuthority,
}

impl NanoContractActionKind {
    /// Wire value of this kind.
    pub fn as_byte(self) -> u8 {
        match self {
            NanoContractActionKind::Deposit => 1,
            NanoContractActionKind::Withdrawal => 2,
            NanoContractActionKind::GrantAuthority => 3,
            NanoContractActionKind::AcquireAuthority => 4,
        }
    }

    /// Decode a wire value.
    pub fn from_byte(byte: u8) -> Result<Self, TransactionError> {
        match byte {
            1 => Ok(NanoContractActionKind::Deposit),
            2 => Ok(NanoContractActionKind::Withdrawal),
            3 => Ok(NanoContractActionKind::GrantAuthority),
            4 => Ok(NanoContractActionKind::AcquireAuthority),
            other => Err(TransactionError::Parse(format!(
                "unknown nano contract action kind {other}"
            ))),
        }
    }
}

/// A single token action performed by the contract call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NanoContractAction {
    /// What the action does.
    pub kind: NanoContractActionKind,
    /// Index into the transaction's token list (0 is HTR).
    pub token_index: u8,
    /// Amount moved, or the authority mask for authority actions.
    pub amount: i64,
}

impl NanoContractAction {
    fn serialize(&self, writer: &mut ByteWriter) -> Result<(), TransactionError> {
        writer.write_u8(self.kind.as_byte());
        writer.write_u8(self.token_index);
        writer.write_output_value(self.amount)?;
        Ok(())
    }

    fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let kind = NanoContractActionKind::from_byte(reader.read_u8()?)?;
        let token_index = reader.read_u8()?;
        let amount = reader.read_output_value()?;
        Ok(NanoContractAction {
            kind,
            token_index,
            amount,
        })
    }
}

/// A nano contract method call carried by a transaction.
#[derive(Clone, Debug, PartialEq)]
pub struct NanoContractHeader {
    /// Hex id of the contract being called, or of the blueprint when
    /// the call is `initialize`.
    pub id: String,
    /// Caller sequence number, preventing replays.
    pub seqnum: u64,
    /// Method name.
    pub method: String,
    /// Serialized method arguments.
    pub args: Vec<u8>,
    /// Token actions performed by the call.
    pub actions: Vec<NanoContractAction>,
    /// Raw 25-byte caller address.
    pub address: Vec<u8>,
    /// Unlocking script proving the caller owns the address. Not
    /// covered by signatures.
    pub script: Vec<u8>,
}

impl NanoContractHeader {
    /// Serialize this header.
    ///
    /// # Arguments
    /// * `writer` - The writer to append wire bytes to.
    /// * `add_script` - When `false` the script and its length are
    ///   omitted, producing the sighash form. The type id byte is
    ///   written in both forms.
    pub fn serialize(&self, writer: &mut ByteWriter, add_script: bool) -> Result<(), TransactionError> {
        writer.write_u8(super::NANO_HEADER_ID);
        let id_bytes = hex::decode(&self.id)
            .map_err(|e| TransactionError::Parse(format!("invalid contract id hex: {e}")))?;
        if id_bytes.len() != TX_HASH_SIZE {
            return Err(TransactionError::Parse(format!(
                "contract id must be {} bytes, got {}",
                TX_HASH_SIZE,
                id_bytes.len()
            )));
        }
        writer.write_bytes(&id_bytes);
        writer.write_u64_be(self.seqnum);
        writer.write_u8(self.method.len() as u8);
        writer.write_bytes(self.method.as_bytes());
        writer.write_u16_be(self.args.len() as u16);
        writer.write_bytes(&self.args);
        writer.write_u8(self.actions.len() as u8);
        for action in &self.actions {
            action.serialize(writer)?;
        }
        if self.address.len() != ADDRESS_LEN {
            return Err(TransactionError::Parse(format!(
                "caller address must be {} bytes, got {}",
                ADDRESS_LEN,
                self.address.len()
            )));
        }
        writer.write_bytes(&self.address);
        if add_script {
            writer.write_u16_be(self.script.len() as u16);
            writer.write_bytes(&self.script);
        }
        Ok(())
    }

    /// Deserialize a header body. The type id byte has already been
    /// consumed by the dispatcher.
    pub fn read_from(reader: &mut ByteReader) -> Result<Self, TransactionError> {
        let id = reader.read_hex(TX_HASH_SIZE)?;
        let seqnum = reader.read_u64_be()?;
        let method_len = reader.read_u8()? as usize;
        let method = String::from_utf8(reader.read_bytes(method_len)?.to_vec())
            .map_err(|_| TransactionError::Parse("method name is not valid utf-8".to_string()))?;
        let args_len = reader.read_u16_be()? as usize;
        let args = reader.read_bytes(args_len)?.to_vec();
        let action_count = reader.read_u8()? as usize;
        let mut actions = Vec::with_capacity(action_count);
        for _ in 0..action_count {
            actions.push(NanoContractAction::read_from(reader)?);
        }
        let address = reader.read_bytes(ADDRESS_LEN)?.to_vec();
        let script_len = reader.read_u16_be()? as usize;
        let script = reader.read_bytes(script_len)?.to_vec();
        Ok(NanoContractHeader {
            id,
            seqnum,
            method,
            args,
            actions,
            address,
            script,
        })
    }
}
