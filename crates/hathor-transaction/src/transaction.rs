//! The base transaction: funds block, graph fields, extension headers
//! and nonce.
//!
//! # Wire layout
//!
//! ```text
//! funds block:
//!   [signal bits: 1][version: 1][tokens len: 2][inputs len: 1][outputs len: 1]
//!   [token uids: 32 each][inputs][outputs]
//! graph fields:
//!   [weight: f64 8][timestamp: i32 4][parents len: 1][parent hashes: 32 each]
//! headers, then [nonce: u32 4]
//! ```
//!
//! All integers are big-endian. The transaction id is
//! `sha256(sha256(funds) ++ graph ++ headers ++ nonce)`, and the bytes
//! covered by input signatures are the funds block with every input
//! data length forced to zero, followed by the graph fields and the
//! sighash form of each header.

use hathor_primitives::hash::{sha256, sha256d};
use hathor_primitives::{ByteReader, ByteWriter};
use hathor_script::Network;

use crate::constants::{
    CREATE_TOKEN_TX_VERSION, DEFAULT_SIGNAL_BITS, DEFAULT_TX_VERSION, MAX_INPUTS, MAX_OUTPUTS,
    MAX_PARENTS, NANO_CONTRACTS_VERSION, ON_CHAIN_BLUEPRINTS_VERSION, TX_HASH_SIZE,
};
use crate::headers::{Header, NanoContractHeader};
use crate::weight::{minimum_tx_weight, WeightConstants};
use crate::{CreateTokenTransaction, Input, OnChainBlueprint, Output, TransactionError};

/// A transaction in the funds/graph wire format.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    /// Signal bits for feature activation, usually 0.
    pub signal_bits: u8,
    /// Version byte of the funds block.
    pub version: u8,
    /// Inputs being spent.
    pub inputs: Vec<Input>,
    /// New outputs.
    pub outputs: Vec<Output>,
    /// Hex uids of the custom tokens moved by this transaction. The
    /// native token is never listed.
    pub tokens: Vec<String>,
    /// Hex ids of the parent transactions in the DAG.
    pub parents: Vec<String>,
    /// Proof of work difficulty.
    pub weight: f64,
    /// Proof of work nonce.
    pub nonce: u32,
    /// Unix timestamp. `None` until the transaction is prepared.
    pub timestamp: Option<i32>,
    /// Cached hex id, set after mining or parsing.
    pub hash: Option<String>,
    /// Extension headers.
    pub headers: Vec<Header>,
}

impl Default for Transaction {
    fn default() -> Self {
        Transaction {
            signal_bits: DEFAULT_SIGNAL_BITS,
            version: DEFAULT_TX_VERSION,
            inputs: Vec::new(),
            outputs: Vec::new(),
            tokens: Vec::new(),
            parents: Vec::new(),
            weight: 0.0,
            nonce: 0,
            timestamp: None,
            hash: None,
            headers: Vec::new(),
        }
    }
}

impl Transaction {
    /// Create a new transaction with the given inputs and outputs.
    pub fn new(inputs: Vec<Input>, outputs: Vec<Output>) -> Self {
        Transaction {
            inputs,
            outputs,
            ..Default::default()
        }
    }

    // --- Serialization -------------------------------------------------

    /// Write the funds block.
    ///
    /// # Arguments
    /// * `writer` - The writer to append wire bytes to.
    /// * `add_input_data` - When `false` every input data length is
    ///   written as zero, producing the bytes covered by signatures.
    pub(crate) fn write_funds(
        &self,
        writer: &mut ByteWriter,
        add_input_data: bool,
    ) -> Result<(), TransactionError> {
        writer.write_u8(self.signal_bits);
        writer.write_u8(self.version);
        writer.write_u16_be(self.tokens.len() as u16);
        writer.write_u8(self.inputs.len() as u8);
        writer.write_u8(self.outputs.len() as u8);
        for uid in &self.tokens {
            let uid_bytes = hex::decode(uid)
                .map_err(|e| TransactionError::Parse(format!("invalid token uid hex: {e}")))?;
            if uid_bytes.len() != TX_HASH_SIZE {
                return Err(TransactionError::Parse(format!(
                    "token uid must be {} bytes, got {}",
                    TX_HASH_SIZE,
                    uid_bytes.len()
                )));
            }
            writer.write_bytes(&uid_bytes);
        }
        for input in &self.inputs {
            input.serialize(writer, add_input_data)?;
        }
        for output in &self.outputs {
            output.serialize(writer)?;
        }
        Ok(())
    }

    /// Write the graph fields: weight, timestamp and parents.
    pub(crate) fn write_graph(&self, writer: &mut ByteWriter) -> Result<(), TransactionError> {
        let timestamp = self
            .timestamp
            .ok_or_else(|| TransactionError::Parse("timestamp is not set".to_string()))?;
        writer.write_f64_be(self.weight);
        writer.write_i32_be(timestamp);
        writer.write_u8(self.parents.len() as u8);
        for parent in &self.parents {
            let parent_bytes = hex::decode(parent)
                .map_err(|e| TransactionError::Parse(format!("invalid parent hash hex: {e}")))?;
            if parent_bytes.len() != TX_HASH_SIZE {
                return Err(TransactionError::Parse(format!(
                    "parent hash must be {} bytes, got {}",
                    TX_HASH_SIZE,
                    parent_bytes.len()
                )));
            }
            writer.write_bytes(&parent_bytes);
        }
        Ok(())
    }

    /// Write every header.
    pub(crate) fn write_headers(
        &self,
        writer: &mut ByteWriter,
        sighash: bool,
    ) -> Result<(), TransactionError> {
        for header in &self.headers {
            if sighash {
                header.serialize_sighash(writer)?;
            } else {
                header.serialize(writer)?;
            }
        }
        Ok(())
    }

    /// Serialize the full transaction, including the nonce.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let mut writer = ByteWriter::new();
        self.write_funds(&mut writer, true)?;
        self.write_graph(&mut writer)?;
        self.write_headers(&mut writer, false)?;
        writer.write_u32_be(self.nonce);
        Ok(writer.into_bytes())
    }

    /// The bytes covered by input signatures: the funds block with
    /// empty input data, the graph fields and the sighash form of
    /// every header. Signers hash these with double sha256.
    pub fn get_data_to_sign(&self) -> Result<Vec<u8>, TransactionError> {
        let mut writer = ByteWriter::new();
        self.write_funds(&mut writer, false)?;
        self.write_graph(&mut writer)?;
        self.write_headers(&mut writer, true)?;
        Ok(writer.into_bytes())
    }

    /// The double sha256 digest that input signatures sign.
    pub fn get_sighash_all_digest(&self) -> Result<[u8; 32], TransactionError> {
        Ok(sha256d(&self.get_data_to_sign()?))
    }

    // --- Hashing -------------------------------------------------------

    /// Compute the transaction id.
    ///
    /// The funds block is hashed on its own first, then that digest is
    /// hashed together with the graph fields, headers and nonce.
    pub fn calculate_hash(&self) -> Result<String, TransactionError> {
        let mut funds = ByteWriter::new();
        self.write_funds(&mut funds, true)?;
        let funds_digest = sha256(funds.as_bytes());

        let mut rest = ByteWriter::new();
        rest.write_bytes(&funds_digest);
        self.write_graph(&mut rest)?;
        self.write_headers(&mut rest, false)?;
        rest.write_u32_be(self.nonce);
        Ok(hex::encode(sha256(rest.as_bytes())))
    }

    /// Compute the transaction id and store it in `hash`.
    pub fn update_hash(&mut self) -> Result<(), TransactionError> {
        self.hash = Some(self.calculate_hash()?);
        Ok(())
    }

    // --- Validation and queries ----------------------------------------

    /// Check the consensus structural limits.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.inputs.len() > MAX_INPUTS {
            return Err(TransactionError::MaximumInputs(self.inputs.len()));
        }
        if self.outputs.len() > MAX_OUTPUTS {
            return Err(TransactionError::MaximumOutputs(self.outputs.len()));
        }
        if self.parents.len() > MAX_PARENTS {
            return Err(TransactionError::MaximumParents(self.parents.len()));
        }
        for output in &self.outputs {
            if !output.has_valid_length() {
                return Err(TransactionError::ScriptTooLong(output.script.len()));
            }
        }
        Ok(())
    }

    /// Sum of all non-authority output values.
    pub fn get_outputs_sum(&self) -> i64 {
        self.outputs
            .iter()
            .filter(|o| !o.is_authority())
            .map(|o| o.value)
            .sum()
    }

    /// Whether this transaction carries a nano contract header.
    pub fn is_nano_contract(&self) -> bool {
        self.headers
            .iter()
            .any(|h| matches!(h, Header::NanoContract(_)))
    }

    /// The nano contract headers of this transaction.
    ///
    /// # Returns
    /// The headers, or [`TransactionError::NanoHeaderNotFound`] when
    /// there are none.
    pub fn get_nano_headers(&self) -> Result<Vec<&NanoContractHeader>, TransactionError> {
        let headers: Vec<&NanoContractHeader> = self
            .headers
            .iter()
            .map(|h| match h {
                Header::NanoContract(nano) => nano,
            })
            .collect();
        if headers.is_empty() {
            return Err(TransactionError::NanoHeaderNotFound);
        }
        Ok(headers)
    }

    /// Validate, compute the proof of work weight and the id.
    ///
    /// # Arguments
    /// * `constants` - Network weight constants. Required; passing
    ///   `None` fails with [`TransactionError::ConstantNotSet`].
    pub fn prepare_to_send(
        &mut self,
        constants: Option<&WeightConstants>,
    ) -> Result<(), TransactionError> {
        self.validate()?;
        let size = self.to_bytes()?.len();
        self.weight = minimum_tx_weight(size, self.get_outputs_sum(), constants)?;
        self.update_hash()
    }

    // --- Deserialization -----------------------------------------------

    /// Read the funds block into an empty transaction shell.
    pub(crate) fn read_funds(
        reader: &mut ByteReader,
        network: Network,
    ) -> Result<Self, TransactionError> {
        let signal_bits = reader.read_u8()?;
        let version = reader.read_u8()?;
        let tokens_len = reader.read_u16_be()? as usize;
        let inputs_len = reader.read_u8()? as usize;
        let outputs_len = reader.read_u8()? as usize;
        let mut tokens = Vec::with_capacity(tokens_len);
        for _ in 0..tokens_len {
            tokens.push(reader.read_hex(TX_HASH_SIZE)?);
        }
        let mut inputs = Vec::with_capacity(inputs_len);
        for _ in 0..inputs_len {
            inputs.push(Input::read_from(reader)?);
        }
        let mut outputs = Vec::with_capacity(outputs_len);
        for _ in 0..outputs_len {
            outputs.push(Output::read_from(reader, network)?);
        }
        Ok(Transaction {
            signal_bits,
            version,
            inputs,
            outputs,
            tokens,
            ..Default::default()
        })
    }

    /// Read the graph fields into this transaction.
    pub(crate) fn read_graph(&mut self, reader: &mut ByteReader) -> Result<(), TransactionError> {
        self.weight = reader.read_f64_be()?;
        self.timestamp = Some(reader.read_i32_be()?);
        let parents_len = reader.read_u8()? as usize;
        let mut parents = Vec::with_capacity(parents_len);
        for _ in 0..parents_len {
            parents.push(reader.read_hex(TX_HASH_SIZE)?);
        }
        self.parents = parents;
        Ok(())
    }

    /// Read headers until only the nonce remains, then the nonce.
    pub(crate) fn read_headers_and_nonce(
        &mut self,
        reader: &mut ByteReader,
    ) -> Result<(), TransactionError> {
        while reader.remaining() > 4 {
            self.headers.push(Header::read_from(reader)?);
        }
        self.nonce = reader.read_u32_be()?;
        Ok(())
    }

    /// Deserialize a transaction from the full wire bytes.
    ///
    /// # Arguments
    /// * `bytes` - The complete serialized transaction.
    /// * `network` - Network used to decode output scripts.
    ///
    /// # Returns
    /// The transaction with its id computed, or an error when the
    /// version byte is not a plain or nano contract transaction, or
    /// when bytes are left over after the nonce.
    pub fn from_bytes(bytes: &[u8], network: Network) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let mut tx = Transaction::read_funds(&mut reader, network)?;
        if tx.version != DEFAULT_TX_VERSION && tx.version != NANO_CONTRACTS_VERSION {
            return Err(TransactionError::UnsupportedVersion(tx.version));
        }
        tx.read_graph(&mut reader)?;
        tx.read_headers_and_nonce(&mut reader)?;
        if reader.remaining() != 0 {
            return Err(TransactionError::Parse(format!(
                "{} trailing bytes after nonce",
                reader.remaining()
            )));
        }
        tx.update_hash()?;
        Ok(tx)
    }
}

/// A transaction of any supported funds version.
#[derive(Clone, Debug, PartialEq)]
pub enum TxVariant {
    /// Plain or nano contract transaction.
    Transaction(Transaction),
    /// Token creation transaction.
    CreateToken(CreateTokenTransaction),
    /// On-chain blueprint publication.
    OnChainBlueprint(OnChainBlueprint),
}

impl TxVariant {
    /// The inner base transaction, whatever the variant.
    pub fn transaction(&self) -> &Transaction {
        match self {
            TxVariant::Transaction(tx) => tx,
            TxVariant::CreateToken(tx) => &tx.transaction,
            TxVariant::OnChainBlueprint(tx) => &tx.transaction,
        }
    }

    /// The hex id, when computed.
    pub fn hash(&self) -> Option<&str> {
        self.transaction().hash.as_deref()
    }
}

/// Deserialize any supported transaction, dispatching on the version
/// byte.
///
/// # Arguments
/// * `bytes` - The complete serialized transaction.
/// * `network` - Network used to decode output scripts.
pub fn tx_from_bytes(bytes: &[u8], network: Network) -> Result<TxVariant, TransactionError> {
    if bytes.len() < 2 {
        return Err(TransactionError::Parse(
            "buffer too short for a transaction".to_string(),
        ));
    }
    match bytes[1] {
        DEFAULT_TX_VERSION | NANO_CONTRACTS_VERSION => Ok(TxVariant::Transaction(Transaction::from_bytes(
            bytes, network,
        )?)),
        CREATE_TOKEN_TX_VERSION => Ok(TxVariant::CreateToken(CreateTokenTransaction::from_bytes(
            bytes, network,
        )?)),
        ON_CHAIN_BLUEPRINTS_VERSION => Ok(TxVariant::OnChainBlueprint(
            OnChainBlueprint::from_bytes(bytes, network)?,
        )),
        other => Err(TransactionError::UnsupportedVersion(other)),
    }
}
