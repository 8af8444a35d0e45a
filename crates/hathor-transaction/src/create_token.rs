//! Token creation transaction.
//!
//! Serialized like a regular transaction except that a token info
//! block is spliced into the funds block, right after the outputs:
//!
//! ```text
//! [info version: 1][name len: 1][name][symbol len: 1][symbol]
//! ```
//!
//! The token list is always empty; outputs with a non-zero token index
//! refer to the token being created, whose uid becomes the id of this
//! transaction.

use hathor_primitives::hash::{sha256, sha256d};
use hathor_primitives::{ByteReader, ByteWriter};
use hathor_script::Network;

use crate::constants::{
    CREATE_TOKEN_TX_VERSION, MAX_TOKEN_NAME_LEN, MAX_TOKEN_SYMBOL_LEN, TOKEN_INFO_VERSION,
};
use crate::weight::{minimum_tx_weight, WeightConstants};
use crate::{Input, Output, Transaction, TransactionError};

/// A transaction that creates a new token.
#[derive(Clone, Debug, PartialEq)]
pub struct CreateTokenTransaction {
    /// The underlying transaction. Its version byte is always the
    /// token creation version and its token list is empty.
    pub transaction: Transaction,
    /// Human readable token name.
    pub name: String,
    /// Token ticker symbol.
    pub symbol: String,
}

impl CreateTokenTransaction {
    /// Create a new token creation transaction.
    ///
    /// # Arguments
    /// * `inputs` - Inputs paying the deposit.
    /// * `outputs` - Outputs, including the minted amount and any
    ///   authority outputs for the new token.
    /// * `name` - Token name, at most 30 bytes.
    /// * `symbol` - Token symbol, 1 to 5 bytes.
    pub fn new(
        inputs: Vec<Input>,
        outputs: Vec<Output>,
        name: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Result<Self, TransactionError> {
        let mut transaction = Transaction::new(inputs, outputs);
        transaction.version = CREATE_TOKEN_TX_VERSION;
        let tx = CreateTokenTransaction {
            transaction,
            name: name.into(),
            symbol: symbol.into(),
        };
        tx.validate_token_info()?;
        Ok(tx)
    }

    /// Check the token name and symbol against the protocol limits.
    pub fn validate_token_info(&self) -> Result<(), TransactionError> {
        if self.name.is_empty() || self.name.len() > MAX_TOKEN_NAME_LEN {
            return Err(TransactionError::InvalidTokenInfo(format!(
                "name must be 1 to {} bytes, got {}",
                MAX_TOKEN_NAME_LEN,
                self.name.len()
            )));
        }
        if self.symbol.is_empty() || self.symbol.len() > MAX_TOKEN_SYMBOL_LEN {
            return Err(TransactionError::InvalidTokenInfo(format!(
                "symbol must be 1 to {} bytes, got {}",
                MAX_TOKEN_SYMBOL_LEN,
                self.symbol.len()
            )));
        }
        Ok(())
    }

    fn write_token_info(&self, writer: &mut ByteWriter) {
        writer.write_u8(TOKEN_INFO_VERSION);
        writer.write_u8(self.name.len() as u8);
        writer.write_bytes(self.name.as_bytes());
        writer.write_u8(self.symbol.len() as u8);
        writer.write_bytes(self.symbol.as_bytes());
    }

    fn write_funds(
        &self,
        writer: &mut ByteWriter,
        add_input_data: bool,
    ) -> Result<(), TransactionError> {
        self.transaction.write_funds(writer, add_input_data)?;
        self.write_token_info(writer);
        Ok(())
    }

    /// Serialize the full transaction, including the nonce.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let mut writer = ByteWriter::new();
        self.write_funds(&mut writer, true)?;
        self.transaction.write_graph(&mut writer)?;
        self.transaction.write_headers(&mut writer, false)?;
        writer.write_u32_be(self.transaction.nonce);
        Ok(writer.into_bytes())
    }

    /// The bytes covered by input signatures.
    pub fn get_data_to_sign(&self) -> Result<Vec<u8>, TransactionError> {
        let mut writer = ByteWriter::new();
        self.write_funds(&mut writer, false)?;
        self.transaction.write_graph(&mut writer)?;
        self.transaction.write_headers(&mut writer, true)?;
        Ok(writer.into_bytes())
    }

    /// The double sha256 digest that input signatures sign.
    pub fn get_sighash_all_digest(&self) -> Result<[u8; 32], TransactionError> {
        Ok(sha256d(&self.get_data_to_sign()?))
    }

    /// Compute the transaction id, which is also the new token's uid.
    pub fn calculate_hash(&self) -> Result<String, TransactionError> {
        let mut funds = ByteWriter::new();
        self.write_funds(&mut funds, true)?;
        let funds_digest = sha256(funds.as_bytes());

        let mut rest = ByteWriter::new();
        rest.write_bytes(&funds_digest);
        self.transaction.write_graph(&mut rest)?;
        self.transaction.write_headers(&mut rest, false)?;
        rest.write_u32_be(self.transaction.nonce);
        Ok(hex::encode(sha256(rest.as_bytes())))
    }

    /// Compute the transaction id and store it.
    pub fn update_hash(&mut self) -> Result<(), TransactionError> {
        self.transaction.hash = Some(self.calculate_hash()?);
        Ok(())
    }

    /// Validate, compute the proof of work weight and the id.
    pub fn prepare_to_send(
        &mut self,
        constants: Option<&WeightConstants>,
    ) -> Result<(), TransactionError> {
        self.validate_token_info()?;
        self.transaction.validate()?;
        let size = self.to_bytes()?.len();
        self.transaction.weight =
            minimum_tx_weight(size, self.transaction.get_outputs_sum(), constants)?;
        self.update_hash()
    }

    /// Deserialize a token creation transaction from the full wire
    /// bytes.
    pub fn from_bytes(bytes: &[u8], network: Network) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let transaction = Transaction::read_funds(&mut reader, network)?;
        if transaction.version != CREATE_TOKEN_TX_VERSION {
            return Err(TransactionError::UnsupportedVersion(transaction.version));
        }
        if !transaction.tokens.is_empty() {
            return Err(TransactionError::Parse(
                "token creation transaction must have an empty token list".to_string(),
            ));
        }

        let info_version = reader.read_u8()?;
        if info_version != TOKEN_INFO_VERSION {
            return Err(TransactionError::Parse(format!(
                "unknown token info version {info_version}"
            )));
        }
        let name_len = reader.read_u8()? as usize;
        let name = String::from_utf8(reader.read_bytes(name_len)?.to_vec())
            .map_err(|_| TransactionError::Parse("token name is not valid utf-8".to_string()))?;
        let symbol_len = reader.read_u8()? as usize;
        let symbol = String::from_utf8(reader.read_bytes(symbol_len)?.to_vec())
            .map_err(|_| TransactionError::Parse("token symbol is not valid utf-8".to_string()))?;

        let mut tx = CreateTokenTransaction {
            transaction,
            name,
            symbol,
        };
        tx.validate_token_info()?;
        tx.transaction.read_graph(&mut reader)?;
        tx.transaction.read_headers_and_nonce(&mut reader)?;
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
