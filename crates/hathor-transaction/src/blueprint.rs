//! On-chain blueprint transaction: publishes contract source code.
//!
//! Serialized like a regular transaction with a code block spliced
//! into the funds block after the outputs:
//!
//! ```text
//! [code len: 4][code][pubkey len: 1][pubkey][signature len: 1][signature]
//! ```
//!
//! The signature covers everything except itself: the sighash form
//! writes a zero signature length.

use hathor_primitives::hash::{sha256, sha256d};
use hathor_primitives::{ByteReader, ByteWriter};
use hathor_script::Network;

use crate::constants::ON_CHAIN_BLUEPRINTS_VERSION;
use crate::weight::{minimum_tx_weight, WeightConstants};
use crate::{Transaction, TransactionError};

/// A transaction that publishes a nano contract blueprint.
#[derive(Clone, Debug, PartialEq)]
pub struct OnChainBlueprint {
    /// The underlying transaction. Its version byte is always the
    /// on-chain blueprint version.
    pub transaction: Transaction,
    /// Compressed blueprint source code.
    pub code: Vec<u8>,
    /// Compressed public key of the publisher.
    pub pubkey: Vec<u8>,
    /// DER signature by the publisher over the sighash bytes.
    pub signature: Vec<u8>,
}

impl OnChainBlueprint {
    /// Create a new unsigned blueprint transaction.
    ///
    /// # Arguments
    /// * `code` - Compressed blueprint source code.
    /// * `pubkey` - Compressed public key of the publisher.
    pub fn new(code: Vec<u8>, pubkey: Vec<u8>) -> Self {
        let transaction = Transaction {
            version: ON_CHAIN_BLUEPRINTS_VERSION,
            ..Default::default()
        };
        OnChainBlueprint {
            transaction,
            code,
            pubkey,
            signature: Vec::new(),
        }
    }

    fn write_code_block(&self, writer: &mut ByteWriter, add_signature: bool) {
        writer.write_u32_be(self.code.len() as u32);
        writer.write_bytes(&self.code);
        writer.write_u8(self.pubkey.len() as u8);
        writer.write_bytes(&self.pubkey);
        if add_signature {
            writer.write_u8(self.signature.len() as u8);
            writer.write_bytes(&self.signature);
        } else {
            writer.write_u8(0);
        }
    }

    fn write_funds(
        &self,
        writer: &mut ByteWriter,
        add_input_data: bool,
        add_signature: bool,
    ) -> Result<(), TransactionError> {
        self.transaction.write_funds(writer, add_input_data)?;
        self.write_code_block(writer, add_signature);
        Ok(())
    }

    /// Serialize the full transaction, including the nonce.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        let mut writer = ByteWriter::new();
        self.write_funds(&mut writer, true, true)?;
        self.transaction.write_graph(&mut writer)?;
        self.transaction.write_headers(&mut writer, false)?;
        writer.write_u32_be(self.transaction.nonce);
        Ok(writer.into_bytes())
    }

    /// The bytes covered by the publisher's signature.
    pub fn get_data_to_sign(&self) -> Result<Vec<u8>, TransactionError> {
        let mut writer = ByteWriter::new();
        self.write_funds(&mut writer, false, false)?;
        self.transaction.write_graph(&mut writer)?;
        self.transaction.write_headers(&mut writer, true)?;
        Ok(writer.into_bytes())
    }

    /// The double sha256 digest that the publisher signs.
    pub fn get_sighash_all_digest(&self) -> Result<[u8; 32], TransactionError> {
        Ok(sha256d(&self.get_data_to_sign()?))
    }

    /// Compute the transaction id, which is also the blueprint id.
    pub fn calculate_hash(&self) -> Result<String, TransactionError> {
        let mut funds = ByteWriter::new();
        self.write_funds(&mut funds, true, true)?;
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
        self.transaction.validate()?;
        let size = self.to_bytes()?.len();
        self.transaction.weight =
            minimum_tx_weight(size, self.transaction.get_outputs_sum(), constants)?;
        self.update_hash()
    }

    /// Deserialize a blueprint transaction from the full wire bytes.
    pub fn from_bytes(bytes: &[u8], network: Network) -> Result<Self, TransactionError> {
        let mut reader = ByteReader::new(bytes);
        let transaction = Transaction::read_funds(&mut reader, network)?;
        if transaction.version != ON_CHAIN_BLUEPRINTS_VERSION {
            return Err(TransactionError::UnsupportedVersion(transaction.version));
        }

        let code_len = reader.read_u32_be()? as usize;
        let code = reader.read_bytes(code_len)?.to_vec();
        let pubkey_len = reader.read_u8()? as usize;
        let pubkey = reader.read_bytes(pubkey_len)?.to_vec();
        let signature_len = reader.read_u8()? as usize;
        let signature = reader.read_bytes(signature_len)?.to_vec();

        let mut tx = OnChainBlueprint {
            transaction,
            code,
            pubkey,
            signature,
        };
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
