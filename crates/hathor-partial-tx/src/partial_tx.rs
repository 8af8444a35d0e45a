//! Atomic swap proposals.
//!
//! A proposal collects inputs and outputs from several parties. Each
//! input records the token, value, authorities and owning address of
//! the UTXO it spends, so other participants can check the proposal
//! against a fullnode before signing. The text form is pipe-delimited:
//!
//! ```text
//! PartialTx|<tx hex>|<address,token,authorities,value>:...|<change index>:...
//! ```
//!
//! Authorities, values and change indexes are hex encoded.

use std::collections::HashMap;
use std::future::Future;

use hathor_script::{Network, ParsedScript};
use hathor_transaction::constants::NATIVE_TOKEN_UID;
use hathor_transaction::{Input, Output, Transaction};

use crate::PartialTxError;

/// Prefix of the proposal text format.
const SERIALIZATION_PREFIX: &str = "PartialTx";

/// An input of a proposal, together with the UTXO metadata the other
/// participants need to verify it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalInput {
    /// Hex id of the spent transaction.
    pub hash: String,
    /// Position of the spent output.
    pub index: u8,
    /// Unlocking data, once signed.
    pub data: Option<Vec<u8>>,
    /// Uid of the token held by the spent output.
    pub token: String,
    /// Authority mask of the spent output, 0 for a plain output.
    pub authorities: i64,
    /// Value of the spent output.
    pub value: i64,
    /// Base58 address owning the spent output.
    pub address: String,
}

impl ProposalInput {
    /// The plain transaction input for this proposal entry.
    pub fn to_input(&self) -> Input {
        let mut input = Input::new(self.hash.clone(), self.index);
        if let Some(data) = &self.data {
            input.set_data(data.clone());
        }
        input
    }

    /// Whether the spent output is an authority output.
    pub fn is_authority(&self) -> bool {
        self.authorities > 0
    }
}

/// An output of a proposal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposalOutput {
    /// Amount, or the authority mask for authority outputs.
    pub value: i64,
    /// Locking script.
    pub script: Vec<u8>,
    /// Uid of the token being sent.
    pub token: String,
    /// Authority mask, 0 for a plain output.
    pub authorities: i64,
    /// Whether this output returns change to its creator, letting the
    /// wallet adjust it when fees or amounts change.
    pub is_change: bool,
}

impl ProposalOutput {
    /// Whether this is an authority output.
    pub fn is_authority(&self) -> bool {
        self.authorities > 0
    }

    /// Build the concrete output for a compiled transaction.
    ///
    /// # Arguments
    /// * `token_index` - Position of this output's token in the
    ///   transaction's token list plus one, 0 for the native token.
    pub fn to_output(&self, token_index: u8) -> Result<Output, PartialTxError> {
        let mut token_data = token_index;
        if self.is_authority() {
            token_data |= hathor_transaction::constants::TOKEN_AUTHORITY_MASK;
        }
        Ok(Output::new(self.value, self.script.clone(), token_data)?)
    }
}

/// Per-token funds moved by a proposal, authority entries excluded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenBalance {
    /// Sum of the input values.
    pub inputs: i64,
    /// Sum of the output values.
    pub outputs: i64,
}

/// A transaction proposal being built by several parties.
#[derive(Clone, Debug, PartialEq)]
pub struct PartialTx {
    /// Network used to compile and decode scripts.
    pub network: Network,
    /// Inputs added so far.
    pub inputs: Vec<ProposalInput>,
    /// Outputs added so far.
    pub outputs: Vec<ProposalOutput>,
}

impl PartialTx {
    /// Create an empty proposal.
    pub fn new(network: Network) -> Self {
        PartialTx {
            network,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Add an input spending a known UTXO.
    #[allow(clippy::too_many_arguments)]
    pub fn add_input(
        &mut self,
        hash: impl Into<String>,
        index: u8,
        value: i64,
        authorities: i64,
        token: impl Into<String>,
        address: impl Into<String>,
    ) {
        self.inputs.push(ProposalInput {
            hash: hash.into(),
            index,
            data: None,
            token: token.into(),
            authorities,
            value,
            address: address.into(),
        });
    }

    /// Add an output.
    pub fn add_output(
        &mut self,
        value: i64,
        script: Vec<u8>,
        token: impl Into<String>,
        authorities: i64,
        is_change: bool,
    ) {
        self.outputs.push(ProposalOutput {
            value,
            script,
            token: token.into(),
            authorities,
            is_change,
        });
    }

    /// Distinct non-native tokens, in first-seen order over inputs
    /// then outputs. This is the token list of the compiled
    /// transaction.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        let all = self
            .inputs
            .iter()
            .map(|i| &i.token)
            .chain(self.outputs.iter().map(|o| &o.token));
        for token in all {
            if token != NATIVE_TOKEN_UID && !tokens.contains(token) {
                tokens.push(token.clone());
            }
        }
        tokens
    }

    fn token_index(tokens: &[String], token: &str) -> u8 {
        tokens
            .iter()
            .position(|t| t == token)
            .map(|p| p as u8 + 1)
            .unwrap_or(0)
    }

    /// Compile the proposal into a transaction.
    ///
    /// The timestamp defaults to zero so that proposals serialize
    /// deterministically while being negotiated.
    pub fn get_tx(&self) -> Result<Transaction, PartialTxError> {
        let tokens = self.tokens();
        let inputs = self.inputs.iter().map(|i| i.to_input()).collect();
        let mut outputs = Vec::with_capacity(self.outputs.len());
        for output in &self.outputs {
            outputs.push(output.to_output(Self::token_index(&tokens, &output.token))?);
        }
        let mut tx = Transaction::new(inputs, outputs);
        tx.tokens = tokens;
        tx.timestamp = Some(0);
        Ok(tx)
    }

    /// Compile the proposal, failing when token balances do not close.
    pub fn get_complete_tx(&self) -> Result<Transaction, PartialTxError> {
        if !self.is_complete() {
            return Err(PartialTxError::Incomplete);
        }
        self.get_tx()
    }

    /// Funds moved per token, authority entries excluded.
    pub fn calculate_token_balance(&self) -> HashMap<String, TokenBalance> {
        let mut balance: HashMap<String, TokenBalance> = HashMap::new();
        for input in &self.inputs {
            if input.is_authority() {
                continue;
            }
            balance.entry(input.token.clone()).or_default().inputs += input.value;
        }
        for output in &self.outputs {
            if output.is_authority() {
                continue;
            }
            balance.entry(output.token.clone()).or_default().outputs += output.value;
        }
        balance
    }

    /// Whether every token's inputs and outputs cancel out.
    pub fn is_complete(&self) -> bool {
        self.calculate_token_balance()
            .values()
            .all(|b| b.inputs == b.outputs)
    }

    /// Serialize the proposal to its text form.
    pub fn serialize(&self) -> Result<String, PartialTxError> {
        let tx_hex = hex::encode(self.get_tx()?.to_bytes()?);
        let inputs = self
            .inputs
            .iter()
            .map(|i| {
                format!(
                    "{},{},{:x},{:x}",
                    i.address, i.token, i.authorities, i.value
                )
            })
            .collect::<Vec<_>>()
            .join(":");
        let changes = self
            .outputs
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_change)
            .map(|(idx, _)| format!("{idx:x}"))
            .collect::<Vec<_>>()
            .join(":");
        Ok(format!("{SERIALIZATION_PREFIX}|{tx_hex}|{inputs}|{changes}"))
    }

    /// Parse a proposal from its text form.
    ///
    /// # Arguments
    /// * `serialized` - The pipe-delimited proposal string.
    /// * `network` - Network used to decode the embedded transaction.
    pub fn deserialize(serialized: &str, network: Network) -> Result<Self, PartialTxError> {
        let parts: Vec<&str> = serialized.split('|').collect();
        if parts.len() != 4 || parts[0] != SERIALIZATION_PREFIX {
            return Err(PartialTxError::Syntax(format!(
                "expected {SERIALIZATION_PREFIX} with 4 segments"
            )));
        }
        let tx_bytes = hex::decode(parts[1])
            .map_err(|e| PartialTxError::Syntax(format!("invalid transaction hex: {e}")))?;
        let tx = Transaction::from_bytes(&tx_bytes, network)?;

        let input_metas: Vec<&str> = if parts[2].is_empty() {
            Vec::new()
        } else {
            parts[2].split(':').collect()
        };
        if input_metas.len() != tx.inputs.len() {
            return Err(PartialTxError::Syntax(format!(
                "{} input metadata entries for {} inputs",
                input_metas.len(),
                tx.inputs.len()
            )));
        }
        let mut inputs = Vec::with_capacity(tx.inputs.len());
        for (input, meta) in tx.inputs.iter().zip(input_metas) {
            let fields: Vec<&str> = meta.split(',').collect();
            if fields.len() != 4 {
                return Err(PartialTxError::Syntax(format!(
                    "input metadata needs 4 fields, got {}",
                    fields.len()
                )));
            }
            let authorities = i64::from_str_radix(fields[2], 16)
                .map_err(|e| PartialTxError::Syntax(format!("invalid authorities: {e}")))?;
            let value = i64::from_str_radix(fields[3], 16)
                .map_err(|e| PartialTxError::Syntax(format!("invalid value: {e}")))?;
            inputs.push(ProposalInput {
                hash: input.hash.clone(),
                index: input.index,
                data: input.data.clone(),
                token: fields[1].to_string(),
                authorities,
                value,
                address: fields[0].to_string(),
            });
        }

        let mut change_indexes = Vec::new();
        if !parts[3].is_empty() {
            for idx in parts[3].split(':') {
                change_indexes.push(
                    usize::from_str_radix(idx, 16)
                        .map_err(|e| PartialTxError::Syntax(format!("invalid change index: {e}")))?,
                );
            }
        }

        let mut outputs = Vec::with_capacity(tx.outputs.len());
        for (idx, output) in tx.outputs.iter().enumerate() {
            match output.decoded {
                Some(ParsedScript::P2pkh(_)) | Some(ParsedScript::P2sh(_)) => {}
                _ => return Err(PartialTxError::UnsupportedScript),
            }
            let token = if output.is_token_htr() {
                NATIVE_TOKEN_UID.to_string()
            } else {
                let token_index = output.token_index() as usize;
                tx.tokens
                    .get(token_index)
                    .cloned()
                    .ok_or(PartialTxError::IndexOutOfBounds(token_index))?
            };
            outputs.push(ProposalOutput {
                value: output.value,
                script: output.script.clone(),
                token,
                authorities: output.authorities(),
                is_change: change_indexes.contains(&idx),
            });
        }

        Ok(PartialTx {
            network,
            inputs,
            outputs,
        })
    }

    /// Check every input against a fullnode's view of the UTXO set.
    ///
    /// All lookups run concurrently. Any fetch failure or mismatch in
    /// token, value, authorities or address yields `false` rather
    /// than an error, since validation is advisory before broadcast.
    pub async fn validate<P: TxProvider>(&self, provider: &P) -> Result<bool, PartialTxError> {
        let lookups = self
            .inputs
            .iter()
            .map(|input| provider.get_transaction(&input.hash));
        let views = futures::future::join_all(lookups).await;
        for (input, view) in self.inputs.iter().zip(views) {
            let view = match view {
                Ok(view) => view,
                Err(_) => return Ok(false),
            };
            let spent = match view.outputs.get(input.index as usize) {
                Some(spent) => spent,
                None => return Ok(false),
            };
            let matches = spent.token == input.token
                && spent.value == input.value
                && spent.authorities == input.authorities
                && spent.address.as_deref() == Some(input.address.as_str());
            if !matches {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// A fullnode's view of one output of a confirmed transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxOutputView {
    /// Value, or the authority mask for authority outputs.
    pub value: i64,
    /// Uid of the token held by the output.
    pub token: String,
    /// Authority mask, 0 for a plain output.
    pub authorities: i64,
    /// Decoded destination address, when the script has one.
    pub address: Option<String>,
}

/// A fullnode's view of a confirmed transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxView {
    /// The transaction's outputs, by index.
    pub outputs: Vec<TxOutputView>,
}

/// Source of confirmed transactions, usually a fullnode API client.
pub trait TxProvider {
    /// Fetch a transaction by its hex id.
    fn get_transaction(
        &self,
        tx_id: &str,
    ) -> impl Future<Output = Result<TxView, PartialTxError>> + Send;
}
