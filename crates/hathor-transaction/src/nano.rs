//! Nano contract transaction: a regular transaction carrying a nano
//! contract header.

use crate::constants::NANO_CONTRACTS_VERSION;
use crate::headers::{Header, NanoContractHeader};
use crate::{Input, Output, Transaction, TransactionError};

/// Method name that creates a contract from a blueprint.
pub const INITIALIZE_METHOD: &str = "initialize";

/// A transaction calling a nano contract method.
#[derive(Clone, Debug, PartialEq)]
pub struct NanoContract {
    /// The underlying transaction. Its version byte is always the
    /// nano contract version and it carries exactly one nano
    /// contract header.
    pub transaction: Transaction,
}

impl NanoContract {
    /// Create a new nano contract transaction.
    ///
    /// # Arguments
    /// * `inputs` - Inputs funding any deposit actions.
    /// * `outputs` - Outputs receiving any withdrawal actions.
    /// * `header` - The contract call.
    pub fn new(inputs: Vec<Input>, outputs: Vec<Output>, header: NanoContractHeader) -> Self {
        let transaction = Transaction {
            version: NANO_CONTRACTS_VERSION,
            inputs,
            outputs,
            headers: vec![Header::NanoContract(header)],
            ..Default::default()
        };
        NanoContract { transaction }
    }

    /// The contract call header.
    pub fn header(&self) -> Result<&NanoContractHeader, TransactionError> {
        let headers = self.transaction.get_nano_headers()?;
        Ok(headers[0])
    }

    /// Whether this call creates a new contract.
    pub fn is_initialize(&self) -> Result<bool, TransactionError> {
        Ok(self.header()?.method == INITIALIZE_METHOD)
    }

    /// Set the caller's unlocking script on the header.
    pub fn set_caller_script(&mut self, script: Vec<u8>) -> Result<(), TransactionError> {
        match self.transaction.headers.first_mut() {
            Some(Header::NanoContract(nano)) => {
                nano.script = script;
                Ok(())
            }
            None => Err(TransactionError::NanoHeaderNotFound),
        }
    }
}
