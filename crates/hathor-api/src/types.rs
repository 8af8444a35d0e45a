//! Fullnode API data types: configuration, transaction, and version
//! models.

use serde::{Deserialize, Serialize};

use hathor_transaction::constants::{NATIVE_TOKEN_UID, TOKEN_AUTHORITY_MASK, TOKEN_INDEX_MASK};
use hathor_transaction::WeightConstants;

/// Configuration for a [`NodeClient`](crate::NodeClient).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Base URL of the fullnode (e.g. `https://node1.mainnet.hathor.network`).
    pub server_url: String,
    /// API version prefix (e.g. `v1a`).
    pub api_version: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            server_url: "https://node1.mainnet.hathor.network".to_string(),
            api_version: "v1a".to_string(),
        }
    }
}

/// Response of the transaction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    /// Whether the node found the transaction.
    pub success: bool,
    /// Error message when `success` is false.
    #[serde(default)]
    pub message: Option<String>,
    /// The transaction, when found.
    #[serde(default)]
    pub tx: Option<ApiTransaction>,
}

/// A transaction as reported by the fullnode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTransaction {
    /// Hex id.
    #[serde(default)]
    pub hash: String,
    /// Version byte.
    #[serde(default)]
    pub version: u8,
    /// Custom tokens moved by the transaction.
    #[serde(default)]
    pub tokens: Vec<ApiToken>,
    /// Outputs, by index.
    #[serde(default)]
    pub outputs: Vec<ApiOutput>,
}

/// A token entry of a fullnode transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiToken {
    /// Token uid (hex of the creating transaction id).
    pub uid: String,
    /// Token name.
    #[serde(default)]
    pub name: Option<String>,
    /// Token symbol.
    #[serde(default)]
    pub symbol: Option<String>,
}

/// An output of a fullnode transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiOutput {
    /// Value, or the authority mask for authority outputs.
    pub value: i64,
    /// Token metadata byte.
    pub token_data: u8,
    /// Hex locking script.
    #[serde(default)]
    pub script: Option<String>,
    /// Script fields decoded by the node.
    #[serde(default)]
    pub decoded: DecodedScript,
}

impl ApiOutput {
    /// Whether this output grants an authority.
    pub fn is_authority(&self) -> bool {
        self.token_data & TOKEN_AUTHORITY_MASK > 0
    }

    /// The authority mask carried by this output, 0 if not an
    /// authority output.
    pub fn authorities(&self) -> i64 {
        if self.is_authority() {
            self.value
        } else {
            0
        }
    }

    /// Resolve this output's token uid against the transaction's
    /// token list.
    pub fn token_uid(&self, tokens: &[ApiToken]) -> Option<String> {
        let index = (self.token_data & TOKEN_INDEX_MASK) as usize;
        if index == 0 {
            return Some(NATIVE_TOKEN_UID.to_string());
        }
        tokens.get(index - 1).map(|t| t.uid.clone())
    }
}

/// Script fields decoded by the node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodedScript {
    /// Destination address, when the script has one.
    #[serde(default)]
    pub address: Option<String>,
    /// Timelock, when the script has one.
    #[serde(default)]
    pub timelock: Option<u32>,
}

/// Response of the version endpoint, carrying the network constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    /// Fullnode version string.
    #[serde(default)]
    pub version: String,
    /// Network name (`mainnet`, `testnet`, ...).
    #[serde(default)]
    pub network: String,
    /// Minimum transaction weight.
    pub min_tx_weight: f64,
    /// Weight formula size coefficient.
    pub min_tx_weight_coefficient: f64,
    /// Weight formula amount constant.
    pub min_tx_weight_k: f64,
}

impl VersionResponse {
    /// The weight constants advertised by this node.
    pub fn weight_constants(&self) -> WeightConstants {
        WeightConstants {
            tx_weight_coefficient: self.min_tx_weight_coefficient,
            tx_min_weight: self.min_tx_weight,
            tx_min_weight_k: self.min_tx_weight_k,
        }
    }
}

/// Response of the push transaction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushTxResponse {
    /// Whether the node accepted the transaction.
    pub success: bool,
    /// Error message when `success` is false.
    #[serde(default)]
    pub message: Option<String>,
}
