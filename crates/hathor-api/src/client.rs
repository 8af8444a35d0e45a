//! Fullnode HTTP client for fetching transactions, network constants,
//! and pushing signed transactions.

use serde::de::DeserializeOwned;

use hathor_partial_tx::{PartialTxError, TxOutputView, TxProvider, TxView};

use crate::error::ApiError;
use crate::types::{
    NodeConfig, PushTxResponse, TransactionResponse, VersionResponse,
};

/// HTTP client for a Hathor fullnode.
#[derive(Debug, Clone)]
pub struct NodeClient {
    /// Client configuration.
    config: NodeConfig,
    /// Underlying HTTP client.
    client: reqwest::Client,
}

impl NodeClient {
    /// Create a new fullnode client with the given configuration.
    pub fn new(config: NodeConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Get a transaction by its hex id.
    ///
    /// # Returns
    /// The node's response, or [`ApiError::Rejected`] when the node
    /// answers but does not know the transaction.
    pub async fn get_transaction(&self, tx_id: &str) -> Result<TransactionResponse, ApiError> {
        let path = format!("transaction?id={}", tx_id);
        let resp: TransactionResponse = self.do_get(&path).await?;
        if !resp.success {
            return Err(ApiError::Rejected(
                resp.message.unwrap_or_else(|| "transaction not found".to_string()),
            ));
        }
        Ok(resp)
    }

    /// Get the node's version info and network constants.
    pub async fn get_version(&self) -> Result<VersionResponse, ApiError> {
        self.do_get("version").await
    }

    /// Push a serialized transaction to the network.
    ///
    /// # Arguments
    /// * `tx_hex` - Hex of the full wire bytes, mined nonce included.
    pub async fn push_tx(&self, tx_hex: &str) -> Result<PushTxResponse, ApiError> {
        let url = self.url("push_tx");
        let body = serde_json::json!({ "hex_tx": tx_hex });
        let resp = self.client.post(&url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ApiError::Node {
                status_code: status.as_u16(),
                message,
            });
        }

        let parsed: PushTxResponse = serde_json::from_str(&resp.text().await?)?;
        if !parsed.success {
            return Err(ApiError::Rejected(
                parsed.message.clone().unwrap_or_else(|| "push_tx rejected".to_string()),
            ));
        }
        Ok(parsed)
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.server_url, self.config.api_version, path
        )
    }

    /// Perform a GET request and deserialize the response.
    async fn do_get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ApiError::Node {
                status_code: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        let parsed = serde_json::from_str(&text)?;
        Ok(parsed)
    }
}

impl TxProvider for NodeClient {
    fn get_transaction(
        &self,
        tx_id: &str,
    ) -> impl std::future::Future<Output = Result<TxView, PartialTxError>> + Send {
        let tx_id = tx_id.to_string();
        async move {
            let resp = NodeClient::get_transaction(self, &tx_id)
                .await
                .map_err(|e| PartialTxError::Provider(e.to_string()))?;
            let tx = resp
                .tx
                .ok_or_else(|| PartialTxError::Provider("response has no transaction".to_string()))?;
            let outputs = tx
                .outputs
                .iter()
                .map(|output| TxOutputView {
                    value: output.value,
                    token: output
                        .token_uid(&tx.tokens)
                        .unwrap_or_default(),
                    authorities: output.authorities(),
                    address: output.decoded.address.clone(),
                })
                .collect();
            Ok(TxView { outputs })
        }
    }
}
