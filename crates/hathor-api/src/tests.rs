//! Tests for the fullnode client.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hathor_partial_tx::PartialTx;
use hathor_script::Network;
use hathor_transaction::constants::NATIVE_TOKEN_UID;

use crate::client::NodeClient;
use crate::types::NodeConfig;

const SPENT_TX: &str = "0101010101010101010101010101010101010101010101010101010101010101";
const ADDR_A: &str = "HBXkKywZ6KWqiu2Va6ARe4uFnMpeHm3SEH";
const P2PKH_SCRIPT_2: &str = "76a914d3abf0a2d9d4b0c2e1f4a5b6c7d8e9f00112233488ac";

fn test_config(server_url: &str) -> NodeConfig {
    NodeConfig {
        server_url: server_url.to_string(),
        api_version: "v1a".to_string(),
    }
}

fn spent_tx_body() -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "tx": {
            "hash": SPENT_TX,
            "version": 1,
            "tokens": [],
            "outputs": [{
                "value": 1000,
                "token_data": 0,
                "script": "dqkUNvahvxH2sdbS/ox73w5R07HB6dyIrA==",
                "decoded": { "address": ADDR_A, "timelock": null }
            }]
        }
    })
}

#[tokio::test]
async fn test_get_transaction_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1a/transaction"))
        .and(query_param("id", SPENT_TX))
        .respond_with(ResponseTemplate::new(200).set_body_json(spent_tx_body()))
        .mount(&server)
        .await;

    let client = NodeClient::new(test_config(&server.uri()));
    let resp = client.get_transaction(SPENT_TX).await.unwrap();

    let tx = resp.tx.unwrap();
    assert_eq!(tx.hash, SPENT_TX);
    assert_eq!(tx.outputs.len(), 1);
    assert_eq!(tx.outputs[0].value, 1000);
    assert_eq!(tx.outputs[0].decoded.address.as_deref(), Some(ADDR_A));
}

#[tokio::test]
async fn test_get_transaction_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1a/transaction"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "Transaction not found"
        })))
        .mount(&server)
        .await;

    let client = NodeClient::new(test_config(&server.uri()));
    let result = client.get_transaction("ff00").await;

    assert!(matches!(result, Err(crate::error::ApiError::Rejected(_))));
}

#[tokio::test]
async fn test_get_version_constants() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1a/version"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "version": "0.62.0",
            "network": "mainnet",
            "min_tx_weight": 14,
            "min_tx_weight_coefficient": 1.6,
            "min_tx_weight_k": 100
        })))
        .mount(&server)
        .await;

    let client = NodeClient::new(test_config(&server.uri()));
    let version = client.get_version().await.unwrap();

    assert_eq!(version.network, "mainnet");
    let constants = version.weight_constants();
    assert_eq!(constants.tx_min_weight, 14.0);
    assert_eq!(constants.tx_weight_coefficient, 1.6);
}

#[tokio::test]
async fn test_push_tx_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1a/push_tx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "Invalid transaction"
        })))
        .mount(&server)
        .await;

    let client = NodeClient::new(test_config(&server.uri()));
    let result = client.push_tx("0001").await;

    assert!(matches!(result, Err(crate::error::ApiError::Rejected(_))));
}

#[tokio::test]
async fn test_proposal_validation_against_node() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1a/transaction"))
        .and(query_param("id", SPENT_TX))
        .respond_with(ResponseTemplate::new(200).set_body_json(spent_tx_body()))
        .mount(&server)
        .await;

    let client = NodeClient::new(test_config(&server.uri()));

    let mut proposal = PartialTx::new(Network::Mainnet);
    proposal.add_input(SPENT_TX, 0, 1000, 0, NATIVE_TOKEN_UID, ADDR_A);
    proposal.add_output(
        1000,
        hex::decode(P2PKH_SCRIPT_2).unwrap(),
        NATIVE_TOKEN_UID,
        0,
        false,
    );
    assert!(proposal.validate(&client).await.unwrap());

    // wrong recorded value must fail validation
    proposal.inputs[0].value = 999;
    assert!(!proposal.validate(&client).await.unwrap());
}
