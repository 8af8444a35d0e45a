use hathor_script::Network;

use crate::constants::{CREATE_TOKEN_TX_VERSION, MAX_PARENTS, ON_CHAIN_BLUEPRINTS_VERSION};
use crate::headers::{NanoContractAction, NanoContractActionKind, NanoContractHeader};
use crate::weight::WeightConstants;
use crate::{
    tx_from_bytes, CreateTokenTransaction, Input, NanoContract, OnChainBlueprint, Output,
    Transaction, TransactionError, TxVariant,
};

const P2PKH_SCRIPT: &str = "76a91436f6a1bf11f6b1d6d2fe8c7bdf0e51d3b1c1e9dc88ac";

// A one-input one-output transaction with every field pinned, and its
// byte-exact serialization.
const SIMPLE_TX_HEX: &str = "0001000001010101010101010101010101010101010101010101010101010101010101010101000004deadbeef000003e800001976a91436f6a1bf11f6b1d6d2fe8c7bdf0e51d3b1c1e9dc88ac40320000000000006553f101020202020202020202020202020202020202020202020202020202020202020202030303030303030303030303030303030303030303030303030303030303030300000000";
const SIMPLE_TX_HASH: &str = "9c2fb37a9743bff9661d748aac8dd2585c3eadccbf4d894810ec3505a1b7a11b";
const SIMPLE_TX_SIGHASH: &str = "2d565cfcd81b6027b917d74f1501ebcac9f289e3b784331eaeca1d9b5ceb3196";

fn simple_tx() -> Transaction {
    let mut input = Input::new("01".repeat(32), 0);
    input.set_data(vec![0xde, 0xad, 0xbe, 0xef]);
    let output = Output::new(1000, hex::decode(P2PKH_SCRIPT).unwrap(), 0).unwrap();
    let mut tx = Transaction::new(vec![input], vec![output]);
    tx.weight = 18.0;
    tx.timestamp = Some(1_700_000_001);
    tx.parents = vec!["02".repeat(32), "03".repeat(32)];
    tx
}

#[test]
fn test_simple_tx_serialization() {
    let tx = simple_tx();
    assert_eq!(hex::encode(tx.to_bytes().unwrap()), SIMPLE_TX_HEX);
}

#[test]
fn test_simple_tx_hash() {
    let mut tx = simple_tx();
    tx.update_hash().unwrap();
    assert_eq!(tx.hash.as_deref(), Some(SIMPLE_TX_HASH));
}

#[test]
fn test_simple_tx_sighash_digest() {
    let tx = simple_tx();
    let digest = tx.get_sighash_all_digest().unwrap();
    assert_eq!(hex::encode(digest), SIMPLE_TX_SIGHASH);
}

#[test]
fn test_data_to_sign_excludes_input_data() {
    let tx = simple_tx();
    let data = tx.get_data_to_sign().unwrap();
    let hex = hex::encode(&data);
    assert!(!hex.contains("deadbeef"));
    // full bytes minus the input data (4) and the nonce (4)
    assert_eq!(data.len(), tx.to_bytes().unwrap().len() - 4 - 4);
}

#[test]
fn test_simple_tx_from_bytes() {
    let bytes = hex::decode(SIMPLE_TX_HEX).unwrap();
    let tx = Transaction::from_bytes(&bytes, Network::Mainnet).unwrap();
    assert_eq!(tx, {
        let mut expected = simple_tx();
        // decoded scripts and the id are filled in during parsing
        expected.outputs[0].decoded =
            hathor_script::parse_script(&expected.outputs[0].script, Network::Mainnet).ok();
        expected.hash = Some(SIMPLE_TX_HASH.to_string());
        expected
    });
    assert_eq!(
        tx.outputs[0]
            .decoded
            .as_ref()
            .and_then(|d| d.address())
            .map(|a| a.base58.clone()),
        Some("HBXkKywZ6KWqiu2Va6ARe4uFnMpeHm3SEH".to_string())
    );
}

#[test]
fn test_from_bytes_rejects_trailing_bytes() {
    let mut bytes = hex::decode(SIMPLE_TX_HEX).unwrap();
    bytes.push(0);
    assert!(matches!(
        Transaction::from_bytes(&bytes, Network::Mainnet),
        Err(TransactionError::Parse(_))
    ));
}

#[test]
fn test_from_bytes_rejects_block_version() {
    let mut bytes = hex::decode(SIMPLE_TX_HEX).unwrap();
    bytes[1] = 0;
    assert!(matches!(
        Transaction::from_bytes(&bytes, Network::Mainnet),
        Err(TransactionError::UnsupportedVersion(0))
    ));
    assert!(matches!(
        tx_from_bytes(&bytes, Network::Mainnet),
        Err(TransactionError::UnsupportedVersion(0))
    ));
}

#[test]
fn test_tx_from_bytes_dispatch() {
    let bytes = hex::decode(SIMPLE_TX_HEX).unwrap();
    let variant = tx_from_bytes(&bytes, Network::Mainnet).unwrap();
    match variant {
        TxVariant::Transaction(tx) => assert_eq!(tx.hash.as_deref(), Some(SIMPLE_TX_HASH)),
        other => panic!("expected a plain transaction, got {other:?}"),
    }
}

#[test]
fn test_validate_limits() {
    let mut tx = simple_tx();
    tx.parents = vec!["02".repeat(32); MAX_PARENTS + 1];
    assert!(matches!(
        tx.validate(),
        Err(TransactionError::MaximumParents(4))
    ));

    let mut tx = simple_tx();
    tx.outputs[0].script = vec![0u8; 257];
    assert!(matches!(
        tx.validate(),
        Err(TransactionError::ScriptTooLong(257))
    ));

    assert!(simple_tx().validate().is_ok());
}

#[test]
fn test_outputs_sum_skips_authorities() {
    let mut tx = simple_tx();
    tx.outputs
        .push(Output::new(0x03, hex::decode(P2PKH_SCRIPT).unwrap(), 0x81).unwrap());
    assert_eq!(tx.get_outputs_sum(), 1000);
}

#[test]
fn test_prepare_to_send() {
    let constants = WeightConstants {
        tx_weight_coefficient: 1.6,
        tx_min_weight: 14.0,
        tx_min_weight_k: 100.0,
    };
    let mut tx = simple_tx();
    tx.prepare_to_send(Some(&constants)).unwrap();
    assert!(tx.weight >= 14.0);
    assert!(tx.hash.is_some());

    let mut tx = simple_tx();
    assert!(matches!(
        tx.prepare_to_send(None),
        Err(TransactionError::ConstantNotSet)
    ));
}

// --- Token creation ----------------------------------------------------

fn create_token_tx() -> CreateTokenTransaction {
    let mut input = Input::new("01".repeat(32), 0);
    input.set_data(vec![0x01, 0x02]);
    let mint = Output::new(100, hex::decode(P2PKH_SCRIPT).unwrap(), 1).unwrap();
    let mut tx = CreateTokenTransaction::new(vec![input], vec![mint], "MyCoin", "MYC").unwrap();
    tx.transaction.weight = 17.0;
    tx.transaction.timestamp = Some(1_700_000_002);
    tx.transaction.parents = vec!["02".repeat(32), "03".repeat(32)];
    tx
}

#[test]
fn test_create_token_roundtrip() {
    let mut tx = create_token_tx();
    tx.update_hash().unwrap();
    let bytes = tx.to_bytes().unwrap();
    assert_eq!(bytes[1], CREATE_TOKEN_TX_VERSION);

    let decoded = CreateTokenTransaction::from_bytes(&bytes, Network::Mainnet).unwrap();
    assert_eq!(decoded.name, "MyCoin");
    assert_eq!(decoded.symbol, "MYC");
    assert_eq!(decoded.transaction.hash, tx.transaction.hash);
    assert_eq!(decoded.to_bytes().unwrap(), bytes);
}

#[test]
fn test_create_token_info_limits() {
    let long_name = "x".repeat(31);
    assert!(matches!(
        CreateTokenTransaction::new(vec![], vec![], long_name, "MYC"),
        Err(TransactionError::InvalidTokenInfo(_))
    ));
    assert!(matches!(
        CreateTokenTransaction::new(vec![], vec![], "MyCoin", ""),
        Err(TransactionError::InvalidTokenInfo(_))
    ));
    assert!(matches!(
        CreateTokenTransaction::new(vec![], vec![], "MyCoin", "TOOBIG"),
        Err(TransactionError::InvalidTokenInfo(_))
    ));
    assert!(CreateTokenTransaction::new(vec![], vec![], "MyCoin", "MYC").is_ok());
}

#[test]
fn test_create_token_sighash_covers_token_info() {
    let tx = create_token_tx();
    let data = tx.get_data_to_sign().unwrap();
    let hex = hex::encode(&data);
    assert!(hex.contains(&hex::encode("MyCoin".as_bytes())));
    assert!(hex.contains(&hex::encode("MYC".as_bytes())));
}

// --- Nano contracts ----------------------------------------------------

fn nano_header() -> NanoContractHeader {
    NanoContractHeader {
        id: "05".repeat(32),
        seqnum: 1,
        method: "swap".to_string(),
        args: vec![0x0a, 0x0b],
        actions: vec![NanoContractAction {
            kind: NanoContractActionKind::Deposit,
            token_index: 0,
            amount: 250,
        }],
        address: vec![0x28; 25],
        script: vec![0x51],
    }
}

#[test]
fn test_nano_contract_roundtrip() {
    let mut input = Input::new("01".repeat(32), 0);
    input.set_data(vec![0x01]);
    let mut nano = NanoContract::new(vec![input], vec![], nano_header());
    nano.transaction.weight = 17.0;
    nano.transaction.timestamp = Some(1_700_000_003);
    nano.transaction.parents = vec!["02".repeat(32), "03".repeat(32)];
    nano.transaction.update_hash().unwrap();

    let bytes = nano.transaction.to_bytes().unwrap();
    let decoded = Transaction::from_bytes(&bytes, Network::Mainnet).unwrap();
    assert!(decoded.is_nano_contract());
    let headers = decoded.get_nano_headers().unwrap();
    assert_eq!(headers.len(), 1);
    assert_eq!(*headers[0], nano_header());
    assert_eq!(decoded.hash, nano.transaction.hash);
}

#[test]
fn test_nano_sighash_excludes_caller_script() {
    let nano = {
        let mut nano = NanoContract::new(vec![], vec![], nano_header());
        nano.transaction.timestamp = Some(1_700_000_003);
        nano
    };
    let data = tx_data_to_sign(&nano.transaction);
    let full = nano.transaction.to_bytes().unwrap();
    // sighash drops the script length (2) and script (1), plus the nonce (4)
    assert_eq!(data.len(), full.len() - 2 - 1 - 4);
}

fn tx_data_to_sign(tx: &Transaction) -> Vec<u8> {
    tx.get_data_to_sign().unwrap()
}

#[test]
fn test_get_nano_headers_on_plain_tx() {
    let tx = simple_tx();
    assert!(!tx.is_nano_contract());
    assert!(matches!(
        tx.get_nano_headers(),
        Err(TransactionError::NanoHeaderNotFound)
    ));
}

#[test]
fn test_nano_is_initialize() {
    let mut header = nano_header();
    header.method = "initialize".to_string();
    let nano = NanoContract::new(vec![], vec![], header);
    assert!(nano.is_initialize().unwrap());
}

// --- On-chain blueprints ------------------------------------------------

#[test]
fn test_blueprint_roundtrip() {
    let mut tx = OnChainBlueprint::new(b"compressed code".to_vec(), vec![0x02; 33]);
    tx.signature = vec![0x30, 0x01, 0x00];
    tx.transaction.weight = 17.0;
    tx.transaction.timestamp = Some(1_700_000_004);
    tx.transaction.parents = vec!["02".repeat(32), "03".repeat(32)];
    tx.update_hash().unwrap();

    let bytes = tx.to_bytes().unwrap();
    assert_eq!(bytes[1], ON_CHAIN_BLUEPRINTS_VERSION);
    let decoded = OnChainBlueprint::from_bytes(&bytes, Network::Mainnet).unwrap();
    assert_eq!(decoded.code, tx.code);
    assert_eq!(decoded.pubkey, tx.pubkey);
    assert_eq!(decoded.signature, tx.signature);
    assert_eq!(decoded.transaction.hash, tx.transaction.hash);

    match tx_from_bytes(&bytes, Network::Mainnet).unwrap() {
        TxVariant::OnChainBlueprint(ocb) => {
            assert_eq!(ocb.transaction.hash, tx.transaction.hash)
        }
        other => panic!("expected a blueprint, got {other:?}"),
    }
}

#[test]
fn test_blueprint_sighash_excludes_signature() {
    let mut tx = OnChainBlueprint::new(b"code".to_vec(), vec![0x02; 33]);
    tx.transaction.timestamp = Some(1_700_000_004);
    let unsigned = tx.get_data_to_sign().unwrap();
    tx.signature = vec![0xff; 70];
    let signed = tx.get_data_to_sign().unwrap();
    assert_eq!(unsigned, signed);
}
