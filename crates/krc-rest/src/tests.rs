//! Tests for the REST client.

use std::time::Duration;

use krc_primitives::chainhash::Hash;
use krc_primitives::ec::PrivateKey;
use krc_script::{Address, Network};
use krc_transaction::{build_mint, sign, LedgerError, NetworkClient, SignedTransaction, Ticker, Utxo};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::client::RestClient;
use crate::error::RestError;
use crate::types::RestConfig;

const TXID: &str = "b0ed5f5d029d5ce7a2b4dbbcbfb0a1e43e4b6a4fd5ad7e2c6bca4b5e48b4cd0f";

fn test_config(base_url: &str) -> RestConfig {
    RestConfig {
        base_url: base_url.to_string(),
        api_key: Some("test-key".to_string()),
        timeout: Duration::from_secs(5),
    }
}

fn key() -> PrivateKey {
    PrivateKey::from_hex("0000000000000000000000000000000000000000000000000000000000000001")
        .unwrap()
}

fn address() -> Address {
    Address::from_public_key(&key().pub_key(), Network::Mainnet)
}

fn utxo_entry(txid: &str, index: u32, amount: &str) -> serde_json::Value {
    serde_json::json!({
        "outpoint": { "transactionId": txid, "index": index },
        "utxoEntry": {
            "amount": amount,
            "scriptPublicKey": { "scriptPublicKey": address().locking_script().to_hex() }
        }
    })
}

fn signed_mint() -> SignedTransaction {
    let utxos = [Utxo {
        transaction_id: Hash::from_hex(TXID).unwrap(),
        output_index: 1,
        value_sompi: 10_000,
        owner_script: address().locking_script(),
    }];
    let unsigned = build_mint(&utxos, &address(), &Ticker::new("KAS").unwrap(), 0).unwrap();
    sign(unsigned, &key()).unwrap()
}

#[test]
fn test_network_defaults() {
    let main = RestConfig::for_network(Network::Mainnet);
    assert_eq!(main.base_url, "https://api.kaspa.org");
    assert_eq!(main.timeout, Duration::from_secs(30));
    assert!(main.api_key.is_none());
    assert_eq!(RestConfig::for_network(Network::Testnet).base_url, "https://api-tn10.kaspa.org");
    assert_eq!(RestConfig::default().base_url, main.base_url);
}

#[tokio::test]
async fn test_get_utxos() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/addresses/{}/utxos", address())))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            utxo_entry(TXID, 0, "150000"),
            utxo_entry(TXID, 3, "2500"),
        ])))
        .mount(&server)
        .await;

    let client = RestClient::new(test_config(&server.uri())).unwrap();
    let utxos = client.get_utxos_async(&address()).await.unwrap();

    assert_eq!(utxos.len(), 2);
    assert_eq!(utxos[0].transaction_id.to_string(), TXID);
    assert_eq!(utxos[0].value_sompi, 150_000);
    assert_eq!(utxos[1].output_index, 3);
    assert_eq!(utxos[1].owner_script, address().locking_script());
}

#[tokio::test]
async fn test_malformed_utxo_amount() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/addresses/{}/utxos", address())))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([utxo_entry(TXID, 0, "lots")])),
        )
        .mount(&server)
        .await;

    let client = RestClient::new(test_config(&server.uri())).unwrap();
    let err = client.get_utxos_async(&address()).await.unwrap_err();
    assert!(matches!(err, RestError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_get_balance() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/addresses/{}/balance", address())))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": address().to_string(),
            "balance": 4200
        })))
        .mount(&server)
        .await;

    let client = RestClient::new(test_config(&server.uri())).unwrap();
    assert_eq!(client.get_balance_async(&address()).await.unwrap(), 4200);
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/addresses/{}/balance", address())))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = RestClient::new(test_config(&server.uri())).unwrap();
    let err = client.get_balance_async(&address()).await.unwrap_err();
    match LedgerError::from(err) {
        LedgerError::Http { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_submit_transaction() {
    let server = MockServer::start().await;
    let signed = signed_mint();

    Mock::given(method("POST"))
        .and(path("/transactions"))
        .and(body_partial_json(serde_json::json!({
            "transaction": {
                "version": 0,
                "lockTime": 0
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactionId": signed.tx_id().to_string()
        })))
        .mount(&server)
        .await;

    let client = RestClient::new(test_config(&server.uri())).unwrap();
    let id = client.submit_async(&signed).await.unwrap();
    assert_eq!(id, signed.tx_id());
}

#[tokio::test]
async fn test_rejected_transaction() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "orphan transaction"
        })))
        .mount(&server)
        .await;

    let client = RestClient::new(test_config(&server.uri())).unwrap();
    let err = client.submit_async(&signed_mint()).await.unwrap_err();
    assert!(err.to_string().contains("orphan transaction"));
    assert!(matches!(LedgerError::from(err), LedgerError::Rejected(_)));
}

#[tokio::test]
async fn test_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/addresses/{}/balance", address())))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "address": "x", "balance": 1 }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = RestClient::new(RestConfig {
        timeout: Duration::from_millis(200),
        ..test_config(&server.uri())
    })
    .unwrap();
    let err = client.get_balance_async(&address()).await.unwrap_err();
    assert!(matches!(LedgerError::from(err), LedgerError::Timeout));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_blocking_trait_inside_multi_thread_runtime() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/addresses/{}/balance", address())))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": address().to_string(),
            "balance": 77
        })))
        .mount(&server)
        .await;

    let client = RestClient::new(test_config(&server.uri())).unwrap();
    assert_eq!(NetworkClient::get_balance(&client, &address()).unwrap(), 77);
}

#[tokio::test]
async fn test_blocking_trait_refuses_current_thread_runtime() {
    let client = RestClient::new(test_config("http://127.0.0.1:9")).unwrap();
    let err = NetworkClient::get_balance(&client, &address()).unwrap_err();
    assert!(matches!(err, LedgerError::Transport(_)));
}

#[test]
fn test_blocking_trait_outside_runtime() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/addresses/{}/utxos", address())))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([utxo_entry(TXID, 2, "9000")])),
            )
            .mount(&server)
            .await;
        server
    });

    let client = RestClient::new(test_config(&server.uri())).unwrap();
    let utxos = NetworkClient::get_utxos(&client, &address()).unwrap();
    assert_eq!(utxos.len(), 1);
    assert_eq!(utxos[0].value_sompi, 9000);
    rt.block_on(async move { drop(server) });
}

#[test]
fn test_submit_request_shape() {
    let signed = signed_mint();
    let body = serde_json::to_value(crate::types::SubmitRequest::from(&signed)).unwrap();
    let tx = &body["transaction"];

    assert_eq!(tx["inputs"][0]["previousOutpoint"]["transactionId"], TXID);
    assert_eq!(tx["inputs"][0]["previousOutpoint"]["index"], 1);
    assert_eq!(tx["inputs"][0]["sequence"], u32::MAX);
    let sig_script = tx["inputs"][0]["signatureScript"].as_str().unwrap();
    assert_eq!(
        sig_script,
        signed.tx().inputs[0].signature_script.as_ref().unwrap().to_hex()
    );
    assert_eq!(tx["outputs"][0]["amount"], 0);
    assert_eq!(tx["outputs"][1]["amount"], 8_000);
    assert_eq!(
        tx["outputs"][1]["scriptPublicKey"]["scriptPublicKey"],
        address().locking_script().to_hex()
    );
}
