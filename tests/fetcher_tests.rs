//! Fetcher behaviour against mocked HTTP services

mod common;

use common::{config_for, gemini_path, gemini_reply, unreachable_config, ETHERSCAN_KEY, GEMINI_KEY};
use finbot::api::explorer::{TX_FAILED, TX_SUCCEEDED, TX_UNAVAILABLE};
use finbot::api::gemini::{GENERATION_UNAVAILABLE, NO_GENERATION};
use finbot::api::price::PRICE_UNAVAILABLE;
use finbot::ApiClient;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TX_HASH: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

// ============================================================================
// Price
// ============================================================================

#[tokio::test]
async fn price_success_formats_sentence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "ethereum"))
        .and(query_param("vs_currencies", "usd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ethereum": { "usd": 2500 } })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&config_for(&server)).unwrap();
    assert_eq!(client.eth_price().await, "Current Ethereum Price: $2500");
}

#[tokio::test]
async fn price_keeps_fractional_digits() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ethereum":{"usd":3012.45}}"#))
        .mount(&server)
        .await;

    let client = ApiClient::new(&config_for(&server)).unwrap();
    assert_eq!(client.eth_price().await, "Current Ethereum Price: $3012.45");
}

#[tokio::test]
async fn price_failures_collapse_to_apology() {
    for response in [
        ResponseTemplate::new(500),
        ResponseTemplate::new(429).set_body_string(r#"{"status":{"error_code":429}}"#),
        ResponseTemplate::new(200).set_body_string(r#"{"bitcoin":{"usd":1}}"#),
        ResponseTemplate::new(200).set_body_string(r#"{"ethereum":{}}"#),
        ResponseTemplate::new(200).set_body_string("<html>oops</html>"),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(response).mount(&server).await;

        let client = ApiClient::new(&config_for(&server)).unwrap();
        assert_eq!(client.eth_price().await, PRICE_UNAVAILABLE);
    }
}

#[tokio::test]
async fn price_transport_error_collapses_to_apology() {
    let client = ApiClient::new(&unreachable_config()).unwrap();
    assert_eq!(client.eth_price().await, PRICE_UNAVAILABLE);
}

// ============================================================================
// Transaction status
// ============================================================================

async fn explorer_with_status(status: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("module", "transaction"))
        .and(query_param("action", "gettxreceiptstatus"))
        .and(query_param("txhash", TX_HASH))
        .and(query_param("apikey", ETHERSCAN_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "1",
            "message": "OK",
            "result": { "status": status }
        })))
        .expect(1)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn transaction_status_one_is_success() {
    let server = explorer_with_status("1").await;
    let client = ApiClient::new(&config_for(&server)).unwrap();
    assert_eq!(client.transaction_status(TX_HASH).await, TX_SUCCEEDED);
}

#[tokio::test]
async fn transaction_status_zero_is_failure() {
    let server = explorer_with_status("0").await;
    let client = ApiClient::new(&config_for(&server)).unwrap();
    assert_eq!(client.transaction_status(TX_HASH).await, TX_FAILED);
}

#[tokio::test]
async fn transaction_error_result_string_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "0",
            "message": "NOTOK",
            "result": "Invalid API Key"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(&config_for(&server)).unwrap();
    assert_eq!(client.transaction_status(TX_HASH).await, TX_FAILED);
}

#[tokio::test]
async fn transaction_lookup_failures_collapse_to_apology() {
    for response in [
        ResponseTemplate::new(502),
        ResponseTemplate::new(200).set_body_string(r#"{"status":"1"}"#),
        ResponseTemplate::new(200).set_body_string(r#"{"result":null}"#),
        ResponseTemplate::new(200).set_body_string("not json"),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(response).mount(&server).await;

        let client = ApiClient::new(&config_for(&server)).unwrap();
        assert_eq!(client.transaction_status(TX_HASH).await, TX_UNAVAILABLE);
    }

    let client = ApiClient::new(&unreachable_config()).unwrap();
    assert_eq!(client.transaction_status(TX_HASH).await, TX_UNAVAILABLE);
}

#[tokio::test]
async fn transaction_lookup_without_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.etherscan_api_key = None;
    let client = ApiClient::new(&config).unwrap();
    assert_eq!(client.transaction_status(TX_HASH).await, TX_UNAVAILABLE);
}

// ============================================================================
// Gemini
// ============================================================================

#[tokio::test]
async fn gemini_sends_envelope_and_returns_first_part() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(gemini_path("gemini-2.0-flash")))
        .and(query_param("key", GEMINI_KEY))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "contents": [{ "parts": [{ "text": "Explain gas fees" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("Gas pays for computation.")))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(&config_for(&server)).unwrap();
    assert_eq!(client.generate("Explain gas fees").await, "Gas pays for computation.");
}

#[tokio::test]
async fn gemini_uses_configured_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(gemini_path("gemini-1.5-pro")))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("pro answer")))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.model = "gemini-1.5-pro".to_string();
    let client = ApiClient::new(&config).unwrap();
    assert_eq!(client.model(), "gemini-1.5-pro");
    assert_eq!(client.generate("hi").await, "pro answer");
}

#[tokio::test]
async fn gemini_malformed_envelope_is_no_generation() {
    for body in [
        serde_json::json!({}),
        serde_json::json!({ "candidates": [] }),
        serde_json::json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
        serde_json::json!({ "candidates": [{ "content": { "parts": [] } }] }),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = ApiClient::new(&config_for(&server)).unwrap();
        assert_eq!(client.generate("anything").await, NO_GENERATION);
    }
}

#[tokio::test]
async fn gemini_http_and_transport_errors_are_apologies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":{"code":400}}"#))
        .mount(&server)
        .await;
    let client = ApiClient::new(&config_for(&server)).unwrap();
    assert_eq!(client.generate("anything").await, GENERATION_UNAVAILABLE);

    let client = ApiClient::new(&unreachable_config()).unwrap();
    assert_eq!(client.generate("anything").await, GENERATION_UNAVAILABLE);
}

#[tokio::test]
async fn gemini_without_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.gemini_api_key = None;
    let client = ApiClient::new(&config).unwrap();
    assert_eq!(client.generate("hi").await, GENERATION_UNAVAILABLE);
}
