#![allow(dead_code)]

use finbot::Config;
use wiremock::MockServer;

pub const GEMINI_KEY: &str = "test-gemini-key";
pub const ETHERSCAN_KEY: &str = "test-etherscan-key";

/// Nothing listens here, so every request fails at connect time.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Config with every endpoint pointed at `server` and both keys set
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.gemini_api_key = Some(GEMINI_KEY.to_string());
    config.etherscan_api_key = Some(ETHERSCAN_KEY.to_string());
    config.endpoints.gemini_base_url = server.uri();
    config.endpoints.price_base_url = server.uri();
    config.endpoints.explorer_base_url = format!("{}/api", server.uri());
    config
}

/// Config whose endpoints all refuse connections
pub fn unreachable_config() -> Config {
    let mut config = Config::default();
    config.gemini_api_key = Some(GEMINI_KEY.to_string());
    config.etherscan_api_key = Some(ETHERSCAN_KEY.to_string());
    config.endpoints.gemini_base_url = UNREACHABLE.to_string();
    config.endpoints.price_base_url = UNREACHABLE.to_string();
    config.endpoints.explorer_base_url = format!("{}/api", UNREACHABLE);
    config
}

pub fn gemini_path(model: &str) -> String {
    format!("/v1/models/{}:generateContent", model)
}

pub fn gemini_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP"
        }]
    })
}
