//! Common test utilities for integration tests.

use price_agent::config::Config;
use std::collections::HashMap;
use wiremock::MockServer;

/// Start a mock server standing in for CoinGecko or OpenAI.
pub async fn mock_server() -> MockServer {
    MockServer::start().await
}

/// Configuration pointing both HTTP collaborators at `server`.
pub fn test_config(server: &MockServer, extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("OPENAI_API_KEY".to_string(), "test-api-key".to_string()),
        ("OPENAI__BASE_URL".to_string(), server.uri()),
        ("OPENAI__MODEL".to_string(), "test-model".to_string()),
        ("OPENAI__TIMEOUT".to_string(), "5s".to_string()),
        ("COINGECKO__BASE_URL".to_string(), server.uri()),
    ]);
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }
    Config::from_vars(vars).unwrap()
}
