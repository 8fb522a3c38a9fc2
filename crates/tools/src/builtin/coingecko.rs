//! Shared CoinGecko market-data access for the crypto tools.

use crate::error::ToolError;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

/// Public CoinGecko API (free tier, no key).
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Sentinel returned when the market list is empty.
pub const NO_DATA: &str = "No data received from the API.";

const FIELD_NOT_AVAILABLE: &str = "Field not available";

/// Thin client for `GET /coins/markets`.
#[derive(Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the market entry for `coin_id` priced in `vs_currency`.
    ///
    /// `Ok(None)` when the API returns an empty list.
    #[instrument(skip(self))]
    pub async fn market(
        &self,
        vs_currency: &str,
        coin_id: &str,
    ) -> Result<Option<Map<String, Value>>, ToolError> {
        let response = self
            .client
            .get(format!("{}/coins/markets", self.base_url))
            .header("Accept", "application/json")
            .query(&[("vs_currency", vs_currency), ("ids", coin_id)])
            .send()
            .await?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(ToolError::RateLimit);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::ExternalService(format!(
                "Error during API request: {} - {}",
                status, body
            )));
        }

        let markets: Vec<Map<String, Value>> = response.json().await?;
        debug!(count = markets.len(), "Received market data");
        Ok(markets.into_iter().next())
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the requested `fields` of `market` under a `<title> Statistics:`
/// heading, tagged with the producing tool.
pub(crate) fn format_stats(
    title: &str,
    market: &Map<String, Value>,
    fields: &[String],
    tool_name: &str,
) -> String {
    let mut output = format!("\n\n{} Statistics:\n", title);
    for field in fields {
        let value = market
            .get(field)
            .map(render_value)
            .unwrap_or_else(|| FIELD_NOT_AVAILABLE.to_string());
        output.push_str(&format!("{}: {}\n", field, value));
    }
    output.push_str(&format!("Fetched using {}.", tool_name));
    output
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Upper-case the first character, lower-case the rest.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// JSON Schema for the `fields` argument shared by both crypto tools.
pub(crate) fn fields_schema() -> Value {
    serde_json::json!({
        "type": "array",
        "items": { "type": "string" },
        "description": "CoinGecko market fields to return, e.g. [\"current_price\", \"market_cap\", \"total_volume\"]"
    })
}
