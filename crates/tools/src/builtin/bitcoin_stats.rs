//! Bitcoin market statistics from CoinGecko.

use super::coingecko::{fields_schema, format_stats, CoinGeckoClient, NO_DATA};
use crate::args::parse_arguments;
use crate::error::ToolError;
use crate::types::{Tool, ToolDefinition};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const TOOL_NAME: &str = "bitcoin_stats";

/// Current Bitcoin statistics in a chosen currency.
pub struct BitcoinStatsTool {
    coingecko: CoinGeckoClient,
}

#[derive(Deserialize)]
struct BitcoinStatsArgs {
    currency: String,
    fields: Vec<String>,
}

impl BitcoinStatsTool {
    pub fn new(coingecko: CoinGeckoClient) -> Self {
        Self { coingecko }
    }
}

impl Default for BitcoinStatsTool {
    fn default() -> Self {
        Self::new(CoinGeckoClient::new())
    }
}

#[async_trait]
impl Tool for BitcoinStatsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(
            TOOL_NAME,
            "Get current Bitcoin statistics (price, market cap, volume, ...) from CoinGecko in the given currency.",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "currency": {
                        "type": "string",
                        "description": "Quote currency code (e.g., 'usd', 'eur', 'sek')"
                    },
                    "fields": fields_schema()
                },
                "required": ["currency", "fields"]
            }),
        )
    }

    fn name(&self) -> &str {
        TOOL_NAME
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: BitcoinStatsArgs = parse_arguments(arguments)?;

        let currency = args.currency.trim().to_lowercase();
        if currency.is_empty() {
            return Err(ToolError::InvalidArguments("Empty currency".into()));
        }

        debug!(currency = %currency, fields = ?args.fields, "Fetching Bitcoin statistics");
        match self.coingecko.market(&currency, "bitcoin").await? {
            Some(market) => Ok(format_stats("Bitcoin", &market, &args.fields, TOOL_NAME)),
            None => Ok(NO_DATA.into()),
        }
    }
}
