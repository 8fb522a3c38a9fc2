//! Statistics for any CoinGecko-listed cryptocurrency.

use super::coingecko::{capitalize, fields_schema, format_stats, CoinGeckoClient, NO_DATA};
use crate::args::parse_arguments;
use crate::error::ToolError;
use crate::types::{Tool, ToolDefinition};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const TOOL_NAME: &str = "crypto_stats";

/// Market statistics for a CoinGecko coin id.
pub struct CryptoStatsTool {
    coingecko: CoinGeckoClient,
}

#[derive(Deserialize)]
struct CryptoStatsArgs {
    crypto_id: String,
    fields: Vec<String>,
    #[serde(default = "default_currency")]
    currency: String,
}

fn default_currency() -> String {
    "usd".into()
}

impl CryptoStatsTool {
    pub fn new(coingecko: CoinGeckoClient) -> Self {
        Self { coingecko }
    }
}

impl Default for CryptoStatsTool {
    fn default() -> Self {
        Self::new(CoinGeckoClient::new())
    }
}

#[async_trait]
impl Tool for CryptoStatsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function(
            TOOL_NAME,
            "Get current market statistics for a cryptocurrency by its CoinGecko id (e.g. 'ethereum', 'solana').",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "crypto_id": {
                        "type": "string",
                        "description": "CoinGecko coin id (e.g., 'ethereum', 'matic-network')"
                    },
                    "fields": fields_schema(),
                    "currency": {
                        "type": "string",
                        "description": "Quote currency code, defaults to 'usd'"
                    }
                },
                "required": ["crypto_id", "fields"]
            }),
        )
    }

    fn name(&self) -> &str {
        TOOL_NAME
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: CryptoStatsArgs = parse_arguments(arguments)?;

        let crypto_id = args.crypto_id.trim().to_lowercase();
        if crypto_id.is_empty() {
            return Err(ToolError::InvalidArguments("Empty crypto_id".into()));
        }
        let currency = args.currency.trim().to_lowercase();
        if currency.is_empty() {
            return Err(ToolError::InvalidArguments("Empty currency".into()));
        }

        debug!(crypto_id = %crypto_id, currency = %currency, "Fetching crypto statistics");
        match self.coingecko.market(&currency, &crypto_id).await? {
            Some(market) => Ok(format_stats(
                &capitalize(&crypto_id),
                &market,
                &args.fields,
                TOOL_NAME,
            )),
            None => Ok(NO_DATA.into()),
        }
    }
}
