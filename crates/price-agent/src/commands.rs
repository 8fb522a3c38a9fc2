//! Subcommand implementations and tool wiring.

use crate::config::Config;
use crate::error::{AppError, AppResult};
use openai_client::{OpenAiClient, OpenAiModel};
use price_scraper::{ChromiumLauncher, PriceScraper, SiteProfile};
use std::sync::Arc;
use tools::builtin::{BitcoinStatsTool, CheapestOptionTool, CoinGeckoClient, CryptoStatsTool};
use tools::{Tool, ToolCall, ToolExecutor, ToolRegistry, ToolResult};
use tracing::info;

/// Register the built-in tools, disabling those switched off in config.
pub fn build_registry(config: &Config) -> ToolRegistry {
    let coingecko = CoinGeckoClient::with_base_url(&config.coingecko.base_url);

    let mut launcher = ChromiumLauncher::new().with_headless(config.scraper.headless);
    if let Some(path) = &config.scraper.chrome_path {
        launcher = launcher.with_chrome_path(path);
    }
    let scraper = PriceScraper::new(Arc::new(launcher))
        .with_profile(SiteProfile::pricerunner().with_consent_label(&config.scraper.consent_label))
        .with_waits(config.scraper.wait_policy());

    let tools: Vec<(Arc<dyn Tool>, bool)> = vec![
        (
            Arc::new(BitcoinStatsTool::new(coingecko.clone())),
            config.tools.bitcoin_stats.enabled,
        ),
        (
            Arc::new(CryptoStatsTool::new(coingecko)),
            config.tools.crypto_stats.enabled,
        ),
        (
            Arc::new(CheapestOptionTool::new(scraper)),
            config.tools.cheapest_option.enabled,
        ),
    ];

    let mut registry = ToolRegistry::new();
    for (tool, enabled) in tools {
        let name = tool.name().to_string();
        registry.register(tool);
        if !enabled {
            registry.disable(&name);
            info!(tool = %name, "Tool disabled by configuration");
        }
    }
    registry
}

pub fn build_executor(config: &Config) -> ToolExecutor {
    ToolExecutor::new(Arc::new(build_registry(config)))
        .with_timeout(config.tools.timeout)
        .with_max_response_len(config.tools.max_response_len)
}

/// One `name: description` line per enabled tool.
pub fn list_tools(registry: &ToolRegistry) -> String {
    registry
        .get_definitions()
        .into_iter()
        .map(|def| format!("{}: {}", def.function.name, def.function.description))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn run_tool(executor: &ToolExecutor, tool: &str, arguments: &str) -> ToolResult {
    executor
        .execute(&ToolCall::new("cli-1", tool, arguments))
        .await
}

/// Ask the configured model; the answer is always a JSON value.
pub async fn ask(config: &Config, prompt: &str) -> AppResult<serde_json::Value> {
    let api_key = config
        .openai_api_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or(AppError::MissingSetting("OPENAI_API_KEY"))?;

    let client = OpenAiClient::new(
        api_key,
        &config.openai.base_url,
        &config.openai.model,
        config.openai.timeout,
    )?;
    let model = OpenAiModel::new(
        client,
        &config.openai.system_prompt,
        config.openai.temperature,
    );

    Ok(model.generate_text(prompt).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(vars).unwrap()
    }

    #[test]
    fn test_registry_has_all_tools() {
        let registry = build_registry(&config(&[]));
        assert_eq!(
            registry.list_enabled(),
            vec!["bitcoin_stats", "crypto_stats", "get_cheapest_option"]
        );
    }

    #[test]
    fn test_registry_respects_toggles() {
        let registry = build_registry(&config(&[
            ("TOOLS__BITCOIN_STATS__ENABLED", "false"),
            ("TOOLS__CHEAPEST_OPTION__ENABLED", "false"),
        ]));
        assert_eq!(registry.list_enabled(), vec!["crypto_stats"]);
        assert!(registry.get_tool("get_cheapest_option").is_none());
    }

    #[test]
    fn test_list_tools() {
        let registry = build_registry(&config(&[
            ("TOOLS__BITCOIN_STATS__ENABLED", "false"),
            ("TOOLS__CRYPTO_STATS__ENABLED", "false"),
        ]));
        let listing = list_tools(&registry);
        assert!(listing.starts_with("get_cheapest_option: "));
        assert_eq!(listing.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_ask_requires_api_key() {
        let result = ask(&config(&[]), "cheapest macbook?").await;
        assert!(matches!(
            result,
            Err(AppError::MissingSetting("OPENAI_API_KEY"))
        ));
    }
}
