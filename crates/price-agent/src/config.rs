//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use price_scraper::WaitPolicy;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// OpenAI API key (`OPENAI_API_KEY`, usually exported by the env file)
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// OpenAI endpoint configuration
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Browser and page-wait configuration for the price scraper
    #[serde(default)]
    pub scraper: ScraperConfig,

    /// CoinGecko configuration
    #[serde(default)]
    pub coingecko: CoinGeckoConfig,

    /// Tools configuration
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// API base URL
    #[serde(default = "default_openai_url")]
    pub base_url: String,

    /// Chat model
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub temperature: f32,

    /// Request timeout
    #[serde(default = "default_openai_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// System prompt sent ahead of every `ask`
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Chromium binary; looked up on PATH when unset
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub headless: bool,

    /// Visible text of the cookie-consent accept button
    #[serde(default = "default_consent_label")]
    pub consent_label: String,

    #[serde(default = "default_consent_timeout", with = "humantime_serde")]
    pub consent_timeout: Duration,

    #[serde(default = "default_results_timeout", with = "humantime_serde")]
    pub results_timeout: Duration,

    #[serde(default = "default_poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,

    /// Pause between rendering and closing the browser
    #[serde(default = "default_settle_delay", with = "humantime_serde")]
    pub settle_delay: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinGeckoConfig {
    #[serde(default = "default_coingecko_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolsConfig {
    /// Per-call execution deadline
    #[serde(default = "default_tool_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Tool output cap, in characters
    #[serde(default = "default_max_response_len")]
    pub max_response_len: usize,

    #[serde(default)]
    pub bitcoin_stats: ToolToggle,

    #[serde(default)]
    pub crypto_stats: ToolToggle,

    #[serde(default)]
    pub cheapest_option: ToolToggle,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolToggle {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl ScraperConfig {
    /// The bounded waits the page acquirer runs with.
    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy {
            consent_timeout: self.consent_timeout,
            results_timeout: self.results_timeout,
            poll_interval: self.poll_interval,
            settle_delay: self.settle_delay,
        }
    }
}

// Default implementations
impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: default_openai_url(),
            model: default_model(),
            temperature: 0.0,
            timeout: default_openai_timeout(),
            system_prompt: default_system_prompt(),
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            headless: default_true(),
            consent_label: default_consent_label(),
            consent_timeout: default_consent_timeout(),
            results_timeout: default_results_timeout(),
            poll_interval: default_poll_interval(),
            settle_delay: default_settle_delay(),
        }
    }
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: default_coingecko_url(),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            timeout: default_tool_timeout(),
            max_response_len: default_max_response_len(),
            bitcoin_stats: ToolToggle::default(),
            crypto_stats: ToolToggle::default(),
            cheapest_option: ToolToggle::default(),
        }
    }
}

impl Default for ToolToggle {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

// Default value functions
fn default_openai_url() -> String {
    openai_client::DEFAULT_BASE_URL.into()
}

fn default_model() -> String {
    "gpt-3.5-turbo".into()
}

fn default_openai_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_system_prompt() -> String {
    r#"You are an assistant that answers shopping and cryptocurrency questions.

Reply with a single JSON object. When a question needs live data, name the tool to call and its arguments:
- get_cheapest_option: {"product_name": "<product>"}
- bitcoin_stats: {"currency": "<vs currency>", "fields": ["current_price", ...]}
- crypto_stats: {"crypto_id": "<coingecko id>", "fields": ["current_price", ...]}"#
        .into()
}

fn default_consent_label() -> String {
    price_scraper::pricerunner::CONSENT_LABEL.into()
}

fn default_consent_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_results_timeout() -> Duration {
    Duration::from_secs(15)
}

fn default_poll_interval() -> Duration {
    Duration::from_millis(250)
}

fn default_settle_delay() -> Duration {
    Duration::from_secs(5)
}

fn default_coingecko_url() -> String {
    tools::builtin::coingecko::DEFAULT_BASE_URL.into()
}

fn default_tool_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_max_response_len() -> usize {
    4000
}

fn default_log_level() -> String {
    "info".into()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_source(config::Environment::default())
    }

    /// Build configuration from an explicit set of variables instead of the
    /// process environment.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::from_source(config::Environment::default().source(Some(vars.into_iter().collect())))
    }

    fn from_source(environment: config::Environment) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(
                environment
                    .separator("__")
                    // Keep values as strings; typed fields convert on deserialize.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
