//! Tool execution errors.

use thiserror::Error;

/// Errors that can occur during tool execution.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Tool execution timed out.
    #[error("Tool timed out after {0} seconds")]
    Timeout(u64),

    /// Arguments were not parseable JSON, even after normalization.
    #[error("{cause}. Invalid input format. Please provide a valid JSON string.")]
    InvalidInput { cause: String },

    /// Arguments parsed but are not usable.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded")]
    RateLimit,

    /// External service returned an error.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Browser-driven scraping failed.
    #[error("Scrape error: {0}")]
    Scrape(#[from] price_scraper::ScrapeError),
}
