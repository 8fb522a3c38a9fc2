//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("OpenAI error: {0}")]
    OpenAi(#[from] openai_client::OpenAiError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing setting: {0}")]
    MissingSetting(&'static str),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
