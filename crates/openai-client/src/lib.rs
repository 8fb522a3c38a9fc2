//! OpenAI-compatible chat completions client.

mod client;
mod error;
mod model;
mod types;

pub use client::{OpenAiClient, DEFAULT_BASE_URL};
pub use error::OpenAiError;
pub use model::OpenAiModel;
pub use types::*;
