//! A model bound to a fixed system prompt that answers in JSON.

use crate::client::OpenAiClient;
use crate::error::OpenAiError;
use crate::types::Message;
use tracing::info;

/// Chat model with a fixed system prompt and temperature.
///
/// Every call sends the system prompt followed by one user prompt and asks
/// for a JSON-object reply.
#[derive(Clone)]
pub struct OpenAiModel {
    client: OpenAiClient,
    system_prompt: String,
    temperature: f32,
}

impl OpenAiModel {
    pub fn new(client: OpenAiClient, system_prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            client,
            system_prompt: system_prompt.into(),
            temperature,
        }
    }

    /// Send `prompt` and return the model's parsed JSON answer.
    pub async fn generate_text(&self, prompt: &str) -> Result<serde_json::Value, OpenAiError> {
        let messages = vec![
            Message::system(self.system_prompt.clone()),
            Message::user(prompt),
        ];

        let response = self
            .client
            .chat_json(messages, Some(self.temperature))
            .await?;

        info!(model = %self.client.model(), "Response from model: {}", response);
        Ok(response)
    }
}
