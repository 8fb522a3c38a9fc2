//! Tool executor with timeout and error handling.

use crate::error::ToolError;
use crate::registry::ToolRegistry;
use crate::types::{ToolCall, ToolResult};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// Runs tool calls with an overall deadline and an output cap.
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
    timeout: Duration,
    max_response_len: usize,
}

impl ToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            timeout: Duration::from_secs(60),
            max_response_len: 4000,
        }
    }

    /// Set the execution deadline. The scraper alone may need consent wait,
    /// result wait and settle delay, so keep this well above their sum.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set maximum response length in characters.
    pub fn with_max_response_len(mut self, len: usize) -> Self {
        self.max_response_len = len;
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Execute a tool call.
    pub async fn execute(&self, tool_call: &ToolCall) -> ToolResult {
        let tool_name = &tool_call.function.name;
        info!(tool = %tool_name, "Executing tool");

        let tool = match self.registry.get_tool(tool_name) {
            Some(t) => t,
            None => {
                warn!(tool = %tool_name, "Tool not found or disabled");
                return ToolResult::error(
                    &tool_call.id,
                    format!("Tool '{}' not available", tool_name),
                );
            }
        };

        let result = timeout(self.timeout, tool.execute(&tool_call.function.arguments)).await;

        match result {
            Ok(Ok(content)) => {
                let content = truncate(content, self.max_response_len);
                info!(tool = %tool_name, len = content.len(), "Tool executed successfully");
                ToolResult::success(&tool_call.id, content)
            }
            Ok(Err(e)) => {
                error!(tool = %tool_name, error = %e, "Tool execution failed");
                ToolResult::error(&tool_call.id, format!("Error: {}", e))
            }
            Err(_) => {
                let e = ToolError::Timeout(self.timeout.as_secs());
                error!(tool = %tool_name, timeout = ?self.timeout, "Tool timed out");
                ToolResult::error(&tool_call.id, e.to_string())
            }
        }
    }
}

fn truncate(content: String, max_chars: usize) -> String {
    let total = content.chars().count();
    if total <= max_chars {
        return content;
    }
    let kept: String = content.chars().take(max_chars).collect();
    format!("{}... [truncated, {} chars total]", kept, total)
}
