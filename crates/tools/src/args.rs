//! Lenient parsing of tool arguments.
//!
//! Models do not always emit strict JSON: single quotes and an extra layer of
//! surrounding quotes are common. Arguments are parsed strictly first and only
//! normalized when that fails, so apostrophes inside valid JSON survive.

use crate::error::ToolError;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Replace single quotes with double quotes and strip surrounding whitespace
/// and stray double quotes.
pub fn normalize_quotes(raw: &str) -> String {
    raw.replace('\'', "\"").trim().trim_matches('"').to_string()
}

/// Parse tool arguments, retrying once on the normalized text.
pub fn parse_arguments<T: DeserializeOwned>(raw: &str) -> Result<T, ToolError> {
    match serde_json::from_str(raw) {
        Ok(args) => Ok(args),
        Err(strict) => {
            debug!(error = %strict, "Arguments are not strict JSON, normalizing quotes");
            serde_json::from_str(&normalize_quotes(raw)).map_err(|e| ToolError::InvalidInput {
                cause: e.to_string(),
            })
        }
    }
}
