//! Exports a YAML file of `KEY: value` pairs into the process environment.
//!
//! Runs before [`Config::load`](crate::config::Config::load) so that keys
//! kept in `configs/config.yaml` (for example `OPENAI_API_KEY`) reach the
//! typed configuration like any other environment variable.

use anyhow::{bail, Context, Result};
use serde_yml::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Env file read when `--env-file` is not given, if it exists.
pub const DEFAULT_ENV_FILE: &str = "configs/config.yaml";

/// Read `path` and set every entry as an environment variable, overriding
/// existing values. Returns the number of variables set.
pub fn load_env_file(path: &Path) -> Result<usize> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read env file {}", path.display()))?;

    let entries = parse_env_file(&text)
        .with_context(|| format!("Invalid env file {}", path.display()))?;

    for (key, value) in &entries {
        std::env::set_var(key, value);
    }

    Ok(entries.len())
}

/// Parse a YAML mapping into `(KEY, value)` pairs, stringifying scalars.
pub fn parse_env_file(text: &str) -> Result<Vec<(String, String)>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mapping: BTreeMap<String, Value> =
        serde_yml::from_str(text).context("expected a mapping of KEY: value pairs")?;

    mapping
        .into_iter()
        .map(|(key, value)| {
            if key.is_empty() || key.contains('=') || key.contains('\0') {
                bail!("invalid variable name {:?}", key);
            }
            let value = scalar_to_string(&key, value)?;
            Ok((key, value))
        })
        .collect()
}

fn scalar_to_string(key: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        _ => bail!("value of {} must be a string, number or boolean", key),
    }
}
