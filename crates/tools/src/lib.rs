//! Tools callable by the agent.

mod args;
mod error;
mod types;
mod registry;
mod executor;
pub mod builtin;

pub use args::{normalize_quotes, parse_arguments};
pub use error::ToolError;
pub use types::*;
pub use registry::ToolRegistry;
pub use executor::ToolExecutor;
