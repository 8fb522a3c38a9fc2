//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "price-agent",
    version,
    about = "Price comparison and crypto market tools for an LLM agent"
)]
pub struct Cli {
    /// YAML file of KEY: value pairs to export as environment variables
    /// [default: configs/config.yaml, if present]
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List the enabled tools
    Tools,

    /// Run one tool and print its result
    Run {
        /// Tool name, e.g. get_cheapest_option
        tool: String,

        /// Tool arguments as a JSON object (single quotes are accepted)
        arguments: String,
    },

    /// Send a prompt to the model and print its JSON answer
    Ask {
        prompt: String,
    },
}
