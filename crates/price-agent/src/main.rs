//! Price agent - Main entry point.

use anyhow::Context;
use clap::Parser;
use price_agent::cli::{Cli, Command};
use price_agent::commands;
use price_agent::config::Config;
use price_agent::env_file::{load_env_file, DEFAULT_ENV_FILE};
use price_agent::error::AppResult;
use std::path::Path;
use std::process::ExitCode;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<ExitCode> {
    let cli = Cli::parse();

    // Export env-file entries before anything reads the environment
    let env_file = match &cli.env_file {
        Some(path) => Some(load_env_file(path).map(|count| (path.as_path(), count))?),
        None => {
            let default = Path::new(DEFAULT_ENV_FILE);
            if default.exists() {
                Some(load_env_file(default).map(|count| (default, count))?)
            } else {
                None
            }
        }
    };

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log_level);

    match env_file {
        Some((path, count)) => info!("Exported {} variables from {}", count, path.display()),
        None => debug!("No env file found at {}", DEFAULT_ENV_FILE),
    }

    match cli.command {
        Command::Tools => {
            let registry = commands::build_registry(&config);
            println!("{}", commands::list_tools(&registry));
        }
        Command::Run { tool, arguments } => {
            let executor = commands::build_executor(&config);
            let result = commands::run_tool(&executor, &tool, &arguments).await;
            println!("{}", result.content);
            if !result.success {
                warn!(tool = %tool, "Tool call failed");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Ask { prompt } => {
            let answer = commands::ask(&config, &prompt).await?;
            println!("{}", serde_json::to_string_pretty(&answer)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
