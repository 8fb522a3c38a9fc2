//! Command-line agent exposing the price-comparison and crypto tools.

pub mod cli;
pub mod commands;
pub mod config;
pub mod env_file;
pub mod error;
