//! CLI module for users-api
//!
//! Provides command-line interface for:
//! - serve: Load configuration, connect the pool and run the HTTP server
//! - check-config: Print the effective configuration

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command, ServeArgs};
pub use commands::{check_config, effective_config, run, run_command, serve};
pub use config::AppConfig;
pub use errors::{CliError, CliErrorCode, CliResult};
