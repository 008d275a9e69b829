//! CLI argument definitions using clap
//!
//! Commands:
//! - users-api serve [--config <path>] [--host <host>] [--port <port>] [--in-memory]
//! - users-api check-config [--config <path>]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::observability::LogFormat;

/// users-api - JSON CRUD service for users
#[derive(Parser, Debug)]
#[command(name = "users-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Print the effective configuration and exit
    CheckConfig {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to, overrides config and HOST
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overrides config and PORT
    #[arg(long)]
    pub port: Option<u16>,

    /// Serve from an in-memory store instead of MySQL
    #[arg(long)]
    pub in_memory: bool,

    /// Default log level when RUST_LOG is unset
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log line format: text or json
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
