//! CLI command implementations
//!
//! `serve` boots in a fixed order: logging, configuration, runtime,
//! repository (pool), HTTP listener. Any failure along the way ends the
//! process; nothing is served in a degraded mode.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::db::create_pool;
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::users::{InMemoryUserRepository, MySqlUserRepository, UserRepository};

use super::args::{Command, ServeArgs};
use super::config::{read_env_file, AppConfig, DOTENV_FILE};
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve(args) => serve(&args),
        Command::CheckConfig { config } => check_config(config.as_deref()),
    }
}

/// Resolve configuration from file, `.env`, environment and flag overrides
pub fn effective_config(
    path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult<AppConfig> {
    let mut config = AppConfig::load(path)?;
    let dotenv = read_env_file(Path::new(DOTENV_FILE))?;
    if !dotenv.is_empty() {
        debug!(file = DOTENV_FILE, keys = dotenv.len(), "loaded dotenv file");
    }
    config.apply_process_env(&dotenv)?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    config.validate()?;
    Ok(config)
}

/// Print the effective configuration, password redacted
pub fn check_config(path: Option<&Path>) -> CliResult<()> {
    let config = effective_config(path, None, None)?;
    println!("{}", serde_json::to_string_pretty(&config.redacted())?);
    Ok(())
}

/// Start the HTTP server and block until it stops
pub fn serve(args: &ServeArgs) -> CliResult<()> {
    init_logging(args.log_format, &args.log_level).map_err(|e| CliError::boot_failed(e.to_string()))?;

    let config = effective_config(args.config.as_deref(), args.host.clone(), args.port)
        .map_err(|e| fatal("invalid configuration", e))?;
    info!(
        config = %serde_json::to_string(&config.redacted())?,
        "effective configuration"
    );

    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        fatal(
            "runtime",
            CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)),
        )
    })?;

    rt.block_on(async {
        let repository: Arc<dyn UserRepository> = if args.in_memory {
            warn!("serving from in-memory store, data is lost on exit");
            Arc::new(InMemoryUserRepository::new())
        } else {
            let pool = create_pool(&config.database).await.map_err(|e| {
                fatal(
                    "database pool",
                    CliError::boot_failed(format!("Failed to create database pool: {}", e)),
                )
            })?;
            Arc::new(MySqlUserRepository::new(pool))
        };

        HttpServer::new(config.server, repository)
            .start()
            .await
            .map_err(|e| fatal("http server", CliError::boot_failed(format!("HTTP server failed: {}", e))))
    })
}

/// Log a startup failure before handing it back to `main`
fn fatal(stage: &str, err: CliError) -> CliError {
    error!(stage, error = %err, "startup failed");
    err
}
