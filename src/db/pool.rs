//! Connection pool construction.

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use super::config::DatabaseConfig;
use super::errors::DbResult;

/// Build the shared pool and verify connectivity with one connection.
///
/// Failure here is fatal to startup; the caller does not retry.
pub async fn create_pool(config: &DatabaseConfig) -> DbResult<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .connect_with(config.connect_options())
        .await?;

    info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        max_connections = config.max_connections,
        "database pool ready"
    );

    Ok(pool)
}
