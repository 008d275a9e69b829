//! # Database Errors

use thiserror::Error;

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Failures raised while talking to the database.
///
/// The message carries driver detail and is meant for server-side logs
/// only. HTTP responses never include it.
#[derive(Debug, Error)]
pub enum DbError {
    /// Driver, connectivity, constraint or pool-timeout failure
    #[error("Query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// A bind value could not be encoded
    #[error("Failed to bind parameter: {0}")]
    Bind(String),

    /// Auto-increment value does not fit a user id
    #[error("Generated id {0} is out of range")]
    IdOutOfRange(u64),

    /// Backing store is unusable (in-memory store poisoned or disabled)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl DbError {
    /// Whether the failure came from the pool rather than the statement
    pub fn is_pool_exhausted(&self) -> bool {
        matches!(
            self,
            DbError::Query(sqlx::Error::PoolTimedOut) | DbError::Query(sqlx::Error::PoolClosed)
        )
    }
}
