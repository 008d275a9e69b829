//! # Database Module
//!
//! MySQL connection pool and the single data access path used by the
//! user repository. Every statement runs on one pooled connection and every
//! caller-supplied value travels as a bind parameter.

pub mod config;
pub mod errors;
pub mod pool;
pub mod query;

pub use config::DatabaseConfig;
pub use errors::{DbError, DbResult};
pub use pool::create_pool;
pub use query::{execute, fetch_all, fetch_optional, BindValue, Mutation, Statement};
