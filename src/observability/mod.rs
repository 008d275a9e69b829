//! Observability for the users service
//!
//! - Logging through `tracing`, as text or JSON lines
//! - Process-local request outcome counters
//!
//! # Usage
//!
//! ```ignore
//! use users_api::observability::{init_logging, LogFormat, MetricsRegistry};
//!
//! init_logging(LogFormat::Json, "info")?;
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_users_created();
//! ```

mod logger;
mod metrics;

pub use logger::{env_filter, init_logging, LogFormat, LoggingError};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
