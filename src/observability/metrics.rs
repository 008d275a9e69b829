//! Metrics registry
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Request outcome counters for the user endpoints
///
/// All counters use Relaxed atomics; exact cross-counter consistency is not
/// required.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    users_created: AtomicU64,
    users_listed: AtomicU64,
    users_read: AtomicU64,
    users_updated: AtomicU64,
    users_deleted: AtomicU64,
    validation_failures: AtomicU64,
    not_found: AtomicU64,
    database_errors: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    // Successful operations

    pub fn increment_users_created(&self) {
        self.users_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_users_listed(&self) {
        self.users_listed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_users_read(&self) {
        self.users_read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_users_updated(&self) {
        self.users_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_users_deleted(&self) {
        self.users_deleted.fetch_add(1, Ordering::Relaxed);
    }

    // Failures

    pub fn increment_validation_failures(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_database_errors(&self) {
        self.database_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            users_created: self.users_created.load(Ordering::Relaxed),
            users_listed: self.users_listed.load(Ordering::Relaxed),
            users_read: self.users_read.load(Ordering::Relaxed),
            users_updated: self.users_updated.load(Ordering::Relaxed),
            users_deleted: self.users_deleted.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            database_errors: self.database_errors.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub users_created: u64,
    pub users_listed: u64,
    pub users_read: u64,
    pub users_updated: u64,
    pub users_deleted: u64,
    pub validation_failures: u64,
    pub not_found: u64,
    pub database_errors: u64,
}
