//! # User Validation Errors

use thiserror::Error;

/// Caller input that fails a precondition.
///
/// Detected before any database call. The message is safe to return to the
/// client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Create without a non-empty name and email
    #[error("Name and email are required")]
    MissingRequiredFields,

    /// Update that supplies neither field
    #[error("At least one field (name or email) required to update")]
    EmptyUpdate,
}
