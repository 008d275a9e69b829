//! # User Model
//!
//! The stored `User` row plus the request and response shapes of the user
//! endpoints.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::errors::ValidationError;

/// A stored user row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Database generated identifier, immutable once assigned
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Validated payload for inserting a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

/// Validated partial update.
///
/// At least one field is always present once built through
/// [`UpdateUserRequest::into_patch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// `POST /users` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CreateUserRequest {
    /// Both fields must be present and non-empty
    pub fn into_new_user(self) -> Result<NewUser, ValidationError> {
        match (non_empty(self.name), non_empty(self.email)) {
            (Some(name), Some(email)) => Ok(NewUser { name, email }),
            _ => Err(ValidationError::MissingRequiredFields),
        }
    }
}

/// `PUT /users/:id` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    /// Empty strings count as absent; at least one field must remain
    pub fn into_patch(self) -> Result<UserPatch, ValidationError> {
        let patch = UserPatch {
            name: non_empty(self.name),
            email: non_empty(self.email),
        };
        if patch.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        Ok(patch)
    }
}

/// `PUT /users/:id` success body.
///
/// Echoes the submitted fields only; a field left out of the request is
/// left out here too, even though the stored value is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedUser {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UpdatedUser {
    pub fn from_patch(id: i64, patch: UserPatch) -> Self {
        Self {
            id,
            name: patch.name,
            email: patch.email,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
