//! SQL for the `users` table.
//!
//! Each builder returns a [`Statement`] whose values are all bound. The
//! update statement is rendered from a [`UserPatch`] in a fixed column
//! order (`name`, then `email`), so the same patch always yields the same
//! SQL text.

use crate::db::{BindValue, Statement};

use super::model::{NewUser, UserPatch};

const INSERT_USER: &str = "INSERT INTO users (name, email) VALUES (?, ?)";
const SELECT_USERS: &str = "SELECT id, name, email FROM users";
const SELECT_USER_BY_ID: &str = "SELECT id, name, email FROM users WHERE id = ?";
const DELETE_USER: &str = "DELETE FROM users WHERE id = ?";

pub fn insert_user(user: &NewUser) -> Statement {
    Statement::new(
        INSERT_USER,
        vec![user.name.as_str().into(), user.email.as_str().into()],
    )
}

/// Unfiltered and unordered; row order is whatever the database returns
pub fn select_users() -> Statement {
    Statement::new(SELECT_USERS, Vec::new())
}

pub fn select_user_by_id(id: i64) -> Statement {
    Statement::new(SELECT_USER_BY_ID, vec![BindValue::Int(id)])
}

/// `None` when the patch carries no field
pub fn update_user(id: i64, patch: &UserPatch) -> Option<Statement> {
    let mut assignments = Vec::with_capacity(2);
    let mut binds = Vec::with_capacity(3);

    if let Some(name) = &patch.name {
        assignments.push("name = ?");
        binds.push(BindValue::Text(name.clone()));
    }
    if let Some(email) = &patch.email {
        assignments.push("email = ?");
        binds.push(BindValue::Text(email.clone()));
    }
    if assignments.is_empty() {
        return None;
    }
    binds.push(BindValue::Int(id));

    let sql = format!("UPDATE users SET {} WHERE id = ?", assignments.join(", "));
    Some(Statement::new(sql, binds))
}

pub fn delete_user(id: i64) -> Statement {
    Statement::new(DELETE_USER, vec![BindValue::Int(id)])
}
