//! # User Repository
//!
//! Storage operations for users. `MySqlUserRepository` runs each operation
//! as one statement through the data access functions in [`crate::db`].
//! `InMemoryUserRepository` mirrors its observable behavior (generated ids,
//! affected-row counts, never reused ids) without a database.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use sqlx::mysql::MySqlPool;

use crate::db::{self, DbError, DbResult};

use super::model::{NewUser, User, UserPatch};
use super::statements;

/// User repository trait
///
/// Write operations report the number of affected rows; callers decide
/// what zero means.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its generated id
    async fn create(&self, user: &NewUser) -> DbResult<User>;

    /// All users, in storage order
    async fn list(&self) -> DbResult<Vec<User>>;

    /// Find a user by id
    async fn find_by_id(&self, id: i64) -> DbResult<Option<User>>;

    /// Apply a partial update, returning affected rows
    async fn update(&self, id: i64, patch: &UserPatch) -> DbResult<u64>;

    /// Delete a user, returning affected rows
    async fn delete(&self, id: i64) -> DbResult<u64>;
}

/// MySQL-backed repository over a shared pool
#[derive(Debug, Clone)]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

}

fn user_id(generated_id: u64) -> DbResult<i64> {
    i64::try_from(generated_id).map_err(|_| DbError::IdOutOfRange(generated_id))
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, user: &NewUser) -> DbResult<User> {
        let mutation = db::execute(&self.pool, &statements::insert_user(user)).await?;
        let id = user_id(mutation.generated_id)?;

        Ok(User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
        })
    }

    async fn list(&self) -> DbResult<Vec<User>> {
        db::fetch_all(&self.pool, &statements::select_users()).await
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<User>> {
        db::fetch_optional(&self.pool, &statements::select_user_by_id(id)).await
    }

    async fn update(&self, id: i64, patch: &UserPatch) -> DbResult<u64> {
        let Some(statement) = statements::update_user(id, patch) else {
            return Ok(0);
        };
        let mutation = db::execute(&self.pool, &statement).await?;
        Ok(mutation.affected_rows)
    }

    async fn delete(&self, id: i64) -> DbResult<u64> {
        let mutation = db::execute(&self.pool, &statements::delete_user(id)).await?;
        Ok(mutation.affected_rows)
    }
}

#[derive(Debug)]
struct InMemoryStore {
    next_id: i64,
    rows: BTreeMap<i64, User>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

/// In-memory user repository for tests and `serve --in-memory`
#[derive(Debug)]
pub struct InMemoryUserRepository {
    store: RwLock<InMemoryStore>,
    available: AtomicBool,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self {
            store: RwLock::new(InMemoryStore::default()),
            available: AtomicBool::new(true),
        }
    }
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every operation fails like a lost connection
    pub fn unavailable() -> Self {
        let repo = Self::default();
        repo.set_available(false);
        repo
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> DbResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DbError::Unavailable("connection refused".to_string()))
        }
    }

    fn poisoned() -> DbError {
        DbError::Unavailable("Lock poisoned".to_string())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> DbResult<User> {
        self.check_available()?;
        let mut store = self.store.write().map_err(|_| Self::poisoned())?;

        let id = store.next_id;
        store.next_id += 1;

        let row = User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
        };
        store.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn list(&self) -> DbResult<Vec<User>> {
        self.check_available()?;
        let store = self.store.read().map_err(|_| Self::poisoned())?;
        Ok(store.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> DbResult<Option<User>> {
        self.check_available()?;
        let store = self.store.read().map_err(|_| Self::poisoned())?;
        Ok(store.rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, patch: &UserPatch) -> DbResult<u64> {
        self.check_available()?;
        if patch.is_empty() {
            return Ok(0);
        }
        let mut store = self.store.write().map_err(|_| Self::poisoned())?;

        let Some(row) = store.rows.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(name) = &patch.name {
            row.name = name.clone();
        }
        if let Some(email) = &patch.email {
            row.email = email.clone();
        }
        Ok(1)
    }

    async fn delete(&self, id: i64) -> DbResult<u64> {
        self.check_available()?;
        let mut store = self.store.write().map_err(|_| Self::poisoned())?;
        Ok(u64::from(store.rows.remove(&id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryUserRepository::new();
        let first = repo.create(&new_user("Ada", "ada@example.com")).await.unwrap();
        let second = repo.create(&new_user("Grace", "grace@example.com")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = InMemoryUserRepository::new();
        let first = repo.create(&new_user("Ada", "ada@example.com")).await.unwrap();
        assert_eq!(repo.delete(first.id).await.unwrap(), 1);

        let next = repo.create(&new_user("Ada", "ada@example.com")).await.unwrap();
        assert_ne!(next.id, first.id);
    }

    #[tokio::test]
    async fn test_partial_update_preserves_other_field() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(&new_user("Ada", "ada@example.com")).await.unwrap();

        let patch = UserPatch {
            name: Some("Ada Lovelace".to_string()),
            email: None,
        };
        assert_eq!(repo.update(user.id, &patch).await.unwrap(), 1);

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Ada Lovelace");
        assert_eq!(stored.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_missing_rows_affect_nothing() {
        let repo = InMemoryUserRepository::new();
        let patch = UserPatch {
            name: Some("X".to_string()),
            email: None,
        };
        assert_eq!(repo.update(42, &patch).await.unwrap(), 0);
        assert_eq!(repo.delete(42).await.unwrap(), 0);
        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }

    #[test]
    fn test_generated_id_range() {
        assert_eq!(user_id(7).unwrap(), 7);
        assert!(matches!(user_id(u64::MAX), Err(DbError::IdOutOfRange(u64::MAX))));
    }

    #[tokio::test]
    async fn test_unavailable_repository_fails() {
        let repo = InMemoryUserRepository::unavailable();
        assert!(matches!(repo.list().await, Err(DbError::Unavailable(_))));

        repo.set_available(true);
        assert!(repo.list().await.unwrap().is_empty());
    }
}
