//! # Data Access
//!
//! Runs exactly one parameterized statement against the pool. Placeholders
//! are positional (`?`) and values are supplied as an ordered list of
//! [`BindValue`]s, so caller input never reaches the SQL text.
//!
//! Executing against `&MySqlPool` checks a connection out for the single
//! statement and returns it to the pool on every exit path.

use std::fmt;

use sqlx::mysql::{MySqlArguments, MySqlPool, MySqlRow};
use sqlx::{Arguments, FromRow};
use tracing::debug;

use super::errors::{DbError, DbResult};

/// A single positional bind value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Int(i64),
    Text(String),
}

impl From<i64> for BindValue {
    fn from(value: i64) -> Self {
        BindValue::Int(value)
    }
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        BindValue::Text(value)
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        BindValue::Text(value.to_string())
    }
}

/// SQL template plus its ordered bind values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    sql: String,
    binds: Vec<BindValue>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, binds: Vec<BindValue>) -> Self {
        Self {
            sql: sql.into(),
            binds,
        }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn binds(&self) -> &[BindValue] {
        &self.binds
    }

    /// Number of `?` placeholders in the template
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    fn arguments(&self) -> DbResult<MySqlArguments> {
        let mut args = MySqlArguments::default();
        for value in &self.binds {
            let added = match value {
                BindValue::Int(v) => args.add(*v),
                BindValue::Text(s) => args.add(s.clone()),
            };
            added.map_err(|e| DbError::Bind(e.to_string()))?;
        }
        Ok(args)
    }
}

/// Bind values are deliberately left out; they may carry user data.
impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} binds]", self.sql, self.binds.len())
    }
}

/// Outcome of a write statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mutation {
    pub affected_rows: u64,
    /// Auto-increment id of the inserted row, 0 when nothing was inserted
    pub generated_id: u64,
}

/// Run a read statement and map every row into `T`
pub async fn fetch_all<T>(pool: &MySqlPool, statement: &Statement) -> DbResult<Vec<T>>
where
    T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
{
    debug!(statement = %statement, "fetch_all");
    let args = statement.arguments()?;
    let rows = sqlx::query_as_with::<_, T, _>(statement.sql(), args)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Run a read statement expected to match at most one row
pub async fn fetch_optional<T>(pool: &MySqlPool, statement: &Statement) -> DbResult<Option<T>>
where
    T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
{
    debug!(statement = %statement, "fetch_optional");
    let args = statement.arguments()?;
    let row = sqlx::query_as_with::<_, T, _>(statement.sql(), args)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Run a write statement and report affected rows and generated id
pub async fn execute(pool: &MySqlPool, statement: &Statement) -> DbResult<Mutation> {
    debug!(statement = %statement, "execute");
    let args = statement.arguments()?;
    let result = sqlx::query_with(statement.sql(), args)
        .execute(pool)
        .await?;
    Ok(Mutation {
        affected_rows: result.rows_affected(),
        generated_id: result.last_insert_id(),
    })
}
