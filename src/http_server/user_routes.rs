//! User HTTP Routes
//!
//! CRUD endpoints for the `users` table. Each handler validates its input,
//! runs one repository call and maps the outcome to a JSON response.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::observability::MetricsRegistry;
use crate::users::{CreateUserRequest, UpdateUserRequest, UpdatedUser, User, UserRepository};

use super::errors::{ApiError, ApiResult};

// ==================
// Shared State
// ==================

/// User endpoint state shared across handlers
pub struct UsersState {
    pub repository: Arc<dyn UserRepository>,
    pub metrics: Arc<MetricsRegistry>,
}

impl UsersState {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self::with_metrics(repository, Arc::new(MetricsRegistry::new()))
    }

    pub fn with_metrics(repository: Arc<dyn UserRepository>, metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            repository,
            metrics,
        }
    }

    /// Insert a user after checking both fields are present
    pub async fn create_user(&self, request: CreateUserRequest) -> ApiResult<User> {
        let user = self.record(self.try_create_user(request).await)?;
        self.metrics.increment_users_created();
        info!(user_id = user.id, "user created");
        Ok(user)
    }

    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        let result = self.repository.list().await.map_err(ApiError::from);
        let users = self.record(result)?;
        self.metrics.increment_users_listed();
        Ok(users)
    }

    pub async fn get_user(&self, raw_id: &str) -> ApiResult<User> {
        let user = self.record(self.try_get_user(raw_id).await)?;
        self.metrics.increment_users_read();
        Ok(user)
    }

    /// Apply a partial update and echo the submitted fields
    pub async fn update_user(&self, raw_id: &str, request: UpdateUserRequest) -> ApiResult<UpdatedUser> {
        let updated = self.record(self.try_update_user(raw_id, request).await)?;
        self.metrics.increment_users_updated();
        info!(user_id = updated.id, "user updated");
        Ok(updated)
    }

    pub async fn delete_user(&self, raw_id: &str) -> ApiResult<()> {
        let id = self.record(self.try_delete_user(raw_id).await)?;
        self.metrics.increment_users_deleted();
        info!(user_id = id, "user deleted");
        Ok(())
    }

    async fn try_create_user(&self, request: CreateUserRequest) -> ApiResult<User> {
        let new_user = request.into_new_user()?;
        Ok(self.repository.create(&new_user).await?)
    }

    async fn try_get_user(&self, raw_id: &str) -> ApiResult<User> {
        let id = parse_id(raw_id)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound)
    }

    /// Body is validated before the id, so an empty body is a 400 for any id
    async fn try_update_user(&self, raw_id: &str, request: UpdateUserRequest) -> ApiResult<UpdatedUser> {
        let patch = request.into_patch()?;
        let id = parse_id(raw_id)?;
        match self.repository.update(id, &patch).await? {
            0 => Err(ApiError::NotFound),
            _ => Ok(UpdatedUser::from_patch(id, patch)),
        }
    }

    async fn try_delete_user(&self, raw_id: &str) -> ApiResult<i64> {
        let id = parse_id(raw_id)?;
        match self.repository.delete(id).await? {
            0 => Err(ApiError::NotFound),
            _ => Ok(id),
        }
    }

    /// Count failures by kind and pass the result through
    fn record<T>(&self, result: ApiResult<T>) -> ApiResult<T> {
        if let Err(err) = &result {
            match err {
                ApiError::Validation(_) | ApiError::InvalidBody(_) => {
                    self.metrics.increment_validation_failures()
                }
                ApiError::NotFound | ApiError::RouteNotFound { .. } => {
                    self.metrics.increment_not_found()
                }
                ApiError::MethodNotAllowed => {}
                ApiError::Database(_) => self.metrics.increment_database_errors(),
            }
        }
        result
    }
}

/// Ids that are not integers cannot match a row
fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>().map_err(|_| ApiError::NotFound)
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ==================
// User Routes
// ==================

/// Create user routes
pub fn user_routes(state: Arc<UsersState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/:id",
            get(get_user_handler)
                .put(update_user_handler)
                .delete(delete_user_handler),
        )
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn root_handler() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to Users CRUD API"))
}

async fn create_user_handler(
    State(state): State<Arc<UsersState>>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let Json(request) = state.record(body.map_err(ApiError::from))?;
    let user = state.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn list_users_handler(State(state): State<Arc<UsersState>>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.list_users().await?;
    Ok(Json(users))
}

async fn get_user_handler(
    State(state): State<Arc<UsersState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = state.get_user(&id).await?;
    Ok(Json(user))
}

async fn update_user_handler(
    State(state): State<Arc<UsersState>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UpdatedUser>, ApiError> {
    let Json(request) = state.record(body.map_err(ApiError::from))?;
    let updated = state.update_user(&id, request).await?;
    Ok(Json(updated))
}

async fn delete_user_handler(
    State(state): State<Arc<UsersState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.delete_user(&id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
