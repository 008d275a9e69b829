//! # HTTP Server Module
//!
//! Axum server exposing the users API.
//!
//! # Endpoints
//!
//! - `/` - Welcome message
//! - `/users`, `/users/:id` - User CRUD
//! - `/health` - Health check
//! - `/observability/*` - Health and request counters

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod server;
pub mod user_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
pub use user_routes::{MessageResponse, UsersState};
