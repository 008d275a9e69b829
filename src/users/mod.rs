//! # Users Module
//!
//! The `User` entity, request validation, SQL statements for the `users`
//! table and the repository seam used by the HTTP handlers.

pub mod errors;
pub mod model;
pub mod repository;
pub mod statements;

pub use errors::ValidationError;
pub use model::{CreateUserRequest, NewUser, UpdateUserRequest, UpdatedUser, User, UserPatch};
pub use repository::{InMemoryUserRepository, MySqlUserRepository, UserRepository};
