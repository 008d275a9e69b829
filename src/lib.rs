//! users-api - JSON CRUD service for a single `users` table
//!
//! Request flow: router → handler → validation → repository → one
//! parameterized statement on the MySQL pool → JSON response.

pub mod cli;
pub mod db;
pub mod http_server;
pub mod observability;
pub mod users;
