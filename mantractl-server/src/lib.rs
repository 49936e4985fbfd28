//! mantractl-server: HTTP API over the habit store
//!
//! Exposes mantras, practice sessions, and user statistics as a JSON API
//! with bearer-token auth and a PostgreSQL repository layer.

pub mod auth;
pub mod db;
pub mod http;
pub mod models;

pub use http::{run_server, ApiError, ServerConfig};
