//! HTTP route handlers

pub mod health;
pub mod mantras;
pub mod sessions;
pub mod stats;
