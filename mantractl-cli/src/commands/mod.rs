//! CLI subcommand implementations

pub mod serve;
pub mod token;
pub mod user;
