//! Database layer - connection pool, schema bootstrap, and repositories
//!
//! # Design Principles
//!
//! - Connection pool with a small explicit cap - no Arc<Mutex<Connection>>
//! - Every query is scoped by owning-user id
//! - Single-statement writes that rely on constraints - no check-then-insert
//! - Row decode failures in history reads are skipped, not fatal

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::create_pool;
pub use repos::*;
