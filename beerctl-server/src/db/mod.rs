//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - One pooled SQLite connection, opened at startup and closed at shutdown
//! - Every write is a single statement in its own transaction
//! - Rely on the primary key for identity, handle conflicts as storage errors

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use schema::ensure_schema;
