//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Reads go straight to the pool, no transaction
//! - Writes run one statement inside one transaction
//! - Failures roll back before the error is returned

pub mod beers;
pub mod memory;

pub use beers::{BeerRepository, RepoError, RepoResult, SqliteBeerRepo};
pub use memory::MemoryBeerRepo;
