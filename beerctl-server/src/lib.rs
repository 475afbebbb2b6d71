//! beerctl-server: beer catalog over HTTP
//!
//! A REST API (`/v1/beer`) backed by SQLite. The persistence contract is
//! the `BeerRepository` trait; `SqliteBeerRepo` is the production
//! implementation and `MemoryBeerRepo` stands in for it in tests.

pub mod db;
pub mod http;
pub mod models;

pub use db::{BeerRepository, MemoryBeerRepo, RepoError, RepoResult, SqliteBeerRepo};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use models::{Beer, BeerStyle, BeerType, ValidationError};
