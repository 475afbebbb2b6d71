//! Domain models
//!
//! Categorical codes are kept verbatim; only display names are resolved.
//! Invalid request input returns ValidationError, not panic.

pub mod beer;
pub mod validation;

pub use beer::{Beer, BeerStyle, BeerType};
pub use validation::ValidationError;
