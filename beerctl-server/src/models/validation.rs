//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Identifier is the reserved zero sentinel
    Unassigned { field: &'static str },

    /// Input could not be decoded into the expected shape
    InvalidFormat { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn invalid_format(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned { field } => write!(f, "invalid {}: must be non-zero", field),
            Self::InvalidFormat { field, reason } => write!(f, "invalid {}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}
