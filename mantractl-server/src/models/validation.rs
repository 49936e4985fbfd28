//! Validation error types

use std::fmt;

/// Validation error for request models
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Numeric field below its minimum
    TooSmall { field: &'static str, min: i64 },

    /// Numeric field above its maximum
    TooLarge { field: &'static str, max: i64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::TooSmall { field, min } => {
                write!(f, "{} must be at least {}", field, min)
            }
            Self::TooLarge { field, max } => {
                write!(f, "{} must be at most {}", field, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
