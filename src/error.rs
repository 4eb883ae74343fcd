//! Error types for loading planning inputs
//!
//! The planning engine itself never fails: missing deadlines and exhausted
//! buckets are reported as feasibility outcomes. These errors only cover
//! reading households, assumption tables, and rate tables from disk.

use thiserror::Error;

/// Errors raised while loading or parsing planner inputs
#[derive(Error, Debug)]
pub enum PlannerError {
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV parsing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Assumption table entry that cannot be used
    #[error("Invalid assumption '{name}': {detail}")]
    InvalidAssumption { name: String, detail: String },

    /// Currency code or rate pair that cannot be parsed
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    /// Any other malformed input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PlannerError {
    pub fn invalid_assumption(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidAssumption {
            name: name.into(),
            detail: detail.into(),
        }
    }

    /// Check if this is a parse/validation problem rather than an I/O failure
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidAssumption { .. } | Self::InvalidCurrency(_) | Self::InvalidInput(_)
        )
    }
}

/// Result type alias for planner loading operations
pub type PlannerResult<T> = Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PlannerError::invalid_assumption("inflation", "not a number");
        assert_eq!(err.to_string(), "Invalid assumption 'inflation': not a number");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PlannerError = io_err.into();
        assert!(matches!(err, PlannerError::Io(_)));
        assert!(!err.is_invalid_input());
    }
}
