//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Location identifier not present in the location catalog
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    /// Categorical or numeric parameter outside its accepted range
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_creates_correct_error() {
        let err = DomainError::invalid_parameter("climate_zone", "unrecognised value 'tundra'");
        match err {
            DomainError::InvalidParameter { name, reason } => {
                assert_eq!(name, "climate_zone");
                assert_eq!(reason, "unrecognised value 'tundra'");
            },
            _ => unreachable!("Expected InvalidParameter error"),
        }
    }

    #[test]
    fn invalid_parameter_error_message_is_correct() {
        let err = DomainError::invalid_parameter("prediction_months", "must be between 1 and 24");
        assert_eq!(
            err.to_string(),
            "Invalid parameter prediction_months: must be between 1 and 24"
        );
    }

    #[test]
    fn unknown_location_error_message() {
        let err = DomainError::UnknownLocation("atlantis".to_string());
        assert_eq!(err.to_string(), "Unknown location: atlantis");
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("ph must be within 0-14".to_string());
        assert_eq!(err.to_string(), "Validation failed: ph must be within 0-14");
    }
}
