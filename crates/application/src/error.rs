//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Location identifier not recognised
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    /// Out-of-range climate zone, ENSO status, horizon or date range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Upstream weather or soil source failed, timed out or returned nothing
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if the caller may offer a retry
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApplicationError::DataUnavailable(_))
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UnknownLocation(id) => Self::UnknownLocation(id),
            DomainError::InvalidParameter { .. } => Self::InvalidParameter(err.to_string()),
            DomainError::ValidationError(msg) => Self::InvalidParameter(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_data_unavailable_is_retryable() {
        assert!(ApplicationError::DataUnavailable("timeout".into()).is_retryable());
        assert!(!ApplicationError::UnknownLocation("x".into()).is_retryable());
        assert!(!ApplicationError::InvalidParameter("x".into()).is_retryable());
        assert!(!ApplicationError::Internal("x".into()).is_retryable());
    }

    #[test]
    fn domain_errors_map_to_taxonomy() {
        let err: ApplicationError = DomainError::UnknownLocation("atlantis".into()).into();
        assert!(matches!(err, ApplicationError::UnknownLocation(ref id) if id == "atlantis"));

        let err: ApplicationError =
            DomainError::invalid_parameter("enso_status", "unrecognised value 'x'").into();
        assert_eq!(
            err.to_string(),
            "Invalid parameter: Invalid parameter enso_status: unrecognised value 'x'"
        );
    }
}
