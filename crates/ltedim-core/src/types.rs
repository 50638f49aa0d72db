//! Core error types for the dimensioning engine
//!
//! The numeric pipeline itself never fails: a physically invalid input
//! propagates through the formulas as a non-finite value. Errors only arise
//! at the boundaries where text is turned into typed values (model and
//! environment tags) or where a collaborator explicitly asks for a
//! parameter record to be checked.

/// Result type for boundary operations
pub type DimResult<T> = Result<T, DimError>;

/// Errors that can occur while parsing or validating planner inputs
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DimError {
    #[error("Unknown propagation model: '{0}'. Must be okumura-hata, cost231-hata or 3gpp")]
    UnknownModel(String),

    #[error("Unknown environment: '{0}'. Must be urban, suburban or rural")]
    UnknownEnvironment(String),

    #[error("Invalid parameter {field}: {reason}")]
    InvalidParameter {
        field: &'static str,
        reason: String,
    },
}

impl DimError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DimError::UnknownModel("itu".to_string());
        assert!(err.to_string().contains("'itu'"));

        let err = DimError::invalid("frequency", "must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid parameter frequency: must be positive, got 0"
        );
    }
}
