//! SDK error types

use std::time::Duration;

use super::validation::ValidationErrors;

/// Failure reported by the underlying connection, passed through verbatim
pub type ConnectionError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by SDK operations
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// The options value was rejected before anything was sent
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The connection failed to execute a statement
    #[error("{operation} on {target} failed: {source}")]
    Execution {
        operation: &'static str,
        target: String,
        #[source]
        source: ConnectionError,
    },

    /// A lookup by identifier found no matching object
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// A result row did not have the expected shape
    #[error("Cannot convert column '{column}': {message}")]
    Conversion { column: String, message: String },

    /// The statement did not complete before the deadline
    #[error("{operation} timed out after {}s", timeout.as_secs())]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },
}

impl SdkError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn conversion(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conversion {
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for SDK operations
pub type SdkResult<T> = Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::validation::OptionsError;

    #[test]
    fn validation_errors_display_transparently() {
        let err: SdkError = ValidationErrors(vec![OptionsError::NilOptions]).into();
        assert_eq!(err.to_string(), "options cannot be nil");
        assert!(!err.is_not_found());
    }

    #[test]
    fn execution_error_keeps_context_and_source() {
        let err = SdkError::Execution {
            operation: "DropComputePoolOptions",
            target: "\"POOL\"".to_string(),
            source: "connection reset".into(),
        };
        assert_eq!(
            err.to_string(),
            "DropComputePoolOptions on \"POOL\" failed: connection reset"
        );
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "connection reset");
    }

    #[test]
    fn not_found_display() {
        let err = SdkError::not_found("compute pool", "\"POOL\"");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "compute pool \"POOL\" not found");
    }
}
