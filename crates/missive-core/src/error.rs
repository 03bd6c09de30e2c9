//! Unified error handling for Missive Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Missive Core operations.
///
/// Field-level validation problems never show up here; they are returned as
/// [`ValidationResult`](crate::domain::ValidationResult) data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MissiveError {
    /// Errors from the domain layer (schema misconfiguration, unknown fields).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (submission orchestration).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl MissiveError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Schema => ErrorCategory::Schema,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Check if retrying the same operation can succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(
                ApplicationError::SubmissionFailed { .. } | ApplicationError::SubmissionInProgress
            )
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Schema,
    NotFound,
    Submission,
    Internal,
}

/// Convenient result type alias.
pub type MissiveResult<T> = Result<T, MissiveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_errors_are_categorised_as_schema() {
        let err: MissiveError = DomainError::DuplicateField {
            field: "name".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Schema);
        assert!(!err.is_retryable());
    }

    #[test]
    fn handler_failure_is_retryable() {
        let err: MissiveError = ApplicationError::SubmissionFailed {
            reason: "timeout".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Submission);
        assert!(err.is_retryable());
    }

    #[test]
    fn rejected_lists_fields() {
        let err = ApplicationError::ValidationRejected {
            fields: vec!["name".into(), "message".into()],
        };
        assert_eq!(err.to_string(), "Form has invalid fields: name, message");
    }
}
