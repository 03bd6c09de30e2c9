//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Schema misconfiguration is `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving a form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A submit attempt was blocked by field errors.
    #[error("Form has invalid fields: {}", fields.join(", "))]
    ValidationRejected { fields: Vec<String> },

    /// The submission handler reported a failure.
    #[error("Submission failed: {reason}")]
    SubmissionFailed { reason: String },

    /// A submit was ignored because another one is still pending.
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    /// The form instance was closed before the submission resolved.
    #[error("Form was closed before the submission completed")]
    FormClosed,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ValidationRejected { fields } => vec![
                format!("Fix the highlighted fields: {}", fields.join(", ")),
                "Try: missive schema to see every constraint".into(),
            ],
            Self::SubmissionFailed { reason } => vec![
                format!("The handler reported: {}", reason),
                "Your input was kept; submit again to retry".into(),
            ],
            Self::SubmissionInProgress => vec!["Wait for the pending submission to finish".into()],
            Self::FormClosed => vec!["The form was closed; start a new one".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationRejected { .. } => ErrorCategory::Validation,
            Self::SubmissionFailed { .. } => ErrorCategory::Submission,
            Self::SubmissionInProgress => ErrorCategory::Validation,
            Self::FormClosed => ErrorCategory::Internal,
        }
    }
}
