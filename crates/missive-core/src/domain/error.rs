// ============================================================================
// domain/error.rs - SCHEMA AND VALUE ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Field-level validation failures are *not* errors: they are data inside a
/// [`ValidationResult`](super::ValidationResult). This enum only covers
/// misconfiguration and misuse of the form API.
///
/// All errors are:
/// - Cloneable (the controller republishes them inside snapshots)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Schema Construction (fatal at startup)
    // ========================================================================
    #[error("Duplicate field in schema: {field}")]
    DuplicateField { field: String },

    #[error("Field '{field}' declares length bounds {min}..{max} with min > max")]
    InvertedLength { field: String, min: usize, max: usize },

    #[error("Schema declares no fields")]
    EmptySchema,

    #[error("Invalid field name '{field}': {reason}")]
    InvalidFieldName { field: String, reason: String },

    // ========================================================================
    // Value Access
    // ========================================================================
    #[error("Field '{field}' is not declared in the schema")]
    UnknownField { field: String },

    #[error("Required field missing: {field}")]
    MissingField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DuplicateField { field } => vec![
                format!("Field '{}' is declared more than once", field),
                "Give every field a unique identifier".into(),
            ],
            Self::InvertedLength { field, min, max } => vec![
                format!("Field '{}' needs min <= max (got {} > {})", field, min, max),
                "Check schema.message_min / schema.message_max in your config".into(),
            ],
            Self::EmptySchema => vec!["Declare at least one field".into()],
            Self::UnknownField { field } => vec![
                format!("'{}' is not part of this form", field),
                "Known fields: name, email, message".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateField { .. }
            | Self::InvertedLength { .. }
            | Self::EmptySchema
            | Self::InvalidFieldName { .. } => ErrorCategory::Schema,
            Self::UnknownField { .. } => ErrorCategory::NotFound,
            Self::MissingField { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Schema,
    NotFound,
    Internal,
}
