// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Missive.
//!
//! This module contains the pure validation logic: field declarations, the
//! schema that evaluates them, and the value types flowing in and out.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: observability belongs to the application layer
//! - **Immutable schema**: built once, read-only afterwards
//! - **Errors as data**: field violations live in `ValidationResult`
//!
// Public API - what the world sees
pub mod error;
pub mod field;
pub mod schema;
pub mod validation;
pub mod values;

// Re-exports for convenience
pub use error::{DomainError, ErrorCategory};
pub use field::{Constraint, FieldKind, FieldSpec, INVALID_EMAIL_MESSAGE};
pub use schema::{
    ContactSchemaOptions, DEFAULT_MESSAGE_MAX, DEFAULT_MESSAGE_MIN, FormSchema, FormSchemaBuilder,
    contact_schema, contact_schema_with,
};
pub use validation::ValidationResult;
pub use values::{ContactDetails, FormValues, ValidatedValues};
