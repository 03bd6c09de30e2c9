//! Missive Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of a contact form:
//! a declarative field schema, its validator and the submission state
//! machine that sits between user edits and an external handler.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           missive-cli (CLI)             │
//! │   (fill / submit / check commands)      │
//! └──────────────────┬──────────────────────┘
//!                    │ drives
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          FormController                 │
//! │  (touched set, submit gating, snapshot) │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     SubmissionHandler (port trait)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   missive-adapters (Log, Json, Record)  │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │   (FormSchema, FieldSpec, Validation)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use missive_core::prelude::*;
//!
//! # async fn demo(handler: Arc<dyn SubmissionHandler>) -> MissiveResult<()> {
//! let form = FormController::new(contact_schema()?, handler)?;
//!
//! form.set_field_value("name", "Jane Doe")?;
//! form.touch_field("name")?;
//!
//! match form.submit().await {
//!     SubmitOutcome::Succeeded => println!("sent"),
//!     SubmitOutcome::Rejected(errors) => println!("{} invalid fields", errors.len()),
//!     other => println!("{other:?}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        FormController, FormOptions, FormSnapshot, SubmissionError, SubmissionHandler,
        SubmissionState, SubmitOutcome, ValidationMode,
    };
    pub use crate::domain::{
        ContactDetails, ContactSchemaOptions, Constraint, FieldKind, FieldSpec, FormSchema,
        FormValues, ValidationResult, contact_schema, contact_schema_with,
    };
    pub use crate::error::{MissiveError, MissiveResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
