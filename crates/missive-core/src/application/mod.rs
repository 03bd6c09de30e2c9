//! Application layer for Missive.
//!
//! This layer contains:
//! - **Services**: the `FormController` state machine
//! - **Ports**: the `SubmissionHandler` trait adapters implement
//! - **Errors**: Application-specific error types
//!
//! Validation rules live in `crate::domain`; this layer decides when they
//! run and what the user gets to see.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    FormController, FormOptions, FormSnapshot, SubmissionState, SubmitOutcome, ValidationMode,
};

pub use ports::{SubmissionError, SubmissionHandler};

pub use error::ApplicationError;
