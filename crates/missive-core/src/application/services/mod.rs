//! Application services - orchestrate use cases.
//!
//! The only use case is driving a contact form from first keystroke to a
//! settled submission.

pub mod form_controller;

pub use form_controller::{
    FormController, FormOptions, FormSnapshot, SubmissionState, SubmitOutcome, ValidationMode,
};
