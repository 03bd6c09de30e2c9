//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `missive-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `SubmissionHandler`: delivers validated contact requests
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `FormController` methods (`set_field_value`, `touch_field`, `submit`)

pub mod output;

#[cfg(test)]
pub use output::MockSubmissionHandler;
pub use output::{SubmissionError, SubmissionHandler};
