//! Infrastructure adapters for Missive.
//!
//! This crate implements the ports defined in `missive-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod submission;

// Re-export commonly used adapters
pub use submission::{JsonSubmissionHandler, LogSubmissionHandler, RecordingSubmissionHandler};
