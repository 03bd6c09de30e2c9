//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `missive-adapters` crate provides implementations.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ContactDetails;

/// Failure reported by a [`SubmissionHandler`].
///
/// The controller only records *that* a submission failed; the reason is
/// carried along for presentation and logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("submission failed: {reason}")]
pub struct SubmissionError {
    reason: String,
}

impl SubmissionError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Port for delivering a validated contact request.
///
/// Implemented by:
/// - `missive_adapters::LogSubmissionHandler` (tracing only)
/// - `missive_adapters::JsonSubmissionHandler` (JSON lines to a writer)
/// - `missive_adapters::RecordingSubmissionHandler` (testing)
///
/// ## Design Notes
///
/// - Exactly one outcome per call, delivered once
/// - The controller never calls this twice for one submit attempt
/// - How the data leaves the process (network, log, queue) is the
///   adapter's business
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionHandler: Send + Sync {
    /// Deliver `contact`; `Err` moves the form to `Failed`.
    async fn submit_contact(&self, contact: ContactDetails) -> Result<(), SubmissionError>;
}
