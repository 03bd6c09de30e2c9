//! Handler that only reports the submission through `tracing`.

use async_trait::async_trait;
use missive_core::{
    application::ports::{SubmissionError, SubmissionHandler},
    domain::ContactDetails,
};
use tracing::info;

/// Logs every contact at `info` and always succeeds.
///
/// The message body is not logged, only its length.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSubmissionHandler;

impl LogSubmissionHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SubmissionHandler for LogSubmissionHandler {
    async fn submit_contact(&self, contact: ContactDetails) -> Result<(), SubmissionError> {
        info!(
            name = %contact.name,
            email = %contact.email,
            message_chars = contact.message.chars().count(),
            "Form is submitted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_succeeds() {
        let handler = LogSubmissionHandler::new();
        let contact = ContactDetails {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            message: "hello".into(),
        };
        assert!(handler.submit_contact(contact).await.is_ok());
    }
}
