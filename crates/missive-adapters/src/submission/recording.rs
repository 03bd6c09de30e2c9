//! In-memory handler for tests and dry runs.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use missive_core::{
    application::ports::{SubmissionError, SubmissionHandler},
    domain::ContactDetails,
};
use tracing::debug;

/// Records every contact it receives.
///
/// Clones share the same record, so a test can keep one handle and give the
/// other to a form.
#[derive(Debug, Clone, Default)]
pub struct RecordingSubmissionHandler {
    inner: Arc<RwLock<RecordingInner>>,
}

#[derive(Debug, Default)]
struct RecordingInner {
    submissions: Vec<ContactDetails>,
    failure: Option<String>,
}

impl RecordingSubmissionHandler {
    /// Create a handler that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handler that records, then fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        let handler = Self::new();
        handler.fail_with(Some(reason.into()));
        handler
    }

    /// Switch failure mode; `None` makes it accept again.
    pub fn fail_with(&self, reason: Option<String>) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .failure = reason;
    }

    /// Every contact received so far, in order.
    pub fn submissions(&self) -> Vec<ContactDetails> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .submissions
            .clone()
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .submissions
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .submissions
            .clear();
    }
}

#[async_trait]
impl SubmissionHandler for RecordingSubmissionHandler {
    async fn submit_contact(&self, contact: ContactDetails) -> Result<(), SubmissionError> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.submissions.push(contact);
        debug!(count = inner.submissions.len(), "Submission recorded");

        match &inner.failure {
            Some(reason) => Err(SubmissionError::new(reason.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use missive_core::prelude::*;

    use super::*;

    fn fill(form: &FormController) {
        form.set_field_value("name", "Jane Doe").unwrap();
        form.set_field_value("email", "jane@example.com").unwrap();
        form.set_field_value("message", "x".repeat(160)).unwrap();
    }

    #[tokio::test]
    async fn records_submissions_through_a_form() {
        let handler = RecordingSubmissionHandler::new();
        let form = FormController::new(contact_schema().unwrap(), Arc::new(handler.clone())).unwrap();
        fill(&form);

        assert_eq!(form.submit().await, SubmitOutcome::Succeeded);
        assert_eq!(handler.len(), 1);
        assert_eq!(handler.submissions()[0].name, "Jane Doe");
    }

    #[tokio::test]
    async fn failing_handler_still_records_and_reports() {
        let handler = RecordingSubmissionHandler::failing("smtp down");
        let form = FormController::new(contact_schema().unwrap(), Arc::new(handler.clone())).unwrap();
        fill(&form);

        let outcome = form.submit().await;
        assert_eq!(outcome, SubmitOutcome::Failed(SubmissionError::new("smtp down")));
        assert_eq!(form.snapshot().state(), SubmissionState::Failed);
        assert_eq!(handler.len(), 1);

        handler.fail_with(None);
        assert_eq!(form.submit().await, SubmitOutcome::Succeeded);
        assert_eq!(handler.len(), 2);
    }

    #[tokio::test]
    async fn invalid_form_records_nothing() {
        let handler = RecordingSubmissionHandler::new();
        let form = FormController::new(contact_schema().unwrap(), Arc::new(handler.clone())).unwrap();
        form.set_field_value("message", "too short").unwrap();

        assert!(matches!(form.submit().await, SubmitOutcome::Rejected(_)));
        assert!(handler.is_empty());
    }

    #[test]
    fn clear_forgets_submissions() {
        let handler = RecordingSubmissionHandler::new();
        handler.inner.write().unwrap().submissions.push(ContactDetails {
            name: "a".into(),
            email: "b@c.d".into(),
            message: "m".into(),
        });
        handler.clear();
        assert!(handler.is_empty());
    }
}
