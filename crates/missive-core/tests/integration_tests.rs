//! Integration tests for missive-core.
//!
//! Drives the public API the way a presentation layer would: edits, blurs,
//! submit, and a watch subscription.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use missive_core::prelude::*;

#[derive(Default)]
struct CollectingHandler {
    received: Mutex<Vec<ContactDetails>>,
}

#[async_trait]
impl SubmissionHandler for CollectingHandler {
    async fn submit_contact(&self, contact: ContactDetails) -> Result<(), SubmissionError> {
        self.received.lock().unwrap().push(contact);
        Ok(())
    }
}

#[tokio::test]
async fn test_full_contact_workflow() {
    let handler = Arc::new(CollectingHandler::default());
    let form = FormController::new(contact_schema().unwrap(), handler.clone()).unwrap();
    let mut updates = form.subscribe();

    // premature submit reveals every error and calls nothing
    let outcome = form.submit().await;
    let SubmitOutcome::Rejected(errors) = outcome else {
        panic!("expected rejection, got {outcome:?}");
    };
    assert_eq!(errors.len(), 3);
    assert!(handler.received.lock().unwrap().is_empty());

    form.set_field_value("name", "Jane Doe").unwrap();
    form.set_field_value("email", "jane@example.com").unwrap();
    form.set_field_value("message", "x".repeat(150)).unwrap();

    let snap = updates.borrow_and_update().clone();
    assert!(snap.is_valid());
    assert!(snap.visible_errors().is_empty());

    assert_eq!(form.submit().await, SubmitOutcome::Succeeded);
    assert_eq!(updates.borrow_and_update().state(), SubmissionState::Succeeded);

    let received = handler.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].email, "jane@example.com");
}

#[test]
fn test_message_bounds_are_inclusive() {
    let schema = contact_schema().unwrap();
    let values = |message: String| {
        FormValues::from_pairs([
            ("name", "Jane".to_string()),
            ("email", "jane@example.com".to_string()),
            ("message", message),
        ])
    };

    assert!(schema.validate(&values("x".repeat(149))).contains("message"));
    assert!(schema.validate(&values("x".repeat(150))).is_valid());
    assert!(schema.validate(&values("x".repeat(1000))).is_valid());
    assert!(schema.validate(&values("x".repeat(1001))).contains("message"));
}

#[test]
fn test_custom_bounds_schema() {
    let schema = contact_schema_with(ContactSchemaOptions {
        message_min: 2,
        message_max: 5,
    })
    .unwrap();

    let values = FormValues::from_pairs([
        ("name", "Jane"),
        ("email", "jane@example.com"),
        ("message", "hey"),
    ]);
    assert!(schema.parse(&values).is_ok());
}

#[test]
fn test_inverted_bounds_fail_at_build_time() {
    let result = contact_schema_with(ContactSchemaOptions {
        message_min: 10,
        message_max: 5,
    });
    assert!(result.is_err());
}

#[tokio::test]
async fn test_submit_outcome_into_result() {
    let handler = Arc::new(CollectingHandler::default());
    let form = FormController::new(contact_schema().unwrap(), handler).unwrap();

    let err = form.submit().await.into_result().unwrap_err();
    assert!(err.to_string().contains("email, message, name"));
    assert!(!err.is_retryable());
}
