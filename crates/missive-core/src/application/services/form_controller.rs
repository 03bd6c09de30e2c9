//! Form Controller - the submission state machine.
//!
//! The controller owns one form instance: its values, which fields were
//! touched, the latest validation result and the submission lifecycle.
//!
//! ```text
//!  Idle ──submit(valid)──▶ Submitting ──Ok──▶ Succeeded
//!   ▲  ╲                        │                │
//!   │   submit(invalid)         └──Err──▶ Failed │
//!   │   (stays Idle)                        │    │
//!   └──────────── any field edit ───────────┴────┘
//! ```
//!
//! Every mutation publishes a fresh [`FormSnapshot`] on a `watch` channel;
//! presentation subscribes and re-reads instead of being called back.
//!
//! The only suspension point is the handler call inside [`FormController::submit`].
//! The returned future holds a `Weak` reference to the form, so closing the
//! form while a submission is pending turns its resolution into a no-op.

use std::collections::BTreeSet;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{SubmissionError, SubmissionHandler},
    },
    domain::{ContactDetails, DomainError, FormSchema, FormValues, ValidationResult},
    error::MissiveResult,
};

// ── State & options ───────────────────────────────────────────────────────────

/// Lifecycle of the external submission, independent of validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// `Succeeded` or `Failed`: the next edit returns the form to `Idle`.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When edits trigger revalidation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Revalidate on blur, on submit, and on edits to already-touched fields.
    #[default]
    OnBlur,
    /// Revalidate on every edit.
    OnChange,
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnBlur => f.write_str("on-blur"),
            Self::OnChange => f.write_str("on-change"),
        }
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "on-blur" | "blur" => Ok(Self::OnBlur),
            "on-change" | "change" => Ok(Self::OnChange),
            other => Err(format!(
                "unknown validation mode '{other}' (expected on-blur or on-change)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormOptions {
    pub mode: ValidationMode,
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Read-only view of a form, published after every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    values: FormValues,
    #[serde(skip)]
    errors: ValidationResult,
    #[serde(rename = "errors")]
    visible: ValidationResult,
    touched: BTreeSet<String>,
    submit_attempted: bool,
    state: SubmissionState,
    submit_count: u32,
}

impl FormSnapshot {
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field)
    }

    /// Errors eligible for display: touched fields, or all after a submit.
    pub fn visible_errors(&self) -> &ValidationResult {
        &self.visible
    }

    /// Visible error for `field`.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.visible.get(field)
    }

    /// Latest full schema result, including pristine fields.
    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Number of submissions handed to the handler.
    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Whether the last validation passed. In `OnBlur` mode this may lag
    /// behind edits to untouched fields until the next blur or submit.
    pub fn is_valid(&self) -> bool {
        self.errors.is_valid()
    }

    /// `false` while a submission is pending.
    pub fn can_submit(&self) -> bool {
        self.state != SubmissionState::Submitting
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Result of one [`FormController::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the handler was not called.
    Rejected(ValidationResult),
    /// Another submission was pending; nothing happened.
    Ignored,
    Succeeded,
    Failed(SubmissionError),
    /// The form was closed or reset before the handler resolved.
    Detached,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Map non-success outcomes onto [`ApplicationError`].
    pub fn into_result(self) -> MissiveResult<()> {
        match self {
            Self::Succeeded => Ok(()),
            Self::Rejected(errors) => Err(ApplicationError::ValidationRejected {
                fields: errors.fields().map(str::to_string).collect(),
            }
            .into()),
            Self::Ignored => Err(ApplicationError::SubmissionInProgress.into()),
            Self::Failed(e) => Err(ApplicationError::SubmissionFailed {
                reason: e.reason().to_string(),
            }
            .into()),
            Self::Detached => Err(ApplicationError::FormClosed.into()),
        }
    }
}

// ── Internal state ────────────────────────────────────────────────────────────

struct FormState {
    values: FormValues,
    errors: ValidationResult,
    touched: BTreeSet<String>,
    submit_attempted: bool,
    state: SubmissionState,
    submit_count: u32,
    /// Bumped on every submission and reset; stale resolutions are dropped.
    generation: u64,
    publisher: watch::Sender<FormSnapshot>,
}

impl FormState {
    fn snapshot(&self) -> FormSnapshot {
        let visible = self
            .errors
            .filtered(|field| self.submit_attempted || self.touched.contains(field));

        FormSnapshot {
            values: self.values.clone(),
            errors: self.errors.clone(),
            visible,
            touched: self.touched.clone(),
            submit_attempted: self.submit_attempted,
            state: self.state,
            submit_count: self.submit_count,
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(self.snapshot());
    }

    fn revalidate(&mut self, schema: &FormSchema) {
        self.errors = schema.validate(&self.values);
    }

    fn transition(&mut self, next: SubmissionState) {
        if self.state != next {
            debug!(from = %self.state, to = %next, "Submission state changed");
            self.state = next;
        }
    }
}

fn lock(shared: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Controller ────────────────────────────────────────────────────────────────

/// Drives one form instance.
///
/// Dropping the controller (or calling [`close`](Self::close)) tears the
/// instance down; pending submit futures then resolve to
/// [`SubmitOutcome::Detached`] without touching any state.
pub struct FormController {
    schema: Arc<FormSchema>,
    handler: Arc<dyn SubmissionHandler>,
    options: FormOptions,
    shared: Arc<Mutex<FormState>>,
}

impl FormController {
    /// Create a controller in `OnBlur` mode.
    ///
    /// Fails if `schema` does not declare every [`ContactDetails`] field.
    pub fn new(
        schema: impl Into<Arc<FormSchema>>,
        handler: Arc<dyn SubmissionHandler>,
    ) -> MissiveResult<Self> {
        Self::with_options(schema, handler, FormOptions::default())
    }

    pub fn with_options(
        schema: impl Into<Arc<FormSchema>>,
        handler: Arc<dyn SubmissionHandler>,
        options: FormOptions,
    ) -> MissiveResult<Self> {
        let schema = schema.into();
        if let Some(field) = ContactDetails::FIELDS
            .into_iter()
            .find(|field| !schema.contains(field))
        {
            return Err(DomainError::MissingField { field }.into());
        }

        let values = FormValues::for_schema(&schema);
        let errors = schema.validate(&values);
        let initial = FormSnapshot {
            values: values.clone(),
            errors: errors.clone(),
            visible: ValidationResult::new(),
            touched: BTreeSet::new(),
            submit_attempted: false,
            state: SubmissionState::Idle,
            submit_count: 0,
        };
        let (publisher, _) = watch::channel(initial);

        debug!(fields = schema.len(), mode = %options.mode, "Form opened");

        Ok(Self {
            schema,
            handler,
            options,
            shared: Arc::new(Mutex::new(FormState {
                values,
                errors,
                touched: BTreeSet::new(),
                submit_attempted: false,
                state: SubmissionState::Idle,
                submit_count: 0,
                generation: 0,
                publisher,
            })),
        })
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn options(&self) -> FormOptions {
        self.options
    }

    /// Current state of the form.
    pub fn snapshot(&self) -> FormSnapshot {
        self.lock().snapshot()
    }

    /// Receive a new snapshot after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<FormSnapshot> {
        self.lock().publisher.subscribe()
    }

    /// Update one field.
    ///
    /// Revalidates in `OnChange` mode, or when the field is touched or a
    /// submit was attempted. Editing after `Succeeded`/`Failed` returns the
    /// form to `Idle`.
    pub fn set_field_value(&self, field: &str, value: impl Into<String>) -> MissiveResult<()> {
        let mut state = self.lock();
        state.values.set(field, value)?;

        if state.state.is_terminal() {
            state.transition(SubmissionState::Idle);
        }

        if self.options.mode == ValidationMode::OnChange
            || state.submit_attempted
            || state.touched.contains(field)
        {
            state.revalidate(&self.schema);
        }

        state.publish();
        Ok(())
    }

    /// Mark `field` as touched (blurred) and revalidate.
    pub fn touch_field(&self, field: &str) -> MissiveResult<()> {
        if !self.schema.contains(field) {
            return Err(DomainError::UnknownField {
                field: field.to_string(),
            }
            .into());
        }

        let mut state = self.lock();
        state.touched.insert(field.to_string());
        state.revalidate(&self.schema);
        state.publish();
        Ok(())
    }

    /// Back to a pristine form. A pending submission is discarded.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.values = FormValues::for_schema(&self.schema);
        state.touched.clear();
        state.submit_attempted = false;
        state.generation += 1;
        state.revalidate(&self.schema);
        state.transition(SubmissionState::Idle);
        state.publish();
        debug!("Form reset");
    }

    /// Attempt a submission.
    ///
    /// Nothing happens until the returned future is polled. On first poll
    /// every field is marked touched and the values are validated; if they
    /// pass, the form enters `Submitting` and the handler is called exactly
    /// once. A submit polled while another is pending resolves to
    /// [`SubmitOutcome::Ignored`].
    ///
    /// The future is `'static` and does not keep the form alive.
    pub fn submit(&self) -> impl Future<Output = SubmitOutcome> + Send + 'static {
        let schema = Arc::clone(&self.schema);
        let handler = Arc::clone(&self.handler);
        let shared = Arc::downgrade(&self.shared);
        let submission_id = Uuid::new_v4();

        async move {
            let started = match shared.upgrade() {
                Some(form) => begin_submit(&schema, &form),
                None => return SubmitOutcome::Detached,
            };

            let (contact, generation) = match started {
                Started::Settled(outcome) => return outcome,
                Started::Submitting {
                    contact,
                    generation,
                } => (contact, generation),
            };

            let mut in_flight = InFlight {
                shared,
                generation,
                settled: false,
            };

            info!("Handing contact to submission handler");
            let result = handler.submit_contact(contact).await;
            in_flight.settle(result)
        }
        .instrument(info_span!("submit", %submission_id))
    }

    /// Tear the instance down.
    pub fn close(self) {
        debug!("Form closed");
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        lock(&self.shared)
    }
}

enum Started {
    Settled(SubmitOutcome),
    Submitting {
        contact: ContactDetails,
        generation: u64,
    },
}

/// Synchronous half of a submit: validation and the `Submitting` transition.
fn begin_submit(schema: &FormSchema, shared: &Mutex<FormState>) -> Started {
    let mut state = lock(shared);

    if state.state == SubmissionState::Submitting {
        debug!("Submit ignored, a submission is already pending");
        return Started::Settled(SubmitOutcome::Ignored);
    }

    state.submit_attempted = true;
    state
        .touched
        .extend(schema.field_names().map(str::to_string));

    let parsed = schema.parse(&state.values);
    let validated = match parsed {
        Ok(validated) => validated,
        Err(errors) => {
            state.errors = errors.clone();
            state.transition(SubmissionState::Idle);
            state.publish();
            info!(invalid_fields = errors.len(), "Submit rejected by validation");
            return Started::Settled(SubmitOutcome::Rejected(errors));
        }
    };
    state.errors = ValidationResult::new();

    let contact = match ContactDetails::try_from(&validated) {
        Ok(contact) => contact,
        Err(e) => {
            warn!(error = %e, "Validated values do not form a contact");
            state.transition(SubmissionState::Failed);
            state.publish();
            return Started::Settled(SubmitOutcome::Failed(SubmissionError::new(e.to_string())));
        }
    };

    state.generation += 1;
    state.submit_count += 1;
    state.transition(SubmissionState::Submitting);
    state.publish();

    Started::Submitting {
        contact,
        generation: state.generation,
    }
}

/// Tracks one pending handler call.
///
/// Dropping it unsettled (the submit future was cancelled) returns the form
/// to `Idle` so the user can submit again.
struct InFlight {
    shared: Weak<Mutex<FormState>>,
    generation: u64,
    settled: bool,
}

impl InFlight {
    fn settle(&mut self, result: Result<(), SubmissionError>) -> SubmitOutcome {
        self.settled = true;

        let Some(shared) = self.shared.upgrade() else {
            debug!("Form closed before the submission resolved, result dropped");
            return SubmitOutcome::Detached;
        };
        let mut state = lock(&shared);

        if state.generation != self.generation || state.state != SubmissionState::Submitting {
            debug!("Stale submission result discarded");
            return SubmitOutcome::Detached;
        }

        let outcome = match result {
            Ok(()) => {
                state.transition(SubmissionState::Succeeded);
                info!("Submission succeeded");
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                state.transition(SubmissionState::Failed);
                warn!(error = %e, "Submission failed");
                SubmitOutcome::Failed(e)
            }
        };
        state.publish();
        outcome
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Some(shared) = self.shared.upgrade() {
            let mut state = lock(&shared);
            if state.generation == self.generation && state.state == SubmissionState::Submitting {
                warn!("Submission abandoned before the handler resolved");
                state.transition(SubmissionState::Idle);
                state.publish();
            }
        }
    }
}
