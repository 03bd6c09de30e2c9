//! Handler that writes each submission as one JSON line.

use std::{
    fs::OpenOptions,
    io::{self, Write},
    path::Path,
    sync::{Mutex, PoisonError},
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use missive_core::{
    application::ports::{SubmissionError, SubmissionHandler},
    domain::ContactDetails,
};
use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

/// One line of output.
#[derive(Debug, Serialize)]
struct SubmissionRecord<'a> {
    id: Uuid,
    submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    contact: &'a ContactDetails,
}

/// Serializes every contact as `{id, submitted_at, name, email, message}`
/// followed by a newline.
///
/// The writer is shared behind a mutex, so concurrent forms produce whole
/// lines.
pub struct JsonSubmissionHandler {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonSubmissionHandler {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Write to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Append to `path`, creating it if needed.
    pub fn append_to(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }

    fn write_record(&self, record: &SubmissionRecord<'_>) -> Result<(), SubmissionError> {
        let line = serde_json::to_string(record)
            .map_err(|e| SubmissionError::new(format!("cannot encode submission: {e}")))?;

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}")
            .and_then(|()| writer.flush())
            .map_err(|e| SubmissionError::new(format!("cannot write submission: {e}")))
    }
}

impl std::fmt::Debug for JsonSubmissionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSubmissionHandler").finish_non_exhaustive()
    }
}

#[async_trait]
impl SubmissionHandler for JsonSubmissionHandler {
    #[instrument(skip_all)]
    async fn submit_contact(&self, contact: ContactDetails) -> Result<(), SubmissionError> {
        let record = SubmissionRecord {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            contact: &contact,
        };
        self.write_record(&record)?;
        debug!(id = %record.id, "Submission written");
        Ok(())
    }
}
