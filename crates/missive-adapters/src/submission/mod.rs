//! Submission handler adapters.

mod json;
mod log;
mod recording;

pub use json::JsonSubmissionHandler;
pub use log::LogSubmissionHandler;
pub use recording::RecordingSubmissionHandler;
