//! Command handlers, one module per subcommand.
//!
//! The helpers below turn configuration and flags into the pieces every
//! form-driving command needs: the schema, a handler and a runtime.

pub mod check;
pub mod completions;
pub mod config;
pub mod fill;
pub mod schema;
pub mod submit;

use std::{
    fs,
    io::{self, Read},
    sync::Arc,
};

use missive_adapters::{JsonSubmissionHandler, LogSubmissionHandler, RecordingSubmissionHandler};
use missive_core::{
    application::ports::SubmissionHandler,
    domain::{FormSchema, contact_schema_with},
};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::{
    cli::FormInput,
    config::{AppConfig, HandlerKind},
    error::{CliError, CliResult, IntoCli},
};

/// Contact schema with the configured message bounds.
///
/// Inverted bounds surface as a schema error (exit code 4).
pub(crate) fn build_schema(config: &AppConfig) -> CliResult<FormSchema> {
    contact_schema_with(config.schema_options()).map_err(|e| CliError::Core(e.into()))
}

/// The configured handler, or a recorder for `--dry-run`.
pub(crate) fn build_handler(
    config: &AppConfig,
    recorder: Option<&RecordingSubmissionHandler>,
) -> CliResult<Arc<dyn SubmissionHandler>> {
    if let Some(recorder) = recorder {
        debug!("Dry run, submissions are recorded only");
        return Ok(Arc::new(recorder.clone()));
    }

    debug!(handler = %config.submission.handler, "Submission handler selected");
    let handler: Arc<dyn SubmissionHandler> = match config.submission.handler {
        HandlerKind::Log => Arc::new(LogSubmissionHandler::new()),
        HandlerKind::Json => match &config.submission.output {
            Some(path) => Arc::new(
                JsonSubmissionHandler::append_to(path)
                    .with_cli_context(|| format!("opening {}", path.display()))?,
            ),
            None => Arc::new(JsonSubmissionHandler::stdout()),
        },
    };
    Ok(handler)
}

/// Single-threaded runtime for the one await point: the handler call.
pub(crate) fn runtime() -> CliResult<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .with_cli_context(|| "starting async runtime")
}

/// Field values from flags, in schema order. Absent flags read as `""`.
pub(crate) fn read_input(input: &FormInput) -> CliResult<Vec<(&'static str, String)>> {
    let message = match (&input.message, &input.message_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) if path.as_os_str() == "-" => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .with_cli_context(|| "reading message from stdin")?;
            trim_line_ending(buf)
        }
        (None, Some(path)) => {
            let text = fs::read_to_string(path).map_err(|e| CliError::InvalidInput {
                message: format!("cannot read message file {}", path.display()),
                source: Some(Box::new(e)),
            })?;
            trim_line_ending(text)
        }
        (None, None) => String::new(),
    };

    Ok(vec![
        ("name", input.name.clone().unwrap_or_default()),
        ("email", input.email.clone().unwrap_or_default()),
        ("message", message),
    ])
}

/// Files usually end in a newline that is not part of the message.
fn trim_line_ending(text: String) -> String {
    text.trim_end_matches(['\r', '\n']).to_string()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::config::SchemaConfig;

    #[test]
    fn absent_flags_read_as_empty() {
        let values = read_input(&FormInput::default()).unwrap();
        assert_eq!(
            values,
            vec![
                ("name", String::new()),
                ("email", String::new()),
                ("message", String::new())
            ]
        );
    }

    #[test]
    fn message_file_is_read_without_trailing_newline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hello there").unwrap();

        let input = FormInput {
            message_file: Some(file.path().to_path_buf()),
            ..FormInput::default()
        };
        let values = read_input(&input).unwrap();
        assert_eq!(values[2], ("message", "hello there".to_string()));
    }

    #[test]
    fn missing_message_file_is_a_user_error() {
        let input = FormInput {
            message_file: Some("/definitely/not/here.txt".into()),
            ..FormInput::default()
        };
        let err = read_input(&input).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn inverted_bounds_fail_schema_build() {
        let config = AppConfig {
            schema: SchemaConfig {
                message_min: 50,
                message_max: 10,
            },
            ..AppConfig::default()
        };
        let err = build_schema(&config).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn dry_run_uses_the_recorder() {
        let recorder = RecordingSubmissionHandler::new();
        assert!(build_handler(&AppConfig::default(), Some(&recorder)).is_ok());
    }
}
