//! Implementation of the `missive fill` command.
//!
//! The interactive loop mirrors a browser form: each prompt is a field, and
//! leaving it (pressing enter) marks it touched so its error shows at once.
//! A rejected submit re-prompts only the invalid fields; a failed delivery
//! offers a retry with the values kept.

use crate::{cli::FillArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[cfg(feature = "interactive")]
pub fn execute(args: FillArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    interactive::run(args, config, output)
}

#[cfg(not(feature = "interactive"))]
pub fn execute(_args: FillArgs, _config: AppConfig, _output: OutputManager) -> CliResult<()> {
    Err(crate::error::CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

#[cfg(feature = "interactive")]
mod interactive {
    use std::{
        io::{self, IsTerminal},
        sync::Arc,
    };

    use dialoguer::{Confirm, Input, theme::ColorfulTheme};
    use missive_adapters::RecordingSubmissionHandler;
    use missive_core::application::{FormController, SubmitOutcome};
    use tracing::{info, instrument};

    use crate::{
        cli::FillArgs,
        commands::{build_handler, build_schema, runtime, submit::report},
        config::AppConfig,
        error::{CliError, CliResult},
        output::OutputManager,
    };

    #[instrument(skip_all, fields(dry_run = args.dry_run))]
    pub(super) fn run(args: FillArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
        if !io::stdin().is_terminal() {
            return Err(CliError::InvalidInput {
                message: "fill needs an interactive terminal".into(),
                source: None,
            });
        }

        let schema = Arc::new(build_schema(&config)?);
        let recorder = args.dry_run.then(RecordingSubmissionHandler::new);
        let handler = build_handler(&config, recorder.as_ref())?;
        let form = FormController::with_options(Arc::clone(&schema), handler, config.form_options())?;
        let runtime = runtime()?;
        let theme = ColorfulTheme::default();

        let mut pending: Vec<String> = schema.field_names().map(str::to_string).collect();
        output.header("Contact us")?;

        loop {
            for name in &pending {
                let Some(field) = schema.field(name) else {
                    continue;
                };
                let current = form.snapshot().value(name).to_string();

                let value: String = Input::with_theme(&theme)
                    .with_prompt(field.label_text())
                    .with_initial_text(current)
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_error)?;

                form.set_field_value(name, value)?;
                form.touch_field(name)?;
                if let Some(message) = form.snapshot().error(name) {
                    output.warning(message)?;
                }
            }

            let spinner = output.spinner("Sending your message");
            let outcome = runtime.block_on(form.submit());
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }
            report(&outcome, &schema, &output)?;

            match outcome {
                SubmitOutcome::Succeeded => break,
                SubmitOutcome::Rejected(errors) => {
                    pending = schema
                        .field_names()
                        .filter(|name| errors.contains(name))
                        .map(str::to_string)
                        .collect();
                }
                SubmitOutcome::Failed(e) => {
                    let retry = Confirm::with_theme(&theme)
                        .with_prompt("Try again?")
                        .default(true)
                        .interact()
                        .map_err(prompt_error)?;
                    if !retry {
                        return SubmitOutcome::Failed(e).into_result().map_err(CliError::from);
                    }
                    pending.clear();
                }
                other => return other.into_result().map_err(CliError::from),
            }
        }

        if let Some(recorder) = recorder {
            info!(recorded = recorder.len(), "Dry run finished");
            output.info("Dry run: nothing was delivered")?;
        }

        Ok(())
    }

    /// Ctrl-C at a prompt surfaces as an interrupted read.
    fn prompt_error(e: dialoguer::Error) -> CliError {
        let source = io::Error::from(e);
        if source.kind() == io::ErrorKind::Interrupted {
            return CliError::Cancelled;
        }
        CliError::IoError {
            message: "prompt failed".into(),
            source,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn interrupted_prompt_cancels() {
            let err = prompt_error(io::Error::from(io::ErrorKind::Interrupted).into());
            assert!(matches!(err, CliError::Cancelled));
            assert_eq!(err.exit_code(), 2);
        }

        #[test]
        fn broken_prompt_is_an_io_error() {
            let err = prompt_error(io::Error::from(io::ErrorKind::BrokenPipe).into());
            assert!(matches!(err, CliError::IoError { .. }));
        }
    }
}
