//! Implementation of the `missive submit` command.
//!
//! Responsibility: feed flag values through a `FormController` exactly as an
//! interactive user would (edit, blur, submit) and report the outcome.

use missive_adapters::RecordingSubmissionHandler;
use missive_core::{
    application::{FormController, SubmitOutcome},
    domain::FormSchema,
};
use tracing::{info, instrument};

use crate::{
    cli::{OutputFormat, SubmitArgs},
    commands::{build_handler, build_schema, read_input, runtime},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute the `missive submit` command.
///
/// Exit codes follow the outcome: invalid fields → 2, handler failure → 1.
#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(args: SubmitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let values = read_input(&args.input)?;
    let schema = build_schema(&config)?;
    let recorder = args.dry_run.then(RecordingSubmissionHandler::new);
    let handler = build_handler(&config, recorder.as_ref())?;

    let form = FormController::with_options(schema, handler, config.form_options())?;
    for (field, value) in values {
        form.set_field_value(field, value)?;
        form.touch_field(field)?;
    }

    let runtime = runtime()?;
    let spinner = output.spinner("Sending your message");
    let outcome = runtime.block_on(form.submit());
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if output.format() == OutputFormat::Json {
        output.json(&form.snapshot())?;
    } else {
        report(&outcome, form.schema(), &output)?;
    }

    if let Some(recorder) = recorder {
        info!(recorded = recorder.len(), "Dry run finished");
        if outcome.is_success() && output.format() != OutputFormat::Json {
            output.info("Dry run: nothing was delivered")?;
        }
    }

    outcome.into_result()?;
    Ok(())
}

/// Human-readable outcome. Error outcomes are also returned to `main`.
pub(crate) fn report(
    outcome: &SubmitOutcome,
    schema: &FormSchema,
    output: &OutputManager,
) -> CliResult<()> {
    match outcome {
        SubmitOutcome::Succeeded => output.success("Message sent. Thank you!")?,
        SubmitOutcome::Rejected(errors) => output.field_errors(schema, errors)?,
        SubmitOutcome::Failed(e) => {
            output.error(&format!("Could not send your message: {}", e.reason()))?
        }
        SubmitOutcome::Ignored | SubmitOutcome::Detached => {}
    }
    Ok(())
}
