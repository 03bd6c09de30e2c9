//! Implementation of the `missive check` command: validation only.

use missive_core::{
    application::ApplicationError,
    domain::{FormValues, ValidationResult},
    error::MissiveError,
};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    cli::{CheckArgs, ReportFormat},
    commands::{build_schema, read_input},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// JSON shape of a check.
#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    valid: bool,
    errors: &'a ValidationResult,
}

/// Validate the flag values against the schema without submitting.
///
/// Every field is reported, touched or not. Invalid input exits with 2.
#[instrument(skip_all)]
pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let schema = build_schema(&config)?;

    let mut values = FormValues::for_schema(&schema);
    for (field, value) in read_input(&args.input)? {
        values.set(field, value).map_err(MissiveError::from)?;
    }

    let result = schema.validate(&values);
    debug!(invalid_fields = result.len(), "Check finished");

    match ReportFormat::resolve(args.format, output.format()) {
        ReportFormat::Json => output.json(&CheckReport {
            valid: result.is_valid(),
            errors: &result,
        })?,
        ReportFormat::Human if result.is_valid() => output.success("All fields are valid")?,
        ReportFormat::Human => output.field_errors(&schema, &result)?,
    }

    if result.is_valid() {
        Ok(())
    } else {
        Err(MissiveError::from(ApplicationError::ValidationRejected {
            fields: result.fields().map(str::to_string).collect(),
        })
        .into())
    }
}
