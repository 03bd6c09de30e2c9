//! Implementation of the `missive schema` command.

use missive_core::domain::{Constraint, FieldSpec};

use crate::{
    cli::{ReportFormat, SchemaArgs},
    commands::build_schema,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Print the configured contact schema.
pub fn execute(args: SchemaArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let schema = build_schema(&config)?;

    match ReportFormat::resolve(args.format, output.format()) {
        ReportFormat::Json => output.json(&schema)?,
        ReportFormat::Human => {
            output.header("Contact form fields:")?;
            for field in schema.fields() {
                output.print(&describe_field(field))?;
            }
        }
    }

    Ok(())
}

fn describe_field(field: &FieldSpec) -> String {
    let rules = field
        .constraints()
        .iter()
        .map(Constraint::describe)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "  {:<8} {:<6} {:<14} {}",
        field.name(),
        field.kind().as_str(),
        field.label_text(),
        if rules.is_empty() { "-" } else { rules.as_str() }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use missive_core::domain::contact_schema;

    #[test]
    fn message_row_lists_length_rule() {
        let schema = contact_schema().unwrap();
        let row = describe_field(schema.field("message").unwrap());
        assert!(row.contains("message"));
        assert!(row.contains("length 150..=1000"));
    }

    #[test]
    fn unconstrained_field_shows_dash() {
        let row = describe_field(&FieldSpec::text("note"));
        assert!(row.trim_end().ends_with('-'));
    }
}
