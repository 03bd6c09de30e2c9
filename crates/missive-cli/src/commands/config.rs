//! `missive config`: inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Every key `config get` understands.
const KEYS: &[&str] = &[
    "form.validation_mode",
    "schema.message_min",
    "schema.message_max",
    "submission.handler",
    "submission.output",
    "output.no_color",
];

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "form.validation_mode" => Ok(config.form.validation_mode.to_string()),
        "schema.message_min" => Ok(config.schema.message_min.to_string()),
        "schema.message_max" => Ok(config.schema.message_max.to_string()),
        "submission.handler" => Ok(config.submission.handler.to_string()),
        "submission.output" => Ok(config
            .submission
            .output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "stdout".into())),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}' (known: {})", KEYS.join(", ")),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_key_resolves() {
        let cfg = AppConfig::default();
        for key in KEYS {
            assert!(get_config_value(&cfg, key).is_ok(), "{key}");
        }
    }

    #[test]
    fn get_message_bounds() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "schema.message_min").unwrap(), "150");
        assert_eq!(get_config_value(&cfg, "schema.message_max").unwrap(), "1000");
    }

    #[test]
    fn get_validation_mode() {
        let cfg = AppConfig::default();
        assert_eq!(
            get_config_value(&cfg, "form.validation_mode").unwrap(),
            "on-blur"
        );
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }
}
