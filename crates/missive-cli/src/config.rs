//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only receives the schema bounds
//! and [`FormOptions`] derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables: `MISSIVE__SECTION__KEY`, e.g.
//!    `MISSIVE__SCHEMA__MESSAGE_MIN=20` (a `.env` file is honoured)
//! 2. Config file: `--config FILE`, else [`AppConfig::config_path`]
//! 3. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use directories::ProjectDirs;
use missive_core::{
    application::{FormOptions, ValidationMode},
    domain::{ContactSchemaOptions, DEFAULT_MESSAGE_MAX, DEFAULT_MESSAGE_MIN},
};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "MISSIVE";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Controller behaviour.
    pub form: FormConfig,
    /// Contact schema bounds.
    pub schema: SchemaConfig,
    /// Where valid submissions go.
    pub submission: SubmissionConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub validation_mode: ValidationMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub message_min: usize,
    pub message_max: usize,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            message_min: DEFAULT_MESSAGE_MIN,
            message_max: DEFAULT_MESSAGE_MAX,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    pub handler: HandlerKind,
    /// Append JSON lines here instead of stdout (`json` handler only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

/// Built-in submission handlers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    /// Report through the log only.
    #[default]
    Log,
    /// One JSON line per submission.
    Json,
}

impl std::fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Log => write!(f, "log"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then the TOML file, then environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("cannot read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("invalid configuration value")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.missive.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "missive", "missive")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".missive.toml"))
    }

    /// Message bounds for [`contact_schema_with`](missive_core::domain::contact_schema_with).
    pub fn schema_options(&self) -> ContactSchemaOptions {
        ContactSchemaOptions {
            message_min: self.schema.message_min,
            message_max: self.schema.message_max,
        }
    }

    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            mode: self.form.validation_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_contact_form() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.schema.message_min, 150);
        assert_eq!(cfg.schema.message_max, 1000);
        assert_eq!(cfg.submission.handler, HandlerKind::Log);
        assert_eq!(cfg.form.validation_mode, ValidationMode::OnBlur);
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn missing_optional_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg.schema.message_min, DEFAULT_MESSAGE_MIN);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[form]\nvalidation_mode = \"on-change\"\n\n[schema]\nmessage_min = 10\n\n[submission]\nhandler = \"json\""
        )
        .unwrap();

        let cfg = AppConfig::load_from(file.path(), true).unwrap();
        assert_eq!(cfg.form.validation_mode, ValidationMode::OnChange);
        assert_eq!(cfg.schema.message_min, 10);
        assert_eq!(cfg.schema.message_max, DEFAULT_MESSAGE_MAX);
        assert_eq!(cfg.submission.handler, HandlerKind::Json);
    }

    #[test]
    fn unknown_handler_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[submission]\nhandler = \"carrier-pigeon\"").unwrap();

        assert!(AppConfig::load_from(file.path(), true).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
