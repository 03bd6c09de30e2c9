//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "missive",
    bin_name = "missive",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2709} Contact form with schema-driven validation",
    long_about = "Missive collects a name, an email address and a message, \
                  validates them against the contact schema and hands valid \
                  submissions to a configurable handler.",
    after_help = "EXAMPLES:\n\
        \x20 missive fill\n\
        \x20 missive submit --name 'Jane Doe' --email jane@example.com --message-file msg.txt\n\
        \x20 missive check --email nope --format json\n\
        \x20 missive completions bash > /usr/share/bash-completion/completions/missive",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fill the contact form interactively.
    #[command(
        visible_alias = "f",
        about = "Fill the contact form interactively",
        after_help = "EXAMPLES:\n\
            \x20 missive fill\n\
            \x20 missive fill --dry-run"
    )]
    Fill(FillArgs),

    /// Submit the contact form from flags.
    #[command(
        visible_alias = "s",
        about = "Submit the contact form",
        after_help = "EXAMPLES:\n\
            \x20 missive submit -n 'Jane Doe' -e jane@example.com -m \"$(cat msg.txt)\"\n\
            \x20 missive submit -n 'Jane Doe' -e jane@example.com --message-file msg.txt\n\
            \x20 missive --output-format json submit ... --dry-run"
    )]
    Submit(SubmitArgs),

    /// Validate input without submitting.
    #[command(
        about = "Validate input without submitting",
        after_help = "EXAMPLES:\n\
            \x20 missive check --name Jane --email jane@example.com --message hi\n\
            \x20 missive check --email nope --format json"
    )]
    Check(CheckArgs),

    /// Show the fields of the contact form and their rules.
    #[command(
        about = "Show the form schema",
        after_help = "EXAMPLES:\n\
            \x20 missive schema\n\
            \x20 missive schema --format json"
    )]
    Schema(SchemaArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 missive completions bash > ~/.local/share/bash-completion/completions/missive\n\
            \x20 missive completions zsh  > ~/.zfunc/_missive\n\
            \x20 missive completions fish > ~/.config/fish/completions/missive.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Missive configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 missive config get schema.message_min\n\
            \x20 missive config list\n\
            \x20 missive config path"
    )]
    Config(ConfigCommands),
}

// ── form input ────────────────────────────────────────────────────────────────

/// Field values supplied on the command line.
///
/// Every flag is optional: a missing field is submitted as an empty string
/// and reported by validation, not by clap.
#[derive(Debug, Default, Args)]
pub struct FormInput {
    /// Sender name.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Your name")]
    pub name: Option<String>,

    /// Sender email address.
    #[arg(short = 'e', long = "email", value_name = "EMAIL", help = "Your email")]
    pub email: Option<String>,

    /// Message body.
    #[arg(
        short = 'm',
        long = "message",
        value_name = "TEXT",
        conflicts_with = "message_file",
        help = "Your message"
    )]
    pub message: Option<String>,

    /// Read the message body from a file (`-` for stdin).
    #[arg(
        long = "message-file",
        value_name = "FILE",
        help = "Read the message from FILE ('-' for stdin)"
    )]
    pub message_file: Option<PathBuf>,
}

// ── fill ──────────────────────────────────────────────────────────────────────

/// Arguments for `missive fill`.
#[derive(Debug, Args)]
pub struct FillArgs {
    /// Record the submission instead of delivering it.
    #[arg(long = "dry-run", help = "Validate and record without delivering")]
    pub dry_run: bool,
}

// ── submit ────────────────────────────────────────────────────────────────────

/// Arguments for `missive submit`.
#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub input: FormInput,

    /// Record the submission instead of delivering it.
    #[arg(long = "dry-run", help = "Validate and record without delivering")]
    pub dry_run: bool,
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `missive check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: FormInput,

    /// Report format; follows `--output-format` when omitted.
    #[arg(long = "format", value_enum, help = "Report format")]
    pub format: Option<ReportFormat>,
}

// ── schema ────────────────────────────────────────────────────────────────────

/// Arguments for `missive schema`.
#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Report format; follows `--output-format` when omitted.
    #[arg(long = "format", value_enum, help = "Output format")]
    pub format: Option<ReportFormat>,
}

/// Output format for `check` and `schema`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable lines.
    Human,
    /// JSON document on stdout.
    Json,
}

impl ReportFormat {
    /// Explicit `--format`, else JSON only when `--output-format json`.
    pub fn resolve(explicit: Option<Self>, global: OutputFormat) -> Self {
        match (explicit, global) {
            (Some(format), _) => format,
            (None, OutputFormat::Json) => Self::Json,
            (None, _) => Self::Human,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `missive completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `missive config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `schema.message_min`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
