//! Flags shared by every `missive` subcommand.
//!
//! Flattened into [`super::Cli`] with `global = true`, so `missive -q submit`
//! and `missive submit -q` mean the same thing.

use clap::Args;
use clap::builder::FalseyValueParser;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log more about validation and submission on stderr.
    ///
    /// Logs are at warn level by default. Each `-v` lowers the threshold
    /// by one step (info, debug, trace). `RUST_LOG` wins when set.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Show more log output (-v, -vv, -vvv)",
        long_help = "Lower the log threshold on stderr:
    (none)  - warnings and errors
    -v      - submissions and state changes
    -vv     - every field edit and validation pass
    -vvv    - everything, including handler internals"
    )]
    pub verbose: u8,

    /// Print only errors and field problems.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors"
    )]
    pub quiet: bool,

    /// Plain output without ANSI styling.
    ///
    /// `NO_COLOR` turns this on for any value except an empty or falsey one
    /// (`0`, `false`, `no`, `off`).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        action = clap::ArgAction::SetTrue,
        value_parser = FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Read settings from this TOML file instead of the platform default.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Use this config file"
    )]
    pub config: Option<PathBuf>,

    /// How results are rendered on stdout.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Rendering of results on stdout"
    )]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Styled when stdout is a terminal, plain otherwise.
    #[default]
    Auto,
    /// Styled text.
    Human,
    /// Unstyled text.
    Plain,
    /// Snapshots and reports as JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::cli::Cli;

    #[test]
    fn no_color_flag_takes_no_value() {
        let cli = Cli::try_parse_from(["missive", "--no-color", "schema"]).unwrap();
        assert!(cli.global.no_color);
    }
}
