//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::{
    cli::{Cli, CompletionsArgs, Shell},
    error::CliResult,
};

const BIN_NAME: &str = "missive";

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    match args.shell {
        Shell::Bash => print_completions(shells::Bash),
        Shell::Zsh => print_completions(shells::Zsh),
        Shell::Fish => print_completions(shells::Fish),
        Shell::PowerShell => print_completions(shells::PowerShell),
        Shell::Elvish => print_completions(shells::Elvish),
    }

    Ok(())
}

fn print_completions<G: Generator>(shell: G) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, &mut std::io::stdout());
}
