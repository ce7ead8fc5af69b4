//! elfdiff - compares the allocatable sections of two ELF objects, either
//! standalone files or members of `ar` archives.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use std::process::ExitCode;

const EXIT_DIFFERENT: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Some(shell) = cli.completions {
        commands::completion::execute(shell);
        return ExitCode::SUCCESS;
    }

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match commands::compare::execute(&cli.compare, &*formatter) {
        Ok(false) => ExitCode::SUCCESS,
        Ok(true) => ExitCode::from(EXIT_DIFFERENT),
        Err(err) => {
            formatter.format_error(&err);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
