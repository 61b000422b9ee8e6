use std::io;
use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use squadforge_cli::{init_logging, run, Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if !cli.quiet && matches!(cli.cmd, Command::Solve(_)) {
        init_logging();
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(cli, &mut out) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("{} {}", "error:".bright_red().bold(), e);
            ExitCode::from(1)
        }
    }
}
