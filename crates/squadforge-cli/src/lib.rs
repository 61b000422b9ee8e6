//! Library half of the `squadforge` binary.
//!
//! Argument parsing, pool-file loading and the subcommands live here so
//! they can be driven from tests without spawning a process.

pub mod cli;
pub mod commands;
pub mod error;
pub mod pool_file;

pub use cli::{Cli, Command, SolveArgs, StatsArgs};
pub use commands::{run, Outcome};
pub use error::CliError;

/// Routes solver progress to stderr so stdout carries only the report.
pub fn init_logging() {
    squadforge::console::init_quiet();
}
