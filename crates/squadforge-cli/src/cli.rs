//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "squadforge",
    version,
    about = "Exact cricket squad optimizer over a candidate pool file."
)]
pub struct Cli {
    /// Suppress solver progress on stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pick the highest-impact squad that satisfies every constraint.
    Solve(SolveArgs),
    /// Summarize a candidate pool.
    Stats(StatsArgs),
    /// Print the built-in star-player pool as TOML.
    Sample,
}

#[derive(Debug, Parser)]
pub struct SolveArgs {
    /// Pool file (TOML, or YAML for .yaml/.yml) with a `candidates` array.
    #[arg(long)]
    pub pool: PathBuf,

    /// Solver configuration file (default: built-in constraints, no limits).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the result as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Worker threads for the search (overrides the config file).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Wall-clock limit in milliseconds (overrides the config file).
    #[arg(long)]
    pub time_limit_ms: Option<u64>,
}

#[derive(Debug, Parser)]
pub struct StatsArgs {
    /// Pool file (TOML, or YAML for .yaml/.yml) with a `candidates` array.
    #[arg(long)]
    pub pool: PathBuf,

    /// Print the statistics as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
