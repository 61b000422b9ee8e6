//! Subcommand implementations.
//!
//! Each command writes its report to the given sink and returns an
//! [`Outcome`] mapped to the process exit code.

use std::io::Write;

use serde::Serialize;
use squadforge::console::{render_diagnostics, render_pool_stats, render_roster};
use squadforge::{
    FeasibilityDiagnostics, OptimizationEngine, RosterResult, SolveError, SolveOutcome,
    SolverStats, SquadConfig, ThreadCount,
};

use crate::cli::{Cli, Command, SolveArgs, StatsArgs};
use crate::error::CliError;
use crate::pool_file::{load_pool, SAMPLE_POOL};

/// How a successful invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Command completed; for `solve`, a verified optimum was found.
    Success,
    /// No squad satisfies the constraints.
    Infeasible,
    /// A limit or cancellation stopped the search before optimality.
    Unverified,
}

impl Outcome {
    /// 0 success, 3 infeasible, 4 no verified optimum. Errors exit with 1.
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Infeasible => 3,
            Outcome::Unverified => 4,
        }
    }
}

pub fn run(cli: Cli, out: &mut dyn Write) -> Result<Outcome, CliError> {
    match cli.cmd {
        Command::Solve(args) => cmd_solve(&args, out),
        Command::Stats(args) => cmd_stats(&args, out),
        Command::Sample => {
            out.write_all(SAMPLE_POOL.as_bytes())?;
            Ok(Outcome::Success)
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum SolveReport<'a> {
    Optimal {
        roster: &'a RosterResult,
        stats: &'a SolverStats,
    },
    Infeasible {
        diagnostics: &'a FeasibilityDiagnostics,
        stats: &'a SolverStats,
    },
    Unverified {
        reason: String,
        best_unverified_impact: Option<f64>,
    },
}

/// Loads the config, applies command-line overrides and validates the result.
fn solve_config(args: &SolveArgs) -> Result<SquadConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => SquadConfig::load(path)?,
        None => SquadConfig::new(),
    };
    if let Some(threads) = args.threads {
        config = config.with_thread_count(ThreadCount::Count(threads));
    }
    if let Some(millis) = args.time_limit_ms {
        let mut termination = config.termination.take().unwrap_or_default();
        termination.seconds_spent_limit = None;
        termination.millis_spent_limit = Some(millis);
        config.termination = Some(termination);
    }
    config.validate()?;
    Ok(config)
}

fn cmd_solve(args: &SolveArgs, out: &mut dyn Write) -> Result<Outcome, CliError> {
    let pool = load_pool(&args.pool)?;
    let config = solve_config(args)?;
    let engine = OptimizationEngine::from_config(&config);

    let (report, outcome) = match engine.solve(&pool, &config.constraints) {
        Ok(solved) => solved_report(&solved, args.json)?,
        Err(
            err @ (SolveError::Timeout { .. }
            | SolveError::NodeLimitReached { .. }
            | SolveError::Cancelled { .. }),
        ) => {
            let report = if args.json {
                let report = SolveReport::Unverified {
                    reason: err.to_string(),
                    best_unverified_impact: err.best_unverified_impact(),
                };
                serde_json::to_string_pretty(&report)?
            } else {
                let best = err
                    .best_unverified_impact()
                    .map(|impact| format!("best impact seen {impact:.2} (unverified)"))
                    .unwrap_or_else(|| "no feasible squad seen".to_string());
                format!("No verified optimum: {err}\n{best}\n")
            };
            (report, Outcome::Unverified)
        }
        Err(err) => return Err(err.into()),
    };

    out.write_all(report.as_bytes())?;
    if args.json {
        writeln!(out)?;
    }
    Ok(outcome)
}

fn solved_report(solved: &SolveOutcome, json: bool) -> Result<(String, Outcome), CliError> {
    match solved {
        SolveOutcome::Optimal { roster, stats } => {
            let report = if json {
                serde_json::to_string_pretty(&SolveReport::Optimal { roster, stats })?
            } else {
                render_roster(roster)
            };
            Ok((report, Outcome::Success))
        }
        SolveOutcome::Infeasible { diagnostics, stats } => {
            let report = if json {
                serde_json::to_string_pretty(&SolveReport::Infeasible { diagnostics, stats })?
            } else {
                render_diagnostics(diagnostics)
            };
            Ok((report, Outcome::Infeasible))
        }
    }
}

fn cmd_stats(args: &StatsArgs, out: &mut dyn Write) -> Result<Outcome, CliError> {
    let stats = load_pool(&args.pool)?.stats();
    if args.json {
        serde_json::to_writer_pretty(&mut *out, &stats)?;
        writeln!(out)?;
    } else {
        out.write_all(render_pool_stats(&stats).as_bytes())?;
    }
    Ok(Outcome::Success)
}
