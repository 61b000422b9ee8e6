//! Error types for squad solving.

use std::time::Duration;

use squadforge_core::ValidationError;
use thiserror::Error;

use crate::diagnostics::FeasibilityDiagnostics;
use crate::stats::SolverStats;

/// Every way a solve can end without an optimal roster.
///
/// No variant carries a roster: a solve that could not prove optimality
/// reports at most the objective value of its unverified incumbent.
#[derive(Debug, Clone, Error)]
pub enum SolveError {
    /// Malformed candidates or constraint parameters; no search attempted.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// No selection satisfies every constraint.
    #[error("{0}")]
    Infeasible(FeasibilityDiagnostics),

    /// The time limit elapsed before optimality was proven.
    #[error("time limit of {limit:?} reached after {} nodes without a verified optimum", .stats.nodes_explored)]
    Timeout {
        limit: Duration,
        stats: SolverStats,
        best_unverified_impact: Option<f64>,
    },

    /// The node limit was exhausted before optimality was proven.
    #[error("node limit of {limit} reached without a verified optimum")]
    NodeLimitReached {
        limit: u64,
        stats: SolverStats,
        best_unverified_impact: Option<f64>,
    },

    /// The caller requested cancellation.
    #[error("solve was cancelled after {} nodes", .stats.nodes_explored)]
    Cancelled {
        stats: SolverStats,
        best_unverified_impact: Option<f64>,
    },

    /// The search itself failed (numerical breakdown, resource exhaustion).
    #[error("internal solver error: {0}")]
    Internal(String),
}

/// Coarse classification of [`SolveError`] for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    Infeasible,
    SolverTimeout,
    SolverInternalError,
}

impl SolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SolveError::InvalidInput(_) => ErrorKind::InvalidInput,
            SolveError::Infeasible(_) => ErrorKind::Infeasible,
            SolveError::Timeout { .. }
            | SolveError::NodeLimitReached { .. }
            | SolveError::Cancelled { .. } => ErrorKind::SolverTimeout,
            SolveError::Internal(_) => ErrorKind::SolverInternalError,
        }
    }

    /// Violated-constraint report, present only for [`SolveError::Infeasible`].
    pub fn diagnostics(&self) -> Option<&FeasibilityDiagnostics> {
        match self {
            SolveError::Infeasible(diagnostics) => Some(diagnostics),
            _ => None,
        }
    }

    /// Objective of the best selection found before an early stop.
    ///
    /// Never a proven optimum.
    pub fn best_unverified_impact(&self) -> Option<f64> {
        match self {
            SolveError::Timeout {
                best_unverified_impact,
                ..
            }
            | SolveError::NodeLimitReached {
                best_unverified_impact,
                ..
            }
            | SolveError::Cancelled {
                best_unverified_impact,
                ..
            } => *best_unverified_impact,
            _ => None,
        }
    }
}

/// Result type alias for solving
pub type Result<T> = std::result::Result<T, SolveError>;
