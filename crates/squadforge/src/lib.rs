//! SquadForge - An exact cricket squad optimizer in Rust
//!
//! Describe the candidates, state the squad limits and ask for the
//! provably best squad.
//!
//! # Example
//!
//! ```rust
//! use squadforge::prelude::*;
//!
//! let pool = CandidatePool::new(vec![
//!     Candidate::new("A", "Alpha", Role::Batter, 10.0).with_batting(50, 130.0),
//!     Candidate::new("B", "Bravo", Role::Bowler, 8.0).with_bowling(2, 7.5).overseas(true),
//!     Candidate::new("C", "Charlie", Role::AllRounder, 5.0).with_batting(10, 110.0).with_bowling(1, 8.0),
//! ]).unwrap();
//! let constraints = ConstraintSet::new(2, 15.0)
//!     .with_max_overseas(1)
//!     .with_role_minimum(Role::Batter, 1);
//!
//! let roster = OptimizationEngine::new()
//!     .solve(&pool, &constraints)
//!     .unwrap()
//!     .into_result()
//!     .unwrap();
//! assert_eq!(roster.total_cost(), 15.0);
//! assert_eq!(roster.total_impact(), 80.0);
//! ```

// Domain types
pub use squadforge_core::{
    Candidate, CandidatePool, ConstraintSet, OverseasFilter, PoolFilter, PoolStats, Role,
    ValidationError,
};

// Scoring policies
pub use squadforge_core::{FnScorer, ImpactScorer, RunsWicketsScorer};

// Configuration
pub use squadforge_config::{ConfigError, SearchConfig, SquadConfig, TerminationConfig, ThreadCount};

// Engine, results and errors
pub use squadforge_solver::{
    EngineConfig, ErrorKind, FeasibilityDiagnostics, OptimizationEngine, RosterMember,
    RosterResult, SolveError, SolveOutcome, SolverStats, ViolatedConstraint,
};

/// Console logging and report rendering.
#[cfg(feature = "console")]
pub use squadforge_console as console;

mod solver;
pub use solver::{run_solver, solve_squad};

pub mod prelude {
    pub use super::{Candidate, CandidatePool, ConstraintSet, PoolFilter, Role};
    pub use super::{FnScorer, ImpactScorer, RunsWicketsScorer};
    pub use super::{OptimizationEngine, RosterResult, SolveError, SolveOutcome};
    pub use super::SquadConfig;
}
