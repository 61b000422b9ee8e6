//! Solver entry points that hide the engine wiring.

use squadforge_config::SquadConfig;
use squadforge_core::{CandidatePool, ConstraintSet};
use squadforge_solver::{OptimizationEngine, RosterResult, SolveError, SolveOutcome};

/// Solves `pool` under the constraints, limits and threads of `config`.
pub fn run_solver(pool: &CandidatePool, config: &SquadConfig) -> Result<SolveOutcome, SolveError> {
    OptimizationEngine::from_config(config).solve(pool, &config.constraints)
}

/// Solves with the default engine and returns the optimal roster.
///
/// Infeasibility comes back as [`SolveError::Infeasible`].
pub fn solve_squad(
    pool: &CandidatePool,
    constraints: &ConstraintSet,
) -> Result<RosterResult, SolveError> {
    OptimizationEngine::new().solve(pool, constraints)?.into_result()
}
