//! The optimization engine: formulate, search, verify, report.
//!
//! Logging levels:
//! - **INFO**: Solve start/end with problem scale and result
//! - **DEBUG**: Incumbent improvements, tree splits and subtree completion
//! - **WARN**: Solves that stop without a verified optimum

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rayon::prelude::*;
use squadforge_config::SquadConfig;
use squadforge_core::{CandidatePool, ConstraintSet, ImpactScorer, RunsWicketsScorer};
use tracing::{info, warn};

use crate::diagnostics::FeasibilityDiagnostics;
use crate::error::{Result, SolveError};
use crate::exhaustive::{BranchAndBound, Incumbent, SearchOutcome};
use crate::program::{tolerance_for, SquadProgram};
use crate::roster::RosterResult;
use crate::scope::SearchScope;
use crate::stats::{whole_millis, SolverStats};
use crate::termination::{
    ExternalTermination, NodeCountTermination, OrTermination, TerminationReason, TimeTermination,
};

/// Search limits and parallelism for a solve.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Worker threads for one solve; 1 searches sequentially.
    pub threads: usize,
    /// Wall-clock budget for one solve.
    pub time_limit: Option<Duration>,
    /// Maximum search nodes for one solve.
    pub node_limit: Option<u64>,
    /// Setting this flag abandons in-flight solves.
    pub cancel_flag: Option<Arc<AtomicBool>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            time_limit: None,
            node_limit: None,
            cancel_flag: None,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads limits and thread count from a loaded configuration.
    pub fn from_squad_config(config: &SquadConfig) -> Self {
        let available = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            threads: config.search.thread_count.resolve(available),
            time_limit: config.time_limit(),
            node_limit: config.node_count_limit(),
            cancel_flag: None,
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }
}

/// Result of a solve that ran to completion.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// A provably optimal roster.
    Optimal {
        roster: RosterResult,
        stats: SolverStats,
    },
    /// No selection satisfies every constraint.
    Infeasible {
        diagnostics: FeasibilityDiagnostics,
        stats: SolverStats,
    },
}

impl SolveOutcome {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveOutcome::Optimal { .. })
    }

    pub fn roster(&self) -> Option<&RosterResult> {
        match self {
            SolveOutcome::Optimal { roster, .. } => Some(roster),
            SolveOutcome::Infeasible { .. } => None,
        }
    }

    pub fn diagnostics(&self) -> Option<&FeasibilityDiagnostics> {
        match self {
            SolveOutcome::Optimal { .. } => None,
            SolveOutcome::Infeasible { diagnostics, .. } => Some(diagnostics),
        }
    }

    pub fn stats(&self) -> &SolverStats {
        match self {
            SolveOutcome::Optimal { stats, .. } | SolveOutcome::Infeasible { stats, .. } => stats,
        }
    }

    /// Turns infeasibility into [`SolveError::Infeasible`].
    pub fn into_result(self) -> Result<RosterResult> {
        match self {
            SolveOutcome::Optimal { roster, .. } => Ok(roster),
            SolveOutcome::Infeasible { diagnostics, .. } => Err(SolveError::Infeasible(diagnostics)),
        }
    }
}

/// Exact squad optimizer.
///
/// Holds only a scoring policy and search limits; pools and constraints
/// are borrowed per call, so one engine can serve many solves, including
/// concurrent ones.
///
/// # Example
///
/// ```
/// use squadforge_core::{Candidate, CandidatePool, ConstraintSet, Role};
/// use squadforge_solver::OptimizationEngine;
///
/// let pool = CandidatePool::new(vec![
///     Candidate::new("A", "Alpha", Role::Batter, 10.0).with_batting(50, 130.0),
///     Candidate::new("B", "Bravo", Role::Bowler, 8.0).with_bowling(2, 7.5).overseas(true),
///     Candidate::new("C", "Charlie", Role::AllRounder, 5.0).with_batting(10, 110.0).with_bowling(1, 8.0),
/// ]).unwrap();
/// let constraints = ConstraintSet::new(2, 15.0)
///     .with_max_overseas(1)
///     .with_role_minimum(Role::Batter, 1);
///
/// let roster = OptimizationEngine::new()
///     .solve(&pool, &constraints)
///     .unwrap()
///     .into_result()
///     .unwrap();
/// assert_eq!(roster.selected_ids(), &["A".to_string(), "C".to_string()]);
/// assert_eq!(roster.total_impact(), 80.0);
/// ```
#[derive(Debug, Clone)]
pub struct OptimizationEngine<Sc = RunsWicketsScorer> {
    scorer: Sc,
    config: EngineConfig,
}

impl OptimizationEngine<RunsWicketsScorer> {
    /// Engine with the default runs-plus-wickets scorer, sequential and
    /// without limits.
    pub fn new() -> Self {
        Self::with_scorer(RunsWicketsScorer::default())
    }

    /// Engine configured from a loaded [`SquadConfig`].
    pub fn from_config(config: &SquadConfig) -> Self {
        let scorer = config
            .search
            .wicket_weight
            .map(RunsWicketsScorer::new)
            .unwrap_or_default();
        Self::with_scorer(scorer).with_config(EngineConfig::from_squad_config(config))
    }
}

impl Default for OptimizationEngine<RunsWicketsScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Sc: ImpactScorer> OptimizationEngine<Sc> {
    /// Engine with a custom scoring policy.
    pub fn with_scorer(scorer: Sc) -> Self {
        Self {
            scorer,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scorer(&self) -> &Sc {
        &self.scorer
    }

    /// Solves one configuration exactly.
    ///
    /// Returns `Ok` with either a provably optimal roster or an
    /// infeasibility report. Every other ending is an error, and no error
    /// carries a roster.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for a malformed budget or a negative impact
    /// - `Timeout`, `NodeLimitReached`, `Cancelled` when a limit fires first
    /// - `Internal` for non-finite impacts, a worker pool failure, or a
    ///   decoded selection that violates a row
    pub fn solve(&self, pool: &CandidatePool, constraints: &ConstraintSet) -> Result<SolveOutcome> {
        self.solve_with_threads(pool, constraints, self.config.threads)
    }

    /// Solves independent configurations against one pool in parallel.
    ///
    /// Results come back in input order. Each solve runs single-threaded
    /// on the global rayon pool.
    pub fn solve_batch(
        &self,
        pool: &CandidatePool,
        constraint_sets: &[ConstraintSet],
    ) -> Vec<Result<SolveOutcome>> {
        constraint_sets
            .par_iter()
            .map(|constraints| self.solve_with_threads(pool, constraints, 1))
            .collect()
    }

    fn solve_with_threads(
        &self,
        pool: &CandidatePool,
        constraints: &ConstraintSet,
        threads: usize,
    ) -> Result<SolveOutcome> {
        let scope = SearchScope::new();
        info!(
            event = "solve_start",
            candidate_count = pool.len(),
            squad_size = constraints.squad_size,
            budget_cap = constraints.budget_cap,
            threads,
            time_limit_ms = self.config.time_limit.map(whole_millis),
        );

        let program = SquadProgram::formulate(pool, constraints, &self.scorer)?;
        let search = BranchAndBound::new(&program);
        let termination = OrTermination::new((
            self.config.time_limit.map(TimeTermination::new),
            self.config.node_limit.map(NodeCountTermination::new),
            self.config.cancel_flag.clone().map(ExternalTermination::new),
        ));

        let SearchOutcome {
            best,
            stats,
            stopped,
        } = search.search(threads, &termination, &scope)?;

        if let Some(reason) = stopped {
            return Err(self.unverified(reason, best.as_ref(), stats));
        }

        match best {
            Some(incumbent) => {
                let roster = verify(&program, &incumbent)?;
                info!(
                    event = "solve_end",
                    status = "optimal",
                    total_impact = roster.total_impact(),
                    total_cost = roster.total_cost(),
                    nodes = stats.nodes_explored,
                    elapsed_ms = whole_millis(stats.elapsed),
                );
                Ok(SolveOutcome::Optimal { roster, stats })
            }
            None => {
                let diagnostics = FeasibilityDiagnostics::analyze(&program);
                info!(
                    event = "solve_end",
                    status = "infeasible",
                    violated = %diagnostics,
                    nodes = stats.nodes_explored,
                    elapsed_ms = whole_millis(stats.elapsed),
                );
                Ok(SolveOutcome::Infeasible { diagnostics, stats })
            }
        }
    }

    fn unverified(
        &self,
        reason: TerminationReason,
        best: Option<&Incumbent>,
        stats: SolverStats,
    ) -> SolveError {
        let best_unverified_impact = best.map(Incumbent::objective);
        warn!(
            event = "solve_end",
            status = "unverified",
            reason = %reason,
            best_unverified_impact,
            nodes = stats.nodes_explored,
            elapsed_ms = whole_millis(stats.elapsed),
        );
        match reason {
            TerminationReason::TimeLimit => SolveError::Timeout {
                limit: self.config.time_limit.unwrap_or_default(),
                stats,
                best_unverified_impact,
            },
            TerminationReason::NodeLimit => SolveError::NodeLimitReached {
                limit: self.config.node_limit.unwrap_or_default(),
                stats,
                best_unverified_impact,
            },
            TerminationReason::Cancelled => SolveError::Cancelled {
                stats,
                best_unverified_impact,
            },
        }
    }
}

/// Decodes the incumbent and re-checks it against every row.
fn verify(program: &SquadProgram<'_>, incumbent: &Incumbent) -> Result<RosterResult> {
    let solution = program.assignment(incumbent.selection());
    let selection = program.decode(&solution);
    let decoded = program.assignment(&selection);

    let violated = program.violated_rows(&decoded);
    if !violated.is_empty() {
        let names: Vec<&str> = violated.iter().map(|(name, _)| name.as_str()).collect();
        return Err(SolveError::Internal(format!(
            "decoded selection violates {}",
            names.join(", ")
        )));
    }

    let objective = program.objective(&decoded);
    if (objective - incumbent.objective()).abs() > tolerance_for(objective) {
        return Err(SolveError::Internal(format!(
            "decoded objective {objective} differs from search objective {}",
            incumbent.objective()
        )));
    }

    Ok(RosterResult::from_selection(program, &selection))
}

#[cfg(test)]
mod tests;
