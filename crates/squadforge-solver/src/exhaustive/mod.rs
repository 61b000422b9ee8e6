//! Exact branch-and-bound search over the squad program.
//!
//! Candidates are decided one at a time in impact order (ties by id),
//! include branch first, depth first. A node is dropped when no completion
//! can satisfy the rows (feasibility pruning) or when its Lagrangian upper
//! bound cannot beat the incumbent (bound pruning). The canonical selection
//! is the first optimum this order reaches:
//!
//! Among selections with the same objective (within tolerance), the one
//! whose ascending list of branching positions is lexicographically
//! smallest wins. Positions rank candidates by impact descending, then id
//! ascending.
//!
//! Every node after an incumbent comes later in that order, so a bound that
//! only ties the incumbent prunes too. Pools of equally scored candidates
//! therefore stop at the first complete selection instead of enumerating
//! every tied one.
//!
//! # Parallel search
//!
//! With more than one thread the first decisions are expanded into a
//! frontier of independent subtrees, kept in search order and searched on a
//! rayon pool. Each worker publishes its objective per subtree. A subtree
//! prunes ties against its own incumbent and earlier subtrees, and prunes
//! only strict losses against later ones. The per-subtree results are
//! merged with the tie rule above, so the returned selection does not
//! depend on the thread count.

mod bounder;
mod node;
mod space;
mod worker;

use rayon::prelude::*;
use tracing::debug;

use crate::error::SolveError;
use crate::program::SquadProgram;
use crate::scope::SearchScope;
use crate::stats::SolverStats;
use crate::termination::{Termination, TerminationReason};

pub use bounder::LagrangianBounder;
pub use node::SearchNode;
pub use space::SearchSpace;
pub use worker::Incumbent;

use worker::{is_feasible, FrontierIncumbents, Worker, WorkerResult};

/// Subtrees generated per worker thread when splitting.
const SUBTREES_PER_THREAD: usize = 8;

/// Result of a search, complete or interrupted.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Best selection found. Proven optimal only when `stopped` is `None`.
    pub best: Option<Incumbent>,
    pub stats: SolverStats,
    /// Why the search stopped early, if it did.
    pub stopped: Option<TerminationReason>,
}

impl SearchOutcome {
    /// Whether the whole tree was searched.
    pub fn is_complete(&self) -> bool {
        self.stopped.is_none()
    }
}

/// Branch-and-bound solver for one formulated program.
///
/// # Example
///
/// ```
/// use squadforge_core::{Candidate, CandidatePool, ConstraintSet, Role, RunsWicketsScorer};
/// use squadforge_solver::exhaustive::BranchAndBound;
/// use squadforge_solver::program::SquadProgram;
/// use squadforge_solver::scope::SearchScope;
///
/// let pool = CandidatePool::new(vec![
///     Candidate::new("a", "A", Role::Batter, 4.0).with_batting(60, 130.0),
///     Candidate::new("b", "B", Role::Bowler, 3.0).with_bowling(2, 7.0),
///     Candidate::new("c", "C", Role::Batter, 9.0).with_batting(90, 140.0),
/// ]).unwrap();
/// let constraints = ConstraintSet::new(2, 10.0);
/// let program = SquadProgram::formulate(&pool, &constraints, &RunsWicketsScorer::default()).unwrap();
///
/// let search = BranchAndBound::new(&program);
/// let outcome = search.search(1, &None::<squadforge_solver::termination::TimeTermination>, &SearchScope::new()).unwrap();
/// let best = outcome.best.unwrap();
/// assert_eq!(best.objective(), 100.0);
/// assert_eq!(best.selection(), &[0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct BranchAndBound {
    space: SearchSpace,
    bounder: LagrangianBounder,
}

impl BranchAndBound {
    /// Lays the program out in branching order and picks the root multiplier.
    pub fn new(program: &SquadProgram<'_>) -> Self {
        let space = SearchSpace::new(program);
        let mut scratch = Vec::with_capacity(space.len());
        let bounder = LagrangianBounder::at_root(&space, &mut scratch);
        Self { space, bounder }
    }

    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    pub fn bounder(&self) -> &LagrangianBounder {
        &self.bounder
    }

    /// Searches the tree with `threads` workers.
    ///
    /// # Errors
    ///
    /// `Internal` when the worker pool cannot be built.
    pub fn search<T: Termination>(
        &self,
        threads: usize,
        termination: &T,
        scope: &SearchScope,
    ) -> Result<SearchOutcome, SolveError> {
        let threads = threads.max(1);
        let (best, mut stats) = if threads == 1 {
            let result = Worker::new(&self.space, &self.bounder, termination, scope)
                .run(SearchNode::root());
            (result.best, result.stats)
        } else {
            self.search_parallel(threads, termination, scope)?
        };

        stats.threads = threads;
        stats.elapsed = scope.elapsed();
        Ok(SearchOutcome {
            best,
            stats,
            stopped: scope.stop_reason(),
        })
    }

    fn search_parallel<T: Termination>(
        &self,
        threads: usize,
        termination: &T,
        scope: &SearchScope,
    ) -> Result<(Option<Incumbent>, SolverStats), SolveError> {
        let mut stats = SolverStats::default();
        let frontier = self.frontier(split_depth(threads, self.space.len()), &mut stats);
        debug!(
            event = "split",
            subtrees = frontier.len(),
            threads,
            "Search tree split"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("squadforge-worker-{i}"))
            .build()
            .map_err(|e| SolveError::Internal(format!("failed to build worker pool: {e}")))?;

        let incumbents = FrontierIncumbents::new(frontier.len());
        let results: Vec<WorkerResult> = pool.install(|| {
            frontier
                .into_par_iter()
                .enumerate()
                .map(|(index, root)| {
                    let result = Worker::new(&self.space, &self.bounder, termination, scope)
                        .in_frontier(&incumbents, index)
                        .run(root);
                    debug!(
                        event = "subtree_done",
                        subtree = index,
                        nodes = result.stats.nodes_explored,
                        objective = result.best.as_ref().map(Incumbent::objective),
                        "Subtree searched"
                    );
                    result
                })
                .collect()
        });

        let mut best: Option<Incumbent> = None;
        for result in results {
            stats.merge(&result.stats);
            if let Some(candidate) = result.best {
                if best.as_ref().map_or(true, |b| candidate.beats(b)) {
                    best = Some(candidate);
                }
            }
        }
        Ok((best, stats))
    }

    /// Expands every feasible node above `split_depth` and returns the
    /// nodes at that depth (or complete selections above it), in
    /// include-first depth-first order.
    fn frontier(&self, split_depth: usize, stats: &mut SolverStats) -> Vec<SearchNode> {
        let mut scratch = Vec::with_capacity(self.space.len());
        let mut frontier = Vec::new();
        let mut stack = vec![SearchNode::root()];

        while let Some(node) = stack.pop() {
            if !is_feasible(&self.space, &node, &mut scratch) {
                stats.record_node();
                stats.record_feasibility_prune();
                continue;
            }
            if node.depth() >= split_depth || node.slots_left(&self.space) == 0 {
                frontier.push(node);
                continue;
            }
            stats.record_node();
            stack.push(node.exclude());
            stack.push(node.include(&self.space));
        }
        frontier
    }
}

/// Smallest depth giving at least `SUBTREES_PER_THREAD` subtrees per thread.
fn split_depth(threads: usize, positions: usize) -> usize {
    let target = threads.saturating_mul(SUBTREES_PER_THREAD);
    let mut depth = 0;
    while depth < positions && depth < usize::BITS as usize - 1 && (1usize << depth) < target {
        depth += 1;
    }
    depth
}
