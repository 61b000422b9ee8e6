//! Depth-first search of one subtree.

use tracing::debug;

use super::bounder::LagrangianBounder;
use super::node::SearchNode;
use super::space::SearchSpace;
use crate::program::tolerance_for;
use crate::scope::{AtomicObjective, SearchScope};
use crate::stats::SolverStats;
use crate::termination::Termination;

/// Nodes a worker explores between termination checks.
pub(crate) const CHECK_INTERVAL: u64 = 256;

/// Best complete selection found so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    objective: f64,
    /// Pool indices, ascending.
    selection: Vec<usize>,
    /// Branching positions of the selection, ascending.
    positions: Vec<u32>,
}

impl Incumbent {
    pub(crate) fn from_node(space: &SearchSpace, node: &SearchNode) -> Self {
        let mut selection: Vec<usize> = node
            .chosen()
            .iter()
            .map(|&p| space.pool_index(p as usize))
            .collect();
        selection.sort_unstable();
        Self {
            objective: node.impact(),
            selection,
            positions: node.chosen().to_vec(),
        }
    }

    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Selected pool indices, ascending.
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Whether `self` should replace `other`.
    ///
    /// A higher objective wins; within tolerance the selection whose
    /// ascending branching positions are lexicographically smaller wins.
    /// Include-first depth-first search reaches selections in exactly that
    /// order, so among ties the first one found is kept.
    pub fn beats(&self, other: &Incumbent) -> bool {
        let tol = tolerance_for(self.objective.max(other.objective));
        if self.objective > other.objective + tol {
            true
        } else if other.objective > self.objective + tol {
            false
        } else {
            self.positions < other.positions
        }
    }
}

/// Objectives published per frontier subtree, in frontier order.
///
/// A subtree's ties lose to every earlier subtree, so a worker may prune
/// ties against earlier slots but only strict losses against later ones.
#[derive(Debug)]
pub(crate) struct FrontierIncumbents {
    slots: Vec<AtomicObjective>,
}

impl FrontierIncumbents {
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).map(|_| AtomicObjective::new()).collect(),
        }
    }

    pub fn publish(&self, subtree: usize, objective: f64) {
        self.slots[subtree].offer(objective);
    }

    /// Best objective of the subtrees before `subtree`.
    pub fn best_before(&self, subtree: usize) -> Option<f64> {
        self.slots[..subtree]
            .iter()
            .filter_map(AtomicObjective::get)
            .reduce(f64::max)
    }
}

/// What a worker hands back after its subtree.
#[derive(Debug, Default)]
pub(crate) struct WorkerResult {
    pub best: Option<Incumbent>,
    pub stats: SolverStats,
}

/// Explores one subtree with an explicit stack, include branch first.
pub(crate) struct Worker<'a, T> {
    space: &'a SearchSpace,
    bounder: &'a LagrangianBounder,
    termination: &'a T,
    scope: &'a SearchScope,
    /// Shared table and this worker's subtree index, when split.
    frontier: Option<(&'a FrontierIncumbents, usize)>,
    stats: SolverStats,
    best: Option<Incumbent>,
    /// Snapshot of the best objective from earlier subtrees.
    earlier: Option<f64>,
    /// Snapshot of the best objective from any worker.
    global: Option<f64>,
    scratch: Vec<f64>,
    pending_nodes: u64,
}

impl<'a, T: Termination> Worker<'a, T> {
    pub fn new(
        space: &'a SearchSpace,
        bounder: &'a LagrangianBounder,
        termination: &'a T,
        scope: &'a SearchScope,
    ) -> Self {
        Self {
            space,
            bounder,
            termination,
            scope,
            frontier: None,
            stats: SolverStats {
                subtrees: 1,
                ..SolverStats::default()
            },
            best: None,
            earlier: None,
            global: None,
            scratch: Vec::with_capacity(space.len()),
            pending_nodes: 0,
        }
    }

    /// Makes this worker the searcher of frontier subtree `index`.
    pub fn in_frontier(mut self, incumbents: &'a FrontierIncumbents, index: usize) -> Self {
        self.frontier = Some((incumbents, index));
        self
    }

    pub fn run(mut self, root: SearchNode) -> WorkerResult {
        if self.should_stop() {
            return self.finish();
        }
        self.refresh_shared();

        let mut stack = Vec::with_capacity(self.space.len() + 1);
        stack.push(root);

        while let Some(node) = stack.pop() {
            self.stats.record_node();
            self.pending_nodes += 1;
            if self.pending_nodes >= CHECK_INTERVAL && self.flush_and_check() {
                break;
            }

            if !is_feasible(self.space, &node, &mut self.scratch) {
                self.stats.record_feasibility_prune();
                continue;
            }
            if node.slots_left(self.space) == 0 {
                self.evaluate_leaf(&node);
                continue;
            }

            let bound = self.bounder.upper_bound(self.space, &node, &mut self.scratch);
            if self.is_dominated(bound) {
                self.stats.record_bound_prune();
                continue;
            }

            stack.push(node.exclude());
            stack.push(node.include(self.space));
        }

        self.finish()
    }

    fn finish(mut self) -> WorkerResult {
        self.scope.add_nodes(self.pending_nodes);
        self.pending_nodes = 0;
        WorkerResult {
            best: self.best,
            stats: self.stats,
        }
    }

    /// Reports pending nodes and refreshes the shared incumbents; true when
    /// the search must stop.
    fn flush_and_check(&mut self) -> bool {
        self.scope.add_nodes(self.pending_nodes);
        self.pending_nodes = 0;
        if self.should_stop() {
            return true;
        }
        self.refresh_shared();
        false
    }

    fn refresh_shared(&mut self) {
        self.global = self.scope.best_objective();
        if let Some((incumbents, index)) = self.frontier {
            self.earlier = incumbents.best_before(index);
        }
    }

    fn should_stop(&self) -> bool {
        if self.scope.is_stopped() {
            return true;
        }
        match self.termination.check(self.scope) {
            Some(reason) => {
                self.scope.stop(reason);
                true
            }
            None => false,
        }
    }

    /// True when no selection under a node bounded by `bound` can replace
    /// the canonical incumbent.
    ///
    /// Everything below the node comes after this worker's own incumbent
    /// and after every earlier subtree in search order, so reaching their
    /// objective is not enough. Incumbents from later subtrees only prune
    /// nodes that fall strictly short of them.
    fn is_dominated(&self, bound: f64) -> bool {
        let local = self.best.as_ref().map(Incumbent::objective);
        let preceding = match (local, self.earlier) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        if let Some(incumbent) = preceding {
            if bound <= incumbent + tolerance_for(incumbent) {
                return true;
            }
        }
        match self.global {
            Some(incumbent) => bound < incumbent - tolerance_for(incumbent),
            None => false,
        }
    }

    fn evaluate_leaf(&mut self, node: &SearchNode) {
        if let Some(best) = &self.best {
            if node.impact() <= best.objective + tolerance_for(best.objective) {
                self.stats.record_leaf(false);
                return;
            }
        }

        let candidate = Incumbent::from_node(self.space, node);
        debug!(
            event = "incumbent",
            objective = candidate.objective,
            nodes = self.stats.nodes_explored,
            "Incumbent improved"
        );
        self.stats.record_leaf(true);
        self.scope.offer_objective(candidate.objective);
        if let Some((incumbents, index)) = self.frontier {
            incumbents.publish(index, candidate.objective);
        }
        self.best = Some(candidate);
    }
}

/// Whether some completion of `node` can satisfy every row.
///
/// Checked cheapest first: caps already crossed, cardinality, role
/// deficits, the overseas cap against the domestic supply, and finally the
/// cheapest completion against the budget left.
pub(crate) fn is_feasible(space: &SearchSpace, node: &SearchNode, scratch: &mut Vec<f64>) -> bool {
    if node.cost() > space.budget_limit() || node.overseas() > space.max_overseas() {
        return false;
    }

    let depth = node.depth();
    let slots = node.slots_left(space);
    if node.selected() > space.squad_size() || slots as usize > space.len() - depth {
        return false;
    }

    let needs = node.role_deficits(space);
    let supply = space.roles_remaining(depth);
    let mut total_need = 0u64;
    for (&need, &available) in needs.iter().zip(&supply) {
        if need > available {
            return false;
        }
        total_need += u64::from(need);
    }
    if total_need > u64::from(slots) {
        return false;
    }

    let overseas_left = space.overseas_remaining(depth);
    let domestic_left = (space.len() - depth) as u32 - overseas_left;
    let overseas_room = space.max_overseas() - node.overseas();
    if domestic_left + overseas_room.min(overseas_left) < slots {
        return false;
    }

    let cheapest = space.cheapest_completion(depth, slots as usize, needs, scratch);
    cheapest <= space.budget_limit() - node.cost()
}
