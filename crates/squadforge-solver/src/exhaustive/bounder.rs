//! Upper bounds for branch-and-bound pruning.
//!
//! The bounder estimates the best impact any completion of a node can
//! reach. If that optimistic bound falls below the incumbent, the branch
//! is pruned.

use super::node::SearchNode;
use super::space::{sum_largest, SearchSpace};

/// Number of ternary-search rounds used to pick the root multiplier.
const MULTIPLIER_ROUNDS: usize = 100;

/// Lagrangian bound with the budget row dualized.
///
/// For a multiplier `λ >= 0`, a node with impact `I`, budget allowance `R`
/// and `s` open slots is bounded by
///
/// ```text
/// UB(λ) = I + λ·R + (sum of the s largest (impact_j - λ·price_j)⁺ over undecided j)
/// ```
///
/// `UB(0)` is the plain cardinality bound. The multiplier is chosen once at
/// the root to minimize the root bound and reused everywhere; each node
/// takes the smaller of `UB(0)` and `UB(λ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagrangianBounder {
    multiplier: f64,
}

impl LagrangianBounder {
    /// A bounder that only uses the cardinality bound.
    pub fn cardinality() -> Self {
        Self { multiplier: 0.0 }
    }

    /// Picks the multiplier minimizing the root bound.
    ///
    /// `UB(λ)` is convex in `λ` (a sum of maxima of affine functions), so a
    /// ternary search over `[0, max impact/price]` converges. Beyond that
    /// range every priced candidate has a non-positive reduced impact and
    /// the bound only grows.
    pub fn at_root(space: &SearchSpace, scratch: &mut Vec<f64>) -> Self {
        let slots = space.squad_size() as usize;
        let allowance = space.budget_limit();

        let upper = (0..space.len())
            .filter(|&p| space.price(p) > 0.0)
            .map(|p| space.impact(p) / space.price(p))
            .fold(0.0_f64, f64::max);
        if upper <= 0.0 || slots == 0 {
            return Self::cardinality();
        }

        let root_bound = |lambda: f64, scratch: &mut Vec<f64>| {
            lambda * allowance + reduced_top(space, 0, slots, lambda, scratch)
        };

        let (mut low, mut high) = (0.0, upper);
        for _ in 0..MULTIPLIER_ROUNDS {
            let left = low + (high - low) / 3.0;
            let right = high - (high - low) / 3.0;
            if root_bound(left, scratch) <= root_bound(right, scratch) {
                high = right;
            } else {
                low = left;
            }
        }
        let lambda = (low + high) / 2.0;

        if root_bound(lambda, scratch) < space.top_impacts(0, slots) {
            Self { multiplier: lambda }
        } else {
            Self::cardinality()
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Optimistic bound on the impact of any completion of `node`.
    pub fn upper_bound(&self, space: &SearchSpace, node: &SearchNode, scratch: &mut Vec<f64>) -> f64 {
        let depth = node.depth();
        let slots = node.slots_left(space) as usize;
        let plain = node.impact() + space.top_impacts(depth, slots);
        if self.multiplier == 0.0 {
            return plain;
        }

        let allowance = (space.budget_limit() - node.cost()).max(0.0);
        let dual = node.impact()
            + self.multiplier * allowance
            + reduced_top(space, depth, slots, self.multiplier, scratch);
        plain.min(dual)
    }
}

/// Sum of the `slots` largest positive reduced impacts from `depth` on.
fn reduced_top(
    space: &SearchSpace,
    depth: usize,
    slots: usize,
    lambda: f64,
    scratch: &mut Vec<f64>,
) -> f64 {
    scratch.clear();
    scratch.extend(
        (depth..space.len())
            .map(|p| space.impact(p) - lambda * space.price(p))
            .filter(|&reduced| reduced > 0.0),
    );
    sum_largest(scratch, slots)
}
