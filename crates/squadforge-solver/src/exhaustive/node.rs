//! Search tree nodes.
//!
//! Each node represents a partial selection: every position before
//! `depth` has been decided, and `chosen` lists the included ones.

use smallvec::SmallVec;

use super::space::SearchSpace;

/// A partial selection in the search tree.
#[derive(Debug, Clone, Default)]
pub struct SearchNode {
    /// Next position to decide (0 = root).
    depth: usize,
    /// Included positions, ascending.
    chosen: SmallVec<[u32; 16]>,
    cost: f64,
    impact: f64,
    overseas: u32,
    role_counts: [u32; 4],
}

impl SearchNode {
    /// Creates the root node: nothing decided.
    pub fn root() -> Self {
        Self::default()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Included positions, ascending.
    #[inline]
    pub fn chosen(&self) -> &[u32] {
        &self.chosen
    }

    #[inline]
    pub fn selected(&self) -> u32 {
        self.chosen.len() as u32
    }

    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    #[inline]
    pub fn impact(&self) -> f64 {
        self.impact
    }

    #[inline]
    pub fn overseas(&self) -> u32 {
        self.overseas
    }

    /// Open squad slots.
    #[inline]
    pub fn slots_left(&self, space: &SearchSpace) -> u32 {
        space.squad_size().saturating_sub(self.selected())
    }

    /// Per-role shortfall against the minimums.
    #[inline]
    pub fn role_deficits(&self, space: &SearchSpace) -> [u32; 4] {
        let minimums = space.minimums();
        std::array::from_fn(|r| minimums[r].saturating_sub(self.role_counts[r]))
    }

    /// Child that includes the candidate at `depth`.
    pub fn include(&self, space: &SearchSpace) -> Self {
        let position = self.depth;
        let mut child = self.clone();
        child.depth += 1;
        child.chosen.push(position as u32);
        child.cost += space.price(position);
        child.impact += space.impact(position);
        child.overseas += u32::from(space.is_overseas(position));
        child.role_counts[space.role(position)] += 1;
        child
    }

    /// Child that leaves the candidate at `depth` out.
    pub fn exclude(&self) -> Self {
        let mut child = self.clone();
        child.depth += 1;
        child
    }
}
