//! Candidates laid out in branching order with the suffix tables the
//! feasibility and bound checks read.

use crate::program::{tolerance_for, SquadProgram};

/// The program flattened into branching order.
///
/// Position `p` is the `p`-th candidate by impact descending, then id
/// ascending. Suffix tables at index `p` describe positions `p..n`.
#[derive(Debug, Clone)]
pub struct SearchSpace {
    order: Vec<usize>,
    impacts: Vec<f64>,
    prices: Vec<f64>,
    roles: Vec<usize>,
    overseas: Vec<bool>,
    impact_prefix: Vec<f64>,
    role_suffix: Vec<[u32; 4]>,
    overseas_suffix: Vec<u32>,
    squad_size: u32,
    budget_limit: f64,
    max_overseas: u32,
    minimums: [u32; 4],
}

impl SearchSpace {
    pub fn new(program: &SquadProgram<'_>) -> Self {
        let pool = program.pool().candidates();
        let scores = program.impacts();
        let n = pool.len();

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            scores[b]
                .total_cmp(&scores[a])
                .then_with(|| pool[a].id.cmp(&pool[b].id))
        });

        let impacts: Vec<f64> = order.iter().map(|&i| scores[i]).collect();
        let prices: Vec<f64> = order.iter().map(|&i| pool[i].price).collect();
        let roles: Vec<usize> = order.iter().map(|&i| pool[i].role.index()).collect();
        let overseas: Vec<bool> = order.iter().map(|&i| pool[i].is_overseas).collect();

        let mut impact_prefix = Vec::with_capacity(n + 1);
        impact_prefix.push(0.0);
        for (p, impact) in impacts.iter().enumerate() {
            impact_prefix.push(impact_prefix[p] + impact);
        }

        let mut role_suffix = vec![[0u32; 4]; n + 1];
        let mut overseas_suffix = vec![0u32; n + 1];
        for p in (0..n).rev() {
            role_suffix[p] = role_suffix[p + 1];
            role_suffix[p][roles[p]] += 1;
            overseas_suffix[p] = overseas_suffix[p + 1] + u32::from(overseas[p]);
        }

        let constraints = program.constraints();
        Self {
            order,
            impacts,
            prices,
            roles,
            overseas,
            impact_prefix,
            role_suffix,
            overseas_suffix,
            squad_size: constraints.squad_size,
            budget_limit: constraints.budget_cap + tolerance_for(constraints.budget_cap),
            max_overseas: constraints.max_overseas,
            minimums: constraints.role_minimums(),
        }
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Pool index of the candidate at `position`.
    #[inline]
    pub fn pool_index(&self, position: usize) -> usize {
        self.order[position]
    }

    #[inline]
    pub fn impact(&self, position: usize) -> f64 {
        self.impacts[position]
    }

    #[inline]
    pub fn price(&self, position: usize) -> f64 {
        self.prices[position]
    }

    #[inline]
    pub fn role(&self, position: usize) -> usize {
        self.roles[position]
    }

    #[inline]
    pub fn is_overseas(&self, position: usize) -> bool {
        self.overseas[position]
    }

    pub fn squad_size(&self) -> u32 {
        self.squad_size
    }

    /// Budget cap widened by the row tolerance.
    pub fn budget_limit(&self) -> f64 {
        self.budget_limit
    }

    pub fn max_overseas(&self) -> u32 {
        self.max_overseas
    }

    pub fn minimums(&self) -> [u32; 4] {
        self.minimums
    }

    /// Sum of the `count` highest impacts at or after `depth`.
    ///
    /// Positions are impact-sorted, so this is a prefix-sum difference.
    #[inline]
    pub fn top_impacts(&self, depth: usize, count: usize) -> f64 {
        let end = (depth + count).min(self.len());
        self.impact_prefix[end] - self.impact_prefix[depth]
    }

    /// Candidates of each role at or after `depth`.
    #[inline]
    pub fn roles_remaining(&self, depth: usize) -> [u32; 4] {
        self.role_suffix[depth]
    }

    #[inline]
    pub fn overseas_remaining(&self, depth: usize) -> u32 {
        self.overseas_suffix[depth]
    }

    /// Lower bound on the price of any `slots` candidates from `depth` on
    /// that covers the role deficits `needs`.
    ///
    /// The larger of the `slots` cheapest prices overall and, summed over
    /// roles, the cheapest `needs[r]` prices of each role.
    pub fn cheapest_completion(
        &self,
        depth: usize,
        slots: usize,
        needs: [u32; 4],
        scratch: &mut Vec<f64>,
    ) -> f64 {
        if slots == 0 {
            return 0.0;
        }

        scratch.clear();
        scratch.extend_from_slice(&self.prices[depth..]);
        let overall = sum_smallest(scratch, slots);

        let mut by_role = 0.0;
        for (role, &need) in needs.iter().enumerate() {
            if need == 0 {
                continue;
            }
            scratch.clear();
            scratch.extend(
                (depth..self.len())
                    .filter(|&p| self.roles[p] == role)
                    .map(|p| self.prices[p]),
            );
            by_role += sum_smallest(scratch, need as usize);
        }

        overall.max(by_role)
    }
}

/// Sums the `count` smallest values, reordering `values`.
fn sum_smallest(values: &mut [f64], count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    if count < values.len() {
        values.select_nth_unstable_by(count - 1, f64::total_cmp);
    }
    values.iter().take(count).sum()
}

/// Sums the `count` largest values, reordering `values`.
pub(super) fn sum_largest(values: &mut [f64], count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    if count < values.len() {
        values.select_nth_unstable_by(count - 1, |a, b| b.total_cmp(a));
    }
    values.iter().take(count).sum()
}
