//! Brute-force reference solver.
//!
//! Enumerates every subset of the squad size, so keep pools at 20
//! candidates or fewer.

use squadforge_core::{CandidatePool, ConstraintSet, ImpactScorer};

/// Largest pool the oracle accepts.
pub const MAX_ORACLE_POOL: usize = 20;

/// An optimal selection found by enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleSolution {
    pub objective: f64,
    /// Selected ids, ascending.
    pub ids: Vec<String>,
}

/// Best feasible subset, or `None` if no subset satisfies every limit.
///
/// Ties on the objective (within `1e-9` relative) go to the subset that
/// comes first when candidates are ranked by impact descending, then id
/// ascending: the one whose ascending list of ranks is lexicographically
/// smallest.
///
/// # Panics
///
/// Panics if the pool has more than [`MAX_ORACLE_POOL`] candidates.
pub fn brute_force<Sc>(
    pool: &CandidatePool,
    constraints: &ConstraintSet,
    scorer: &Sc,
) -> Option<OracleSolution>
where
    Sc: ImpactScorer + ?Sized,
{
    let n = pool.len();
    assert!(n <= MAX_ORACLE_POOL, "oracle pool too large: {n}");

    let candidates = pool.candidates();
    let impacts: Vec<f64> = candidates.iter().map(|c| scorer.score(c)).collect();
    let budget_limit = constraints.budget_cap + 1e-9 * constraints.budget_cap.abs().max(1.0);
    let minimums = constraints.role_minimums();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        impacts[b]
            .total_cmp(&impacts[a])
            .then_with(|| candidates[a].id.cmp(&candidates[b].id))
    });
    let mut rank_of = vec![0usize; n];
    for (rank, &i) in order.iter().enumerate() {
        rank_of[i] = rank;
    }

    let mut best: Option<(OracleSolution, Vec<usize>)> = None;
    for mask in 0u32..(1u32 << n) {
        if mask.count_ones() != constraints.squad_size {
            continue;
        }

        let mut cost = 0.0;
        let mut objective = 0.0;
        let mut overseas = 0u32;
        let mut roles = [0u32; 4];
        let mut ids = Vec::with_capacity(constraints.squad_size as usize);
        let mut ranks = Vec::with_capacity(constraints.squad_size as usize);
        for (i, candidate) in candidates.iter().enumerate() {
            if mask & (1 << i) == 0 {
                continue;
            }
            cost += candidate.price;
            objective += impacts[i];
            overseas += u32::from(candidate.is_overseas);
            roles[candidate.role.index()] += 1;
            ids.push(candidate.id.clone());
            ranks.push(rank_of[i]);
        }
        if cost > budget_limit
            || overseas > constraints.max_overseas
            || roles.iter().zip(&minimums).any(|(have, need)| have < need)
        {
            continue;
        }

        ids.sort();
        ranks.sort_unstable();
        let replace = match &best {
            None => true,
            Some((current, current_ranks)) => {
                let tol = 1e-9 * objective.max(current.objective).max(1.0);
                if objective > current.objective + tol {
                    true
                } else if current.objective > objective + tol {
                    false
                } else {
                    ranks < *current_ranks
                }
            }
        };
        if replace {
            best = Some((OracleSolution { objective, ids }, ranks));
        }
    }
    best.map(|(solution, _)| solution)
}
