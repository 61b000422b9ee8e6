//! Seeded random pools and constraint sets.
//!
//! Identical seeds give identical fixtures on every platform
//! (`ChaCha8Rng`). Ids are zero-padded (`p00`, `p01`, ...) so string
//! order matches creation order.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use squadforge_core::{Candidate, CandidatePool, ConstraintSet, Role};

/// A pool of `size` candidates drawn from `seed`.
///
/// Prices are multiples of 0.25 between 1 and 15; roughly a third of the
/// pool is overseas.
pub fn random_pool(seed: u64, size: usize) -> CandidatePool {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let candidates = (0..size)
        .map(|i| {
            let role = Role::ALL[rng.random_range(0..Role::ALL.len())];
            let price = f64::from(rng.random_range(4u32..=60)) * 0.25;
            let mut candidate = Candidate::new(format!("p{i:02}"), format!("Player {i}"), role, price)
                .overseas(rng.random_bool(0.3));
            let (runs, wickets) = match role {
                Role::Batter | Role::WicketKeeper => (rng.random_range(0..800), rng.random_range(0..3)),
                Role::Bowler => (rng.random_range(0..120), rng.random_range(0..30)),
                Role::AllRounder => (rng.random_range(0..450), rng.random_range(0..18)),
            };
            if runs > 0 {
                candidate = candidate.with_batting(runs, f64::from(rng.random_range(90u32..200)));
            }
            if wickets > 0 {
                candidate = candidate.with_bowling(wickets, f64::from(rng.random_range(60u32..110)) / 10.0);
            }
            candidate
        })
        .collect();
    match CandidatePool::new(candidates) {
        Ok(pool) => pool,
        Err(e) => panic!("random pool is valid: {e}"),
    }
}

/// A constraint set sized for `pool`, drawn from `seed`.
///
/// Budgets range from tight to loose so both feasible and infeasible
/// instances come up.
pub fn random_constraints(seed: u64, pool: &CandidatePool) -> ConstraintSet {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    let max_squad = pool.len().clamp(1, 8) as u32;
    let squad_size = rng.random_range(1..=max_squad);
    let budget = f64::from(squad_size) * rng.random_range(3.0..10.0);
    let mut constraints = ConstraintSet::new(squad_size, budget)
        .with_max_overseas(rng.random_range(0..=squad_size));
    for role in Role::ALL {
        if rng.random_bool(0.4) {
            constraints = constraints.with_role_minimum(role, rng.random_range(1..=2));
        }
    }
    constraints
}
