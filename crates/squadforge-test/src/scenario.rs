//! The three-candidate worked example.
//!
//! | id | role       | price | impact | overseas |
//! |----|------------|-------|--------|----------|
//! | A  | Batter     | 10    | 50     | no       |
//! | B  | Bowler     | 8     | 40     | yes      |
//! | C  | AllRounder | 5     | 30     | no       |
//!
//! With a squad of 2, a budget of 15, one overseas slot and one batter
//! required, the optimum is `{A, C}`: `{A, B}` scores more but costs 18.

use squadforge_core::{Candidate, CandidatePool, ConstraintSet, Role};

/// Pool of A, B and C in that order.
pub fn scenario_pool() -> CandidatePool {
    let candidates = vec![
        Candidate::new("A", "Alpha", Role::Batter, 10.0).with_batting(50, 130.0),
        Candidate::new("B", "Bravo", Role::Bowler, 8.0)
            .with_bowling(2, 7.5)
            .overseas(true),
        Candidate::new("C", "Charlie", Role::AllRounder, 5.0)
            .with_batting(10, 110.0)
            .with_bowling(1, 8.0),
    ];
    match CandidatePool::new(candidates) {
        Ok(pool) => pool,
        Err(e) => panic!("scenario pool is valid: {e}"),
    }
}

/// Squad of 2, budget 15, at most one overseas, at least one batter.
pub fn scenario_constraints() -> ConstraintSet {
    ConstraintSet::new(2, 15.0)
        .with_max_overseas(1)
        .with_role_minimum(Role::Batter, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_shape() {
        let pool = scenario_pool();
        let ids: Vec<&str> = pool.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(pool.stats().overseas_count, 1);
        assert_eq!(scenario_constraints().total_role_minimum(), 1);
    }
}
