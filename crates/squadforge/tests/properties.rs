//! Property checks over seeded random pools.

use squadforge::prelude::*;
use squadforge::EngineConfig;
use squadforge_test::{brute_force, random_constraints, random_pool};

const EPS: f64 = 1e-6;

fn solve(pool: &CandidatePool, constraints: &ConstraintSet, threads: usize) -> SolveOutcome {
    OptimizationEngine::new()
        .with_config(EngineConfig::new().with_threads(threads))
        .solve(pool, constraints)
        .unwrap()
}

fn objective(outcome: &SolveOutcome) -> Option<f64> {
    outcome.roster().map(RosterResult::total_impact)
}

fn assert_satisfies(roster: &RosterResult, constraints: &ConstraintSet, seed: u64) {
    assert_eq!(roster.len(), constraints.squad_size as usize, "seed {seed}");
    assert!(
        roster.total_cost() <= constraints.budget_cap + EPS,
        "seed {seed}: cost {} over cap {}",
        roster.total_cost(),
        constraints.budget_cap
    );
    assert!(roster.overseas_count() <= constraints.max_overseas, "seed {seed}");
    for role in Role::ALL {
        assert!(
            roster.role_count(role) >= constraints.role_minimum(role),
            "seed {seed}: {role}"
        );
    }
}

#[test]
fn optimal_rosters_satisfy_every_constraint() {
    for seed in 0..60 {
        let pool = random_pool(seed, 18);
        let constraints = random_constraints(seed, &pool);
        if let Some(roster) = solve(&pool, &constraints, 1).roster() {
            assert_satisfies(roster, &constraints, seed);
        }
    }
}

#[test]
fn optimum_matches_brute_force() {
    let scorer = RunsWicketsScorer::default();
    for seed in 1000..1060 {
        let size = 10 + (seed as usize % 11);
        let pool = random_pool(seed, size);
        let constraints = random_constraints(seed, &pool);
        let outcome = solve(&pool, &constraints, 1);

        match brute_force(&pool, &constraints, &scorer) {
            None => assert!(!outcome.is_optimal(), "seed {seed}: expected infeasible"),
            Some(expected) => {
                let roster = outcome.roster().unwrap_or_else(|| panic!("seed {seed}: no roster"));
                assert!(
                    (roster.total_impact() - expected.objective).abs() < EPS,
                    "seed {seed}: {} vs {}",
                    roster.total_impact(),
                    expected.objective
                );
                assert_eq!(roster.selected_ids(), expected.ids.as_slice(), "seed {seed}");
            }
        }
    }
}

#[test]
fn relaxing_one_constraint_never_lowers_the_optimum() {
    for seed in 2000..2030 {
        let pool = random_pool(seed, 16);
        let base = random_constraints(seed, &pool);
        let before = objective(&solve(&pool, &base, 1));

        let mut relaxations = vec![
            base.clone().with_budget_cap(base.budget_cap * 1.5),
            base.clone().with_max_overseas(base.squad_size),
        ];
        for role in Role::ALL {
            if base.role_minimum(role) > 0 {
                relaxations.push(base.clone().with_role_minimum(role, 0));
            }
        }

        for relaxed in &relaxations {
            let after = objective(&solve(&pool, relaxed, 1));
            match (before, after) {
                (Some(b), Some(a)) => assert!(a >= b - EPS, "seed {seed}: {a} < {b}"),
                (Some(_), None) => panic!("seed {seed}: relaxation became infeasible"),
                (None, _) => {}
            }
        }
    }
}

#[test]
fn parallel_and_sequential_agree() {
    for seed in 3000..3015 {
        let pool = random_pool(seed, 24);
        let constraints = random_constraints(seed, &pool);
        let sequential = solve(&pool, &constraints, 1);

        for threads in [2, 4] {
            let parallel = solve(&pool, &constraints, threads);
            assert_eq!(
                sequential.roster().map(RosterResult::selected_ids),
                parallel.roster().map(RosterResult::selected_ids),
                "seed {seed}, threads {threads}"
            );
            assert_eq!(
                sequential.diagnostics().map(|d| d.names()),
                parallel.diagnostics().map(|d| d.names()),
                "seed {seed}, threads {threads}"
            );
        }
    }
}

#[test]
fn repeated_solves_are_identical() {
    let pool = random_pool(42, 20);
    let constraints = random_constraints(42, &pool);
    let first = solve(&pool, &constraints, 3);
    for _ in 0..3 {
        let again = solve(&pool, &constraints, 3);
        assert_eq!(first.roster(), again.roster());
    }
}

#[test]
fn batch_matches_individual_solves() {
    let pool = random_pool(77, 18);
    let sets: Vec<ConstraintSet> = (0..8).map(|s| random_constraints(s, &pool)).collect();
    let engine = OptimizationEngine::new();
    let batch = engine.solve_batch(&pool, &sets);

    assert_eq!(batch.len(), sets.len());
    for (constraints, result) in sets.iter().zip(batch) {
        let single = engine.solve(&pool, constraints).unwrap();
        assert_eq!(result.unwrap().roster(), single.roster());
    }
}
