//! Tests for the optimization engine.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use squadforge_config::{SquadConfig, ThreadCount};
use squadforge_core::{Candidate, CandidatePool, FnScorer, Role, ValidationError};
use squadforge_test::random::random_pool;
use squadforge_test::scenario::{scenario_constraints, scenario_pool};
use squadforge_test::stars::star_players;

use super::*;
use crate::error::ErrorKind;
use crate::program::ConstraintName;

#[test]
fn test_scenario_roster() {
    let pool = scenario_pool();
    let outcome = OptimizationEngine::new()
        .solve(&pool, &scenario_constraints())
        .unwrap();

    assert!(outcome.is_optimal());
    let roster = outcome.roster().unwrap();
    assert_eq!(roster.selected_ids(), &["A".to_string(), "C".to_string()]);
    assert_eq!(roster.total_cost(), 15.0);
    assert_eq!(roster.total_impact(), 80.0);
    assert_eq!(roster.captains(), &["A".to_string()]);
    assert!(outcome.stats().nodes_explored > 0);
}

#[test]
fn test_scenario_tight_budget_is_infeasible() {
    let pool = scenario_pool();
    let outcome = OptimizationEngine::new()
        .solve(&pool, &scenario_constraints().with_budget_cap(3.0))
        .unwrap();

    assert!(!outcome.is_optimal());
    assert!(outcome.roster().is_none());
    let diagnostics = outcome.diagnostics().unwrap();
    assert!(diagnostics.contains(ConstraintName::Budget));

    let err = outcome.into_result().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Infeasible);
    assert!(err.diagnostics().unwrap().contains_str("Budget"));
    assert!(err.to_string().starts_with("Violated constraints: "));
}

#[test]
fn test_empty_pool_is_infeasible() {
    let outcome = OptimizationEngine::new()
        .solve(&CandidatePool::empty(), &ConstraintSet::new(1, 100.0))
        .unwrap();
    assert!(outcome.diagnostics().is_some());
}

#[test]
fn test_zero_squad_without_minimums_is_empty_optimum() {
    let pool = scenario_pool();
    let outcome = OptimizationEngine::new()
        .solve(&pool, &ConstraintSet::new(0, 0.0))
        .unwrap();
    let roster = outcome.roster().unwrap();
    assert!(roster.is_empty());
    assert_eq!(roster.total_impact(), 0.0);
}

#[test]
fn test_role_minimums_above_squad_never_return_roster() {
    let pool = star_players();
    let constraints = ConstraintSet::new(4, 1000.0)
        .with_role_minimum(Role::Batter, 2)
        .with_role_minimum(Role::Bowler, 2)
        .with_role_minimum(Role::WicketKeeper, 1);
    let outcome = OptimizationEngine::new().solve(&pool, &constraints).unwrap();
    let diagnostics = outcome.diagnostics().unwrap();
    assert!(diagnostics.contains(ConstraintName::TeamSize));
}

#[test]
fn test_star_players_default_constraints() {
    // Eight players cannot fill the default squad of eleven, and the pool
    // holds only two batters and two bowlers against minimums of three.
    let pool = star_players();
    let outcome = OptimizationEngine::new()
        .solve(&pool, &ConstraintSet::default())
        .unwrap();
    assert_eq!(
        outcome.diagnostics().unwrap().names(),
        vec![
            ConstraintName::TeamSize,
            ConstraintName::MinRole(Role::Batter),
            ConstraintName::MinRole(Role::Bowler),
        ]
    );
}

#[test]
fn test_star_players_five_a_side() {
    let pool = star_players();
    let constraints = ConstraintSet::new(5, 70.0)
        .with_max_overseas(2)
        .with_role_minimum(Role::Bowler, 1)
        .with_role_minimum(Role::WicketKeeper, 1);
    let roster = OptimizationEngine::new()
        .solve(&pool, &constraints)
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(roster.len(), 5);
    assert!(roster.total_cost() <= 70.0);
    assert!(roster.overseas_count() <= 2);
    assert!(roster.role_count(Role::Bowler) >= 1);
    assert!(roster.role_count(Role::WicketKeeper) >= 1);
    assert_eq!(roster.captains(), &["virat-kohli".to_string()]);
}

#[test]
fn test_custom_scorer() {
    // Scoring by price alone makes the most expensive affordable pair optimal.
    let pool = scenario_pool();
    let engine = OptimizationEngine::with_scorer(FnScorer::new(|c: &Candidate| c.price));
    let roster = engine
        .solve(&pool, &ConstraintSet::new(2, 15.0))
        .unwrap()
        .into_result()
        .unwrap();
    assert_eq!(roster.selected_ids(), &["A".to_string(), "C".to_string()]);
    assert_eq!(roster.total_impact(), 15.0);
}

#[test]
fn test_negative_budget_is_invalid_input() {
    let pool = scenario_pool();
    let err = OptimizationEngine::new()
        .solve(&pool, &scenario_constraints().with_budget_cap(-1.0))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(matches!(
        err,
        SolveError::InvalidInput(ValidationError::InvalidBudget(_))
    ));
}

#[test]
fn test_zero_time_limit_is_timeout() {
    let pool = random_pool(21, 30);
    let engine = OptimizationEngine::new()
        .with_config(EngineConfig::new().with_time_limit(Duration::ZERO));
    let err = engine
        .solve(&pool, &ConstraintSet::new(8, 60.0))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SolverTimeout);
    match err {
        SolveError::Timeout {
            limit,
            best_unverified_impact,
            ..
        } => {
            assert_eq!(limit, Duration::ZERO);
            assert_eq!(best_unverified_impact, None);
        }
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[test]
fn test_node_limit_reports_unverified_incumbent() {
    // Identical candidates: every squad ties, so nothing is pruned on bound.
    let candidates = (0..40)
        .map(|i| Candidate::new(format!("p{i:02}"), "Same", Role::Batter, 1.0).with_batting(100, 120.0))
        .collect();
    let pool = CandidatePool::new(candidates).unwrap();
    let engine = OptimizationEngine::new()
        .with_config(EngineConfig::new().with_node_limit(300));
    let err = engine
        .solve(&pool, &ConstraintSet::new(11, 200.0))
        .unwrap_err();

    assert_eq!(err.best_unverified_impact(), Some(1100.0));
    match err {
        SolveError::NodeLimitReached { limit, stats, .. } => {
            assert_eq!(limit, 300);
            assert!(stats.nodes_explored >= 300);
        }
        other => panic!("expected node limit, got {other:?}"),
    }
}

#[test]
fn test_cancellation_leaves_inputs_untouched() {
    let pool = random_pool(23, 25);
    let constraints = ConstraintSet::new(6, 50.0);
    let before = pool.clone();
    let flag = Arc::new(AtomicBool::new(false));
    let engine = OptimizationEngine::new()
        .with_config(EngineConfig::new().with_cancel_flag(Arc::clone(&flag)));

    flag.store(true, Ordering::SeqCst);
    let err = engine.solve(&pool, &constraints).unwrap_err();
    assert!(matches!(err, SolveError::Cancelled { .. }));
    assert_eq!(pool, before);

    flag.store(false, Ordering::SeqCst);
    assert!(engine.solve(&pool, &constraints).is_ok());
}

#[test]
fn test_parallel_engine_matches_sequential() {
    let pool = random_pool(31, 24);
    let constraints = ConstraintSet::new(7, 55.0)
        .with_max_overseas(2)
        .with_role_minimum(Role::Bowler, 2);
    let sequential = OptimizationEngine::new().solve(&pool, &constraints).unwrap();
    let parallel = OptimizationEngine::new()
        .with_config(EngineConfig::new().with_threads(4))
        .solve(&pool, &constraints)
        .unwrap();

    assert_eq!(
        sequential.roster().map(|r| r.selected_ids().to_vec()),
        parallel.roster().map(|r| r.selected_ids().to_vec())
    );
    assert_eq!(parallel.stats().threads, 4);
}

#[test]
fn test_batch_keeps_input_order() {
    let pool = scenario_pool();
    let sets = vec![
        scenario_constraints(),
        scenario_constraints().with_budget_cap(3.0),
        scenario_constraints().with_budget_cap(100.0),
    ];
    let results = OptimizationEngine::new().solve_batch(&pool, &sets);

    assert_eq!(results.len(), 3);
    let first = results[0].as_ref().unwrap().roster().unwrap();
    assert_eq!(first.total_impact(), 80.0);
    assert!(results[1].as_ref().unwrap().diagnostics().is_some());
    // A + B is affordable with the larger budget.
    let third = results[2].as_ref().unwrap().roster().unwrap();
    assert_eq!(third.total_impact(), 90.0);
}

#[test]
fn test_engine_from_config() {
    let mut config = SquadConfig::new()
        .with_termination_millis(5_000)
        .with_thread_count(ThreadCount::Count(2));
    config.search.wicket_weight = Some(25.0);

    let engine = OptimizationEngine::from_config(&config);
    assert_eq!(engine.config().threads, 2);
    assert_eq!(engine.config().time_limit, Some(Duration::from_millis(5_000)));
    assert_eq!(engine.scorer().wicket_weight(), 25.0);
}
