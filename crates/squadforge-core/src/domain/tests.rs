//! Tests for the domain model.

use super::*;
use crate::error::ValidationError;
use crate::scoring::RunsWicketsScorer;

fn sample() -> Vec<Candidate> {
    vec![
        Candidate::new("a", "Alpha", Role::Batter, 10.0).with_batting(50, 130.0),
        Candidate::new("b", "Bravo", Role::Bowler, 8.0)
            .with_bowling(2, 7.5)
            .overseas(true),
        Candidate::new("c", "Charlie", Role::AllRounder, 5.0)
            .with_batting(10, 110.0)
            .with_bowling(1, 8.1),
        Candidate::new("d", "Delta", Role::WicketKeeper, 6.5).with_batting(35, 0.0),
    ]
}

#[test]
fn test_role_index_matches_all() {
    for (i, role) in Role::ALL.iter().enumerate() {
        assert_eq!(role.index(), i);
    }
}

#[test]
fn test_role_parses_team_sheet_labels() {
    assert_eq!("Batsman".parse::<Role>().unwrap(), Role::Batter);
    assert_eq!("All-Rounder".parse::<Role>().unwrap(), Role::AllRounder);
    assert_eq!("Wicketkeeper".parse::<Role>().unwrap(), Role::WicketKeeper);
    assert_eq!("wicket_keeper".parse::<Role>().unwrap(), Role::WicketKeeper);
    assert_eq!("BOWLER".parse::<Role>().unwrap(), Role::Bowler);
}

#[test]
fn test_role_parse_rejects_unknown() {
    let err = "captain".parse::<Role>().unwrap_err();
    assert_eq!(err, ValidationError::UnknownRole("captain".to_string()));
}

#[test]
fn test_role_display_round_trips() {
    for role in Role::ALL {
        assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
    }
}

#[test]
fn test_pool_accepts_valid_candidates() {
    let pool = CandidatePool::new(sample()).unwrap();
    assert_eq!(pool.len(), 4);
    assert!(!pool.is_empty());
    assert_eq!(pool.get("c").map(|c| c.role), Some(Role::AllRounder));
    assert!(pool.get("zzz").is_none());
}

#[test]
fn test_pool_rejects_duplicate_ids() {
    let mut candidates = sample();
    candidates.push(Candidate::new("a", "Again", Role::Bowler, 1.0));
    let err = CandidatePool::new(candidates).unwrap_err();
    assert_eq!(err, ValidationError::DuplicateId("a".to_string()));
}

#[test]
fn test_pool_rejects_empty_id() {
    let candidates = vec![
        Candidate::new("ok", "Ok", Role::Batter, 1.0),
        Candidate::new("  ", "Blank", Role::Batter, 1.0),
    ];
    let err = CandidatePool::new(candidates).unwrap_err();
    assert_eq!(err, ValidationError::EmptyId { index: 1 });
}

#[test]
fn test_pool_rejects_negative_price() {
    let candidates = vec![Candidate::new("x", "X", Role::Batter, -1.0)];
    let err = CandidatePool::new(candidates).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::Negative { field: "price", .. }
    ));
}

#[test]
fn test_pool_rejects_nan_strike_rate() {
    let candidates = vec![Candidate::new("x", "X", Role::Batter, 1.0).with_batting(1, f64::NAN)];
    let err = CandidatePool::new(candidates).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::NonFinite {
            field: "strike_rate",
            ..
        }
    ));
}

#[test]
fn test_empty_pool() {
    let pool = CandidatePool::empty();
    assert!(pool.is_empty());
    assert_eq!(pool.stats(), PoolStats::default());
}

#[test]
fn test_pool_stats() {
    let stats = CandidatePool::new(sample()).unwrap().stats();
    assert_eq!(stats.total_players, 4);
    assert!((stats.total_value - 29.5).abs() < 1e-9);
    assert_eq!(stats.overseas_count, 1);
    assert_eq!(stats.role_count(Role::Batter), 1);
    assert_eq!(stats.role_count(Role::WicketKeeper), 1);
}

#[test]
fn test_filter_by_role_and_price() {
    let pool = CandidatePool::new(sample()).unwrap();
    let filtered = pool.filter(
        &PoolFilter::new()
            .with_roles([Role::Batter, Role::AllRounder, Role::WicketKeeper])
            .with_max_price(6.5),
    );
    let ids: Vec<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "d"]);
}

#[test]
fn test_filter_overseas_only() {
    let pool = CandidatePool::new(sample()).unwrap();
    let filtered = pool.filter(&PoolFilter::new().with_overseas(OverseasFilter::OverseasOnly));
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.candidates()[0].id, "b");
}

#[test]
fn test_ranked_by_impact_breaks_ties_by_id() {
    let pool = CandidatePool::new(vec![
        Candidate::new("z", "Z", Role::Batter, 1.0).with_batting(40, 100.0),
        Candidate::new("y", "Y", Role::Bowler, 1.0).with_bowling(2, 7.0),
        Candidate::new("x", "X", Role::Batter, 1.0).with_batting(90, 100.0),
    ])
    .unwrap();
    let ranked = pool.ranked_by_impact(&RunsWicketsScorer::default());
    let ids: Vec<&str> = ranked.iter().map(|(c, _)| c.id.as_str()).collect();
    assert_eq!(ids, vec!["x", "y", "z"]);
    assert_eq!(ranked[1].1, 40.0);
}

#[test]
fn test_constraint_defaults_match_team_sheet() {
    let limits = ConstraintSet::default();
    assert_eq!(limits.squad_size, 11);
    assert_eq!(limits.budget_cap, 100.0);
    assert_eq!(limits.max_overseas, 4);
    assert_eq!(limits.role_minimums(), [3, 3, 2, 1]);
    assert_eq!(limits.total_role_minimum(), 9);
}

#[test]
fn test_constraint_builder() {
    let limits = ConstraintSet::new(5, 40.0)
        .with_max_overseas(2)
        .with_role_minimum(Role::WicketKeeper, 1)
        .with_role_minimum(Role::Bowler, 2);
    assert_eq!(limits.max_overseas, 2);
    assert_eq!(limits.role_minimum(Role::WicketKeeper), 1);
    assert_eq!(limits.role_minimum(Role::Bowler), 2);
    assert_eq!(limits.role_minimum(Role::Batter), 0);
}

#[test]
fn test_constraint_validate_budget() {
    assert!(ConstraintSet::new(1, 0.0).validate().is_ok());
    assert_eq!(
        ConstraintSet::new(1, -0.5).validate(),
        Err(ValidationError::InvalidBudget(-0.5))
    );
    assert!(ConstraintSet::new(1, f64::INFINITY).validate().is_err());
}

#[test]
fn test_total_role_minimum_does_not_overflow() {
    let limits = ConstraintSet::new(1, 1.0)
        .with_role_minimum(Role::Batter, u32::MAX)
        .with_role_minimum(Role::Bowler, u32::MAX);
    assert_eq!(limits.total_role_minimum(), 2 * u64::from(u32::MAX));
}
