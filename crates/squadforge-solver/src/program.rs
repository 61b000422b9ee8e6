//! The squad selection 0/1 integer program.
//!
//! One binary variable per candidate; maximize summed impact subject to an
//! exact squad size, a budget cap, an overseas cap and per-role minimums.
//! Rows are named and ordered so reports stay stable across solves.

use std::fmt;

use serde::Serialize;
use squadforge_core::{
    Candidate, CandidatePool, ConstraintSet, ImpactScorer, Role, ValidationError,
};

use crate::error::SolveError;

/// Relative tolerance used for row checks and objective comparisons.
pub const TOLERANCE: f64 = 1e-9;

/// Absolute tolerance scaled to the magnitude of `value`.
#[inline]
pub fn tolerance_for(value: f64) -> f64 {
    TOLERANCE * value.abs().max(1.0)
}

/// Name of a program row, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintName {
    TeamSize,
    Budget,
    OverseasLimit,
    MinRole(Role),
}

impl ConstraintName {
    /// Every row name in declaration order.
    pub const ALL: [ConstraintName; 7] = [
        ConstraintName::TeamSize,
        ConstraintName::Budget,
        ConstraintName::OverseasLimit,
        ConstraintName::MinRole(Role::Batter),
        ConstraintName::MinRole(Role::Bowler),
        ConstraintName::MinRole(Role::AllRounder),
        ConstraintName::MinRole(Role::WicketKeeper),
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ConstraintName::TeamSize => "TeamSize",
            ConstraintName::Budget => "Budget",
            ConstraintName::OverseasLimit => "OverseasLimit",
            ConstraintName::MinRole(Role::Batter) => "MinBatsmen",
            ConstraintName::MinRole(Role::Bowler) => "MinBowlers",
            ConstraintName::MinRole(Role::AllRounder) => "MinAllRounders",
            ConstraintName::MinRole(Role::WicketKeeper) => "MinWicketkeepers",
        }
    }
}

impl fmt::Display for ConstraintName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConstraintName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Comparison sense of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSense {
    Equal,
    LessOrEqual,
    GreaterOrEqual,
}

/// A named linear row `coefficients . x (sense) rhs`.
#[derive(Debug, Clone)]
pub struct LinearRow {
    pub name: ConstraintName,
    pub coefficients: Vec<f64>,
    pub sense: RowSense,
    pub rhs: f64,
}

impl LinearRow {
    /// Left-hand side value for an assignment (which may be fractional).
    pub fn activity(&self, x: &[f64]) -> f64 {
        self.coefficients
            .iter()
            .zip(x)
            .map(|(coefficient, value)| coefficient * value)
            .sum()
    }

    /// Slack of the row at `x`; negative means violated.
    ///
    /// Equality rows report minus the absolute deviation.
    pub fn slack(&self, x: &[f64]) -> f64 {
        let activity = self.activity(x);
        match self.sense {
            RowSense::Equal => -(activity - self.rhs).abs(),
            RowSense::LessOrEqual => self.rhs - activity,
            RowSense::GreaterOrEqual => activity - self.rhs,
        }
    }

    pub fn is_satisfied(&self, x: &[f64]) -> bool {
        self.slack(x) >= -tolerance_for(self.rhs)
    }
}

/// The formulated program for one solve.
///
/// Impacts are computed here, once per solve, and never written back to
/// the pool.
#[derive(Debug)]
pub struct SquadProgram<'p> {
    pool: &'p CandidatePool,
    constraints: ConstraintSet,
    impacts: Vec<f64>,
    rows: Vec<LinearRow>,
}

impl<'p> SquadProgram<'p> {
    /// Scores every candidate and builds the program rows.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a malformed budget or a negative impact,
    /// `Internal` for a non-finite impact.
    pub fn formulate<Sc>(
        pool: &'p CandidatePool,
        constraints: &ConstraintSet,
        scorer: &Sc,
    ) -> Result<Self, SolveError>
    where
        Sc: ImpactScorer + ?Sized,
    {
        constraints.validate()?;

        let mut impacts = Vec::with_capacity(pool.len());
        for candidate in pool {
            let impact = scorer.score(candidate);
            if !impact.is_finite() {
                return Err(SolveError::Internal(format!(
                    "scorer produced a non-finite impact for candidate '{}'",
                    candidate.id
                )));
            }
            if impact < 0.0 {
                return Err(ValidationError::NegativeImpact {
                    id: candidate.id.clone(),
                    impact,
                }
                .into());
            }
            impacts.push(impact);
        }

        let mut rows = vec![
            LinearRow {
                name: ConstraintName::TeamSize,
                coefficients: vec![1.0; pool.len()],
                sense: RowSense::Equal,
                rhs: f64::from(constraints.squad_size),
            },
            LinearRow {
                name: ConstraintName::Budget,
                coefficients: pool.iter().map(|c| c.price).collect(),
                sense: RowSense::LessOrEqual,
                rhs: constraints.budget_cap,
            },
            LinearRow {
                name: ConstraintName::OverseasLimit,
                coefficients: indicator(pool, |c| c.is_overseas),
                sense: RowSense::LessOrEqual,
                rhs: f64::from(constraints.max_overseas),
            },
        ];
        for role in Role::ALL {
            rows.push(LinearRow {
                name: ConstraintName::MinRole(role),
                coefficients: indicator(pool, |c| c.role == role),
                sense: RowSense::GreaterOrEqual,
                rhs: f64::from(constraints.role_minimum(role)),
            });
        }

        Ok(Self {
            pool,
            constraints: constraints.clone(),
            impacts,
            rows,
        })
    }

    pub fn pool(&self) -> &'p CandidatePool {
        self.pool
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Number of decision variables.
    pub fn variable_count(&self) -> usize {
        self.impacts.len()
    }

    pub fn impacts(&self) -> &[f64] {
        &self.impacts
    }

    pub fn rows(&self) -> &[LinearRow] {
        &self.rows
    }

    pub fn row(&self, name: ConstraintName) -> Option<&LinearRow> {
        self.rows.iter().find(|row| row.name == name)
    }

    /// Whether a row can restrict any selection at all.
    ///
    /// Zero role minimums and an overseas cap at or above the overseas
    /// supply are vacuous.
    pub fn is_active(&self, name: ConstraintName) -> bool {
        match name {
            ConstraintName::TeamSize | ConstraintName::Budget => true,
            ConstraintName::OverseasLimit => {
                let supply = self.pool.iter().filter(|c| c.is_overseas).count();
                (self.constraints.max_overseas as usize) < supply
            }
            ConstraintName::MinRole(role) => self.constraints.role_minimum(role) > 0,
        }
    }

    /// Objective value of an assignment.
    pub fn objective(&self, x: &[f64]) -> f64 {
        self.impacts.iter().zip(x).map(|(i, v)| i * v).sum()
    }

    /// Rows violated by `x` with their (negative) slack, in row order.
    pub fn violated_rows(&self, x: &[f64]) -> Vec<(ConstraintName, f64)> {
        self.rows
            .iter()
            .filter(|row| !row.is_satisfied(x))
            .map(|row| (row.name, row.slack(x)))
            .collect()
    }

    /// Rounds each value to the nearest of {0, 1} and returns the pool
    /// indices whose rounded value is 1.
    pub fn decode(&self, x: &[f64]) -> Vec<usize> {
        x.iter()
            .enumerate()
            .filter(|(_, value)| value.round() >= 1.0)
            .map(|(index, _)| index)
            .collect()
    }

    /// Builds the 0/1 assignment vector selecting `indices`.
    pub fn assignment(&self, indices: &[usize]) -> Vec<f64> {
        let mut x = vec![0.0; self.variable_count()];
        for &index in indices {
            x[index] = 1.0;
        }
        x
    }
}

fn indicator(pool: &CandidatePool, predicate: impl Fn(&Candidate) -> bool) -> Vec<f64> {
    pool.iter()
        .map(|c| if predicate(c) { 1.0 } else { 0.0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use squadforge_core::RunsWicketsScorer;
    use squadforge_test::scenario::{scenario_constraints, scenario_pool};

    #[test]
    fn test_rows_in_declaration_order() {
        let pool = scenario_pool();
        let program =
            SquadProgram::formulate(&pool, &scenario_constraints(), &RunsWicketsScorer::default())
                .unwrap();
        let names: Vec<ConstraintName> = program.rows().iter().map(|r| r.name).collect();
        assert_eq!(names, ConstraintName::ALL.to_vec());
    }

    #[test]
    fn test_impacts_follow_scorer() {
        let pool = scenario_pool();
        let program =
            SquadProgram::formulate(&pool, &scenario_constraints(), &RunsWicketsScorer::default())
                .unwrap();
        assert_eq!(program.impacts(), &[50.0, 40.0, 30.0]);
    }

    #[test]
    fn test_slack_and_violation() {
        let pool = scenario_pool();
        let program =
            SquadProgram::formulate(&pool, &scenario_constraints(), &RunsWicketsScorer::default())
                .unwrap();

        // {A, B}: cost 18 > 15
        let x = program.assignment(&[0, 1]);
        let budget = program.row(ConstraintName::Budget).unwrap();
        assert_eq!(budget.activity(&x), 18.0);
        assert_eq!(budget.slack(&x), -3.0);
        assert_eq!(program.violated_rows(&x), vec![(ConstraintName::Budget, -3.0)]);

        // {A, C}: satisfies everything
        let x = program.assignment(&[0, 2]);
        assert!(program.violated_rows(&x).is_empty());
        assert_eq!(program.objective(&x), 80.0);
    }

    #[test]
    fn test_equality_slack_is_negative_deviation() {
        let pool = scenario_pool();
        let program =
            SquadProgram::formulate(&pool, &scenario_constraints(), &RunsWicketsScorer::default())
                .unwrap();
        let x = program.assignment(&[0, 1, 2]);
        let team = program.row(ConstraintName::TeamSize).unwrap();
        assert_eq!(team.slack(&x), -1.0);
    }

    #[test]
    fn test_decode_rounds_noise() {
        let pool = scenario_pool();
        let program =
            SquadProgram::formulate(&pool, &scenario_constraints(), &RunsWicketsScorer::default())
                .unwrap();
        assert_eq!(program.decode(&[0.9999999, 1e-8, 1.0000002]), vec![0, 2]);
        assert_eq!(program.decode(&[0.49, 0.51, 0.0]), vec![1]);
    }

    #[test]
    fn test_negative_impact_is_invalid_input() {
        let pool = scenario_pool();
        let scorer = squadforge_core::FnScorer::new(|c: &squadforge_core::Candidate| {
            if c.id == "B" {
                -1.0
            } else {
                1.0
            }
        });
        let err = SquadProgram::formulate(&pool, &scenario_constraints(), &scorer).unwrap_err();
        assert!(matches!(
            err,
            SolveError::InvalidInput(ValidationError::NegativeImpact { .. })
        ));
    }

    #[test]
    fn test_non_finite_impact_is_internal() {
        let pool = scenario_pool();
        let scorer = squadforge_core::FnScorer::new(|_: &squadforge_core::Candidate| f64::NAN);
        let err = SquadProgram::formulate(&pool, &scenario_constraints(), &scorer).unwrap_err();
        assert!(matches!(err, SolveError::Internal(_)));
    }

    #[test]
    fn test_invalid_budget_rejected() {
        let pool = scenario_pool();
        let constraints = scenario_constraints().with_budget_cap(f64::NAN);
        let err = SquadProgram::formulate(&pool, &constraints, &RunsWicketsScorer::default())
            .unwrap_err();
        assert!(matches!(err, SolveError::InvalidInput(_)));
    }

    #[test]
    fn test_constraint_names() {
        let names: Vec<&str> = ConstraintName::ALL.iter().map(|n| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "TeamSize",
                "Budget",
                "OverseasLimit",
                "MinBatsmen",
                "MinBowlers",
                "MinAllRounders",
                "MinWicketkeepers"
            ]
        );
    }

    #[test]
    fn test_vacuous_rows_are_inactive() {
        let pool = scenario_pool();
        let program =
            SquadProgram::formulate(&pool, &scenario_constraints(), &RunsWicketsScorer::default())
                .unwrap();
        // One overseas candidate, cap of one.
        assert!(!program.is_active(ConstraintName::OverseasLimit));
        assert!(program.is_active(ConstraintName::MinRole(Role::Batter)));
        assert!(!program.is_active(ConstraintName::MinRole(Role::Bowler)));
    }
}
