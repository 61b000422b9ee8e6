//! Impact scoring policies.
//!
//! The optimizer maximizes the summed impact of the selected squad. Impact is
//! produced by an [`ImpactScorer`], so alternative weightings can be swapped in
//! without touching the solver.

use std::fmt::Debug;

use crate::domain::Candidate;

/// Computes the value of a single candidate.
///
/// Implementations must be pure and deterministic: the solver calls
/// `score` once per candidate per solve and relies on identical inputs
/// producing identical outputs.
pub trait ImpactScorer: Send + Sync + Debug {
    fn score(&self, candidate: &Candidate) -> f64;
}

/// Default policy: `runs_scored + wicket_weight * wickets`.
///
/// # Examples
///
/// ```
/// use squadforge_core::{Candidate, ImpactScorer, Role, RunsWicketsScorer};
///
/// let bumrah = Candidate::new("bumrah", "Jasprit Bumrah", Role::Bowler, 13.0)
///     .with_batting(10, 100.0)
///     .with_bowling(27, 6.73);
///
/// assert_eq!(RunsWicketsScorer::default().score(&bumrah), 550.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunsWicketsScorer {
    wicket_weight: f64,
}

impl RunsWicketsScorer {
    /// Weight applied per wicket by the default policy.
    pub const DEFAULT_WICKET_WEIGHT: f64 = 20.0;

    pub fn new(wicket_weight: f64) -> Self {
        Self { wicket_weight }
    }

    pub fn wicket_weight(&self) -> f64 {
        self.wicket_weight
    }
}

impl Default for RunsWicketsScorer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WICKET_WEIGHT)
    }
}

impl ImpactScorer for RunsWicketsScorer {
    #[inline]
    fn score(&self, candidate: &Candidate) -> f64 {
        f64::from(candidate.runs_scored) + self.wicket_weight * f64::from(candidate.wickets)
    }
}

/// Adapts a plain function into a scorer.
///
/// ```
/// use squadforge_core::{Candidate, FnScorer, ImpactScorer, Role};
///
/// let runs_only = FnScorer::new(|c: &Candidate| f64::from(c.runs_scored));
/// let c = Candidate::new("x", "X", Role::Batter, 1.0).with_batting(42, 120.0);
/// assert_eq!(runs_only.score(&c), 42.0);
/// ```
#[derive(Clone, Copy)]
pub struct FnScorer<F>(F);

impl<F> FnScorer<F>
where
    F: Fn(&Candidate) -> f64 + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Debug for FnScorer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnScorer").finish()
    }
}

impl<F> ImpactScorer for FnScorer<F>
where
    F: Fn(&Candidate) -> f64 + Send + Sync,
{
    #[inline]
    fn score(&self, candidate: &Candidate) -> f64 {
        (self.0)(candidate)
    }
}
