//! Squad-building limits.

use super::candidate::Role;
use crate::error::ValidationError;

/// Limits a squad must satisfy.
///
/// Fields are accepted as given. Integer limits cannot be negative by
/// construction; the budget is checked by [`ConstraintSet::validate`].
/// Infeasible combinations (for example role minimums summing above the
/// squad size) are not rejected here, the solve discovers them.
///
/// # Examples
///
/// ```
/// use squadforge_core::{ConstraintSet, Role};
///
/// let limits = ConstraintSet::new(2, 15.0)
///     .with_max_overseas(1)
///     .with_role_minimum(Role::Batter, 1);
///
/// assert_eq!(limits.squad_size, 2);
/// assert_eq!(limits.role_minimum(Role::Batter), 1);
/// assert_eq!(limits.total_role_minimum(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConstraintSet {
    /// Exact number of candidates to select.
    pub squad_size: u32,
    /// Inclusive upper bound on the summed price.
    pub budget_cap: f64,
    /// Inclusive upper bound on overseas selections.
    pub max_overseas: u32,
    pub min_batters: u32,
    pub min_bowlers: u32,
    pub min_all_rounders: u32,
    pub min_wicket_keepers: u32,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self {
            squad_size: 11,
            budget_cap: 100.0,
            max_overseas: 4,
            min_batters: 3,
            min_bowlers: 3,
            min_all_rounders: 2,
            min_wicket_keepers: 1,
        }
    }
}

impl ConstraintSet {
    /// Creates a constraint set with no overseas restriction beyond the
    /// squad size and no role minimums.
    pub fn new(squad_size: u32, budget_cap: f64) -> Self {
        Self {
            squad_size,
            budget_cap,
            max_overseas: squad_size,
            min_batters: 0,
            min_bowlers: 0,
            min_all_rounders: 0,
            min_wicket_keepers: 0,
        }
    }

    pub fn with_squad_size(mut self, squad_size: u32) -> Self {
        self.squad_size = squad_size;
        self
    }

    pub fn with_budget_cap(mut self, budget_cap: f64) -> Self {
        self.budget_cap = budget_cap;
        self
    }

    pub fn with_max_overseas(mut self, max_overseas: u32) -> Self {
        self.max_overseas = max_overseas;
        self
    }

    pub fn with_role_minimum(mut self, role: Role, minimum: u32) -> Self {
        *self.role_minimum_mut(role) = minimum;
        self
    }

    /// Returns the minimum count required for `role`.
    pub fn role_minimum(&self, role: Role) -> u32 {
        match role {
            Role::Batter => self.min_batters,
            Role::Bowler => self.min_bowlers,
            Role::AllRounder => self.min_all_rounders,
            Role::WicketKeeper => self.min_wicket_keepers,
        }
    }

    fn role_minimum_mut(&mut self, role: Role) -> &mut u32 {
        match role {
            Role::Batter => &mut self.min_batters,
            Role::Bowler => &mut self.min_bowlers,
            Role::AllRounder => &mut self.min_all_rounders,
            Role::WicketKeeper => &mut self.min_wicket_keepers,
        }
    }

    /// Role minimums indexed by [`Role::index`].
    pub fn role_minimums(&self) -> [u32; 4] {
        Role::ALL.map(|role| self.role_minimum(role))
    }

    /// Sum of all role minimums, widened so it cannot overflow.
    pub fn total_role_minimum(&self) -> u64 {
        self.role_minimums().iter().map(|&m| u64::from(m)).sum()
    }

    /// Rejects a negative or non-finite budget.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.budget_cap.is_finite() || self.budget_cap < 0.0 {
            return Err(ValidationError::InvalidBudget(self.budget_cap));
        }
        Ok(())
    }
}
