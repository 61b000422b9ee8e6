//! Candidates and their playing roles.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Playing role of a candidate.
///
/// Role minimums in a [`ConstraintSet`](super::ConstraintSet) are expressed
/// per role, in the declaration order used here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[cfg_attr(feature = "serde", serde(alias = "Batsman", alias = "batter", alias = "batsman"))]
    Batter,
    #[cfg_attr(feature = "serde", serde(alias = "bowler"))]
    Bowler,
    #[cfg_attr(feature = "serde", serde(alias = "All-Rounder", alias = "all_rounder"))]
    AllRounder,
    #[cfg_attr(feature = "serde", serde(alias = "Wicketkeeper", alias = "wicket_keeper"))]
    WicketKeeper,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 4] = [
        Role::Batter,
        Role::Bowler,
        Role::AllRounder,
        Role::WicketKeeper,
    ];

    /// Dense index of the role, matching [`Role::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Role::Batter => 0,
            Role::Bowler => 1,
            Role::AllRounder => 2,
            Role::WicketKeeper => 3,
        }
    }

    /// Human-facing label as used on team sheets.
    pub const fn label(self) -> &'static str {
        match self {
            Role::Batter => "Batsman",
            Role::Bowler => "Bowler",
            Role::AllRounder => "All-Rounder",
            Role::WicketKeeper => "Wicketkeeper",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "batter" | "batsman" | "bat" => Ok(Role::Batter),
            "bowler" | "bowl" => Ok(Role::Bowler),
            "allrounder" | "ar" => Ok(Role::AllRounder),
            "wicketkeeper" | "keeper" | "wk" => Ok(Role::WicketKeeper),
            _ => Err(ValidationError::UnknownRole(s.to_string())),
        }
    }
}

/// An entity eligible for selection into the squad.
///
/// Candidates carry raw statistics only. Impact is derived per solve by an
/// [`ImpactScorer`](crate::scoring::ImpactScorer) and never stored here.
///
/// # Examples
///
/// ```
/// use squadforge_core::{Candidate, Role};
///
/// let c = Candidate::new("kohli", "Virat Kohli", Role::Batter, 15.0)
///     .with_batting(741, 154.69)
///     .with_bowling(0, 0.0);
///
/// assert_eq!(c.runs_scored, 741);
/// assert!(!c.is_overseas);
/// assert!(c.validate(0).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    pub role: Role,
    pub price: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub runs_scored: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub wickets: u32,
    /// Batting strike rate; `0.0` means not applicable.
    #[cfg_attr(feature = "serde", serde(default))]
    pub strike_rate: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub economy: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_overseas: bool,
}

impl Candidate {
    /// Creates a domestic candidate with zeroed statistics.
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            price,
            runs_scored: 0,
            wickets: 0,
            strike_rate: 0.0,
            economy: 0.0,
            is_overseas: false,
        }
    }

    pub fn with_batting(mut self, runs_scored: u32, strike_rate: f64) -> Self {
        self.runs_scored = runs_scored;
        self.strike_rate = strike_rate;
        self
    }

    pub fn with_bowling(mut self, wickets: u32, economy: f64) -> Self {
        self.wickets = wickets;
        self.economy = economy;
        self
    }

    pub fn overseas(mut self, is_overseas: bool) -> Self {
        self.is_overseas = is_overseas;
        self
    }

    /// Returns true when the candidate has a meaningful strike rate.
    #[inline]
    pub fn has_strike_rate(&self) -> bool {
        self.strike_rate > 0.0
    }

    /// Checks field ranges. `index` is the pool position, used when the
    /// identifier itself is missing.
    pub fn validate(&self, index: usize) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId { index });
        }
        for (field, value) in [
            ("price", self.price),
            ("strike_rate", self.strike_rate),
            ("economy", self.economy),
        ] {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite {
                    id: self.id.clone(),
                    field,
                });
            }
            if value < 0.0 {
                return Err(ValidationError::Negative {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}
