//! The set of candidates eligible for selection.

use std::collections::HashSet;

use super::candidate::{Candidate, Role};
use crate::error::ValidationError;
use crate::scoring::ImpactScorer;

/// A validated, owned snapshot of candidates.
///
/// Every solve borrows a pool immutably; there is no shared pool store.
/// Candidate order is preserved as supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    candidates: Vec<Candidate>,
}

impl CandidatePool {
    /// Validates every candidate and identifier uniqueness.
    pub fn new(candidates: Vec<Candidate>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(candidates.len());
        for (index, candidate) in candidates.iter().enumerate() {
            candidate.validate(index)?;
            if !seen.insert(candidate.id.as_str()) {
                return Err(ValidationError::DuplicateId(candidate.id.clone()));
            }
        }
        Ok(Self { candidates })
    }

    /// Creates an empty pool.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    /// Returns a new pool with the candidates matching `filter`.
    pub fn filter(&self, filter: &PoolFilter) -> CandidatePool {
        CandidatePool {
            candidates: self
                .candidates
                .iter()
                .filter(|c| filter.matches(c))
                .cloned()
                .collect(),
        }
    }

    /// Aggregate counts over the whole pool.
    pub fn stats(&self) -> PoolStats {
        let mut stats = PoolStats::default();
        for candidate in &self.candidates {
            stats.total_players += 1;
            stats.total_value += candidate.price;
            if candidate.is_overseas {
                stats.overseas_count += 1;
            }
            stats.role_counts[candidate.role.index()] += 1;
        }
        stats
    }

    /// Candidates paired with their impact, best first, ties by identifier.
    pub fn ranked_by_impact<'a>(&'a self, scorer: &dyn ImpactScorer) -> Vec<(&'a Candidate, f64)> {
        let mut ranked: Vec<(&Candidate, f64)> = self
            .candidates
            .iter()
            .map(|c| (c, scorer.score(c)))
            .collect();
        ranked.sort_by(|(left, li), (right, ri)| {
            ri.total_cmp(li).then_with(|| left.id.cmp(&right.id))
        });
        ranked
    }
}

impl<'a> IntoIterator for &'a CandidatePool {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

/// Nationality restriction for [`PoolFilter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OverseasFilter {
    #[default]
    All,
    DomesticOnly,
    OverseasOnly,
}

/// Narrows a pool by role, price and nationality.
///
/// # Examples
///
/// ```
/// use squadforge_core::{Candidate, CandidatePool, OverseasFilter, PoolFilter, Role};
///
/// let pool = CandidatePool::new(vec![
///     Candidate::new("a", "A", Role::Batter, 10.0),
///     Candidate::new("b", "B", Role::Bowler, 8.0).overseas(true),
/// ]).unwrap();
///
/// let domestic = pool.filter(&PoolFilter::new().with_overseas(OverseasFilter::DomesticOnly));
/// assert_eq!(domestic.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolFilter {
    /// Allowed roles; `None` allows every role.
    pub roles: Option<Vec<Role>>,
    /// Inclusive price ceiling.
    pub max_price: Option<f64>,
    pub overseas: OverseasFilter,
}

impl PoolFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = Some(roles.into_iter().collect());
        self
    }

    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn with_overseas(mut self, overseas: OverseasFilter) -> Self {
        self.overseas = overseas;
        self
    }

    pub fn matches(&self, candidate: &Candidate) -> bool {
        if let Some(roles) = &self.roles {
            if !roles.contains(&candidate.role) {
                return false;
            }
        }
        if let Some(max_price) = self.max_price {
            if candidate.price > max_price {
                return false;
            }
        }
        match self.overseas {
            OverseasFilter::All => true,
            OverseasFilter::DomesticOnly => !candidate.is_overseas,
            OverseasFilter::OverseasOnly => candidate.is_overseas,
        }
    }
}

/// Summary counts for a pool.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PoolStats {
    pub total_players: usize,
    pub total_value: f64,
    pub overseas_count: usize,
    /// Indexed by [`Role::index`].
    pub role_counts: [usize; 4],
}

impl PoolStats {
    pub fn role_count(&self, role: Role) -> usize {
        self.role_counts[role.index()]
    }
}
