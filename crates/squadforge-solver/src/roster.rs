//! The decoded, aggregated squad returned by an optimal solve.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use squadforge_core::Role;

use crate::program::{tolerance_for, SquadProgram};

/// One selected candidate with its solve-time impact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterMember {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub price: f64,
    pub impact: f64,
    pub strike_rate: f64,
    pub is_overseas: bool,
    /// Whether this member shares the highest impact in the squad.
    pub is_captain: bool,
}

/// An optimal squad and its aggregates.
///
/// Built once from a verified selection and never modified afterwards.
/// Members are ordered by impact descending, then id ascending.
///
/// Every member tied on the highest impact is reported as a captain; no
/// single one is singled out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterResult {
    members: Vec<RosterMember>,
    selected_ids: Vec<String>,
    total_cost: f64,
    total_impact: f64,
    overseas_count: u32,
    #[serde(serialize_with = "serialize_role_counts")]
    role_counts: [u32; 4],
    average_strike_rate: Option<f64>,
    captains: Vec<String>,
    cost_efficiency: Option<f64>,
    budget_remaining: f64,
    overseas_quota: u32,
}

impl RosterResult {
    /// Aggregates the candidates at `indices` (pool positions).
    pub(crate) fn from_selection(program: &SquadProgram<'_>, indices: &[usize]) -> Self {
        let pool = program.pool().candidates();
        let impacts = program.impacts();

        let mut total_cost = 0.0;
        let mut total_impact = 0.0;
        let mut overseas_count = 0;
        let mut role_counts = [0u32; 4];
        let mut strike_rate_sum = 0.0;
        let mut batting_members = 0u32;
        let mut members = Vec::with_capacity(indices.len());

        for &index in indices {
            let candidate = &pool[index];
            total_cost += candidate.price;
            total_impact += impacts[index];
            role_counts[candidate.role.index()] += 1;
            if candidate.is_overseas {
                overseas_count += 1;
            }
            if candidate.has_strike_rate() {
                strike_rate_sum += candidate.strike_rate;
                batting_members += 1;
            }
            members.push(RosterMember {
                id: candidate.id.clone(),
                name: candidate.name.clone(),
                role: candidate.role,
                price: candidate.price,
                impact: impacts[index],
                strike_rate: candidate.strike_rate,
                is_overseas: candidate.is_overseas,
                is_captain: false,
            });
        }

        members.sort_by(|a, b| b.impact.total_cmp(&a.impact).then_with(|| a.id.cmp(&b.id)));

        let mut captains = Vec::new();
        if let Some(top) = members.first().map(|m| m.impact) {
            let threshold = top - tolerance_for(top);
            for member in members.iter_mut().filter(|m| m.impact >= threshold) {
                member.is_captain = true;
                captains.push(member.id.clone());
            }
        }
        captains.sort();

        let mut selected_ids: Vec<String> = members.iter().map(|m| m.id.clone()).collect();
        selected_ids.sort();

        let constraints = program.constraints();
        Self {
            members,
            selected_ids,
            total_cost,
            total_impact,
            overseas_count,
            role_counts,
            average_strike_rate: (batting_members > 0)
                .then(|| strike_rate_sum / f64::from(batting_members)),
            captains,
            cost_efficiency: (total_cost > 0.0).then(|| total_impact / total_cost),
            budget_remaining: constraints.budget_cap - total_cost,
            overseas_quota: constraints.max_overseas,
        }
    }

    /// Selected identifiers, ascending.
    pub fn selected_ids(&self) -> &[String] {
        &self.selected_ids
    }

    pub fn members(&self) -> &[RosterMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected_ids.binary_search_by(|s| s.as_str().cmp(id)).is_ok()
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn total_impact(&self) -> f64 {
        self.total_impact
    }

    pub fn overseas_count(&self) -> u32 {
        self.overseas_count
    }

    pub fn role_count(&self, role: Role) -> u32 {
        self.role_counts[role.index()]
    }

    /// Per-role counts indexed by [`Role::index`].
    pub fn role_counts(&self) -> [u32; 4] {
        self.role_counts
    }

    /// Mean strike rate over members with a non-zero strike rate.
    ///
    /// `None` when no member bats; never coerced to zero.
    pub fn average_strike_rate(&self) -> Option<f64> {
        self.average_strike_rate
    }

    /// Ids of every member tied on the highest impact, ascending.
    pub fn captains(&self) -> &[String] {
        &self.captains
    }

    /// Impact per unit of cost; `None` for a free squad.
    pub fn cost_efficiency(&self) -> Option<f64> {
        self.cost_efficiency
    }

    pub fn budget_remaining(&self) -> f64 {
        self.budget_remaining
    }

    /// The overseas cap the squad was picked under.
    pub fn overseas_quota(&self) -> u32 {
        self.overseas_quota
    }
}

fn serialize_role_counts<S: Serializer>(counts: &[u32; 4], s: S) -> Result<S::Ok, S::Error> {
    let mut map = s.serialize_map(Some(counts.len()))?;
    for role in Role::ALL {
        map.serialize_entry(role.label(), &counts[role.index()])?;
    }
    map.end()
}
