//! Best-effort explanation of an infeasible program.
//!
//! The checks below are arithmetic relaxations of the program rows: each
//! keeps a few rows, drops the rest and asks whether even that relaxed
//! program can be satisfied. A relaxation that cannot be satisfied exposes
//! the rows it kept. The report is advisory. It is not a certified minimal
//! infeasible subset; it may list rows that only contribute, and when no
//! relaxation isolates a cause it falls back to every active row.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use squadforge_core::Role;

use crate::program::{tolerance_for, ConstraintName, SquadProgram};

/// A row flagged by the diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViolatedConstraint {
    pub name: ConstraintName,
    /// Slack of the relaxation that exposed the row; negative means violated.
    /// `None` when no relaxation measured the row and it is listed only
    /// because it is active.
    pub slack: Option<f64>,
    /// Human-readable cause.
    pub detail: String,
}

/// Violated-constraint report for an infeasible solve.
///
/// Rows appear once each, in program declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeasibilityDiagnostics {
    violated: Vec<ViolatedConstraint>,
}

impl FeasibilityDiagnostics {
    /// Runs every relaxation check against the program.
    pub fn analyze(program: &SquadProgram<'_>) -> Self {
        let mut report = Report::default();
        let facts = PoolFacts::collect(program);

        check_against_squad_size(program, &facts, &mut report);
        check_role_minimum_sum(program, &mut report);
        if report.is_empty() {
            check_budget_with_roles(program, &facts, &mut report);
            check_overseas_with_roles(program, &facts, &mut report);
        }
        if report.is_empty() {
            for name in ConstraintName::ALL {
                if program.is_active(name) {
                    report.flag_unmeasured(name, "no single relaxation isolates a cause");
                }
            }
        }

        Self {
            violated: report.rows.into_values().collect(),
        }
    }

    pub fn violated(&self) -> &[ViolatedConstraint] {
        &self.violated
    }

    /// Flagged row names in declaration order.
    pub fn names(&self) -> Vec<ConstraintName> {
        self.violated.iter().map(|v| v.name).collect()
    }

    pub fn contains(&self, name: ConstraintName) -> bool {
        self.violated.iter().any(|v| v.name == name)
    }

    /// Looks a row up by its reported name, e.g. `"Budget"`.
    pub fn contains_str(&self, name: &str) -> bool {
        self.violated.iter().any(|v| v.name.as_str() == name)
    }

    /// Always true: the report is derived from relaxations, not a proof.
    pub fn is_advisory(&self) -> bool {
        true
    }

    pub fn len(&self) -> usize {
        self.violated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violated.is_empty()
    }
}

impl fmt::Display for FeasibilityDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Violated constraints: ")?;
        for (i, v) in self.violated.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(v.name.as_str())?;
        }
        Ok(())
    }
}

/// Deduplicating accumulator keyed by row; keeps the most negative slack.
#[derive(Default)]
struct Report {
    rows: BTreeMap<ConstraintName, ViolatedConstraint>,
}

impl Report {
    fn flag(&mut self, name: ConstraintName, slack: f64, detail: String) {
        match self.rows.get_mut(&name) {
            Some(existing) if existing.slack.is_some_and(|s| s <= slack) => {}
            Some(existing) => {
                existing.slack = Some(slack);
                existing.detail = detail;
            }
            None => {
                self.rows.insert(
                    name,
                    ViolatedConstraint {
                        name,
                        slack: Some(slack),
                        detail,
                    },
                );
            }
        }
    }

    fn flag_unmeasured(&mut self, name: ConstraintName, detail: &str) {
        self.rows.entry(name).or_insert_with(|| ViolatedConstraint {
            name,
            slack: None,
            detail: detail.to_string(),
        });
    }

    fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Supply counts and sorted prices the checks share.
struct PoolFacts {
    pool_size: u64,
    overseas: u64,
    role_supply: [u64; 4],
    domestic_role_supply: [u64; 4],
    /// Prices ascending, whole pool.
    prices: Vec<f64>,
    /// Prices ascending, per role.
    role_prices: [Vec<f64>; 4],
}

impl PoolFacts {
    fn collect(program: &SquadProgram<'_>) -> Self {
        let mut facts = PoolFacts {
            pool_size: 0,
            overseas: 0,
            role_supply: [0; 4],
            domestic_role_supply: [0; 4],
            prices: Vec::with_capacity(program.variable_count()),
            role_prices: Default::default(),
        };
        for candidate in program.pool() {
            let r = candidate.role.index();
            facts.pool_size += 1;
            facts.role_supply[r] += 1;
            if candidate.is_overseas {
                facts.overseas += 1;
            } else {
                facts.domestic_role_supply[r] += 1;
            }
            facts.prices.push(candidate.price);
            facts.role_prices[r].push(candidate.price);
        }
        facts.prices.sort_by(f64::total_cmp);
        for prices in &mut facts.role_prices {
            prices.sort_by(f64::total_cmp);
        }
        facts
    }

    fn domestic(&self) -> u64 {
        self.pool_size - self.overseas
    }
}

/// Each row relaxed against `TeamSize` alone.
fn check_against_squad_size(program: &SquadProgram<'_>, facts: &PoolFacts, report: &mut Report) {
    let constraints = program.constraints();
    let squad = u64::from(constraints.squad_size);

    if facts.pool_size < squad {
        report.flag(
            ConstraintName::TeamSize,
            facts.pool_size as f64 - squad as f64,
            format!(
                "squad of {} requested from a pool of {}",
                squad, facts.pool_size
            ),
        );
    } else {
        let cheapest: f64 = facts.prices.iter().take(squad as usize).sum();
        let slack = constraints.budget_cap - cheapest;
        if slack < -tolerance_for(constraints.budget_cap) {
            report.flag(
                ConstraintName::Budget,
                slack,
                format!(
                    "the {} cheapest candidates cost {:.2}, above the cap of {:.2}",
                    squad, cheapest, constraints.budget_cap
                ),
            );
        }

        let fillable = facts.domestic() + facts.overseas.min(u64::from(constraints.max_overseas));
        if fillable < squad {
            report.flag(
                ConstraintName::OverseasLimit,
                fillable as f64 - squad as f64,
                format!(
                    "{} domestic candidates plus at most {} overseas cannot fill {} slots",
                    facts.domestic(),
                    constraints.max_overseas,
                    squad
                ),
            );
        }
    }

    for role in Role::ALL {
        let minimum = u64::from(constraints.role_minimum(role));
        let supply = facts.role_supply[role.index()];
        if supply < minimum {
            report.flag(
                ConstraintName::MinRole(role),
                supply as f64 - minimum as f64,
                format!("{} {} required, {} available", minimum, role.label(), supply),
            );
        }
    }
}

/// Role minimums against the squad size.
fn check_role_minimum_sum(program: &SquadProgram<'_>, report: &mut Report) {
    let constraints = program.constraints();
    let squad = u64::from(constraints.squad_size);
    let total = constraints.total_role_minimum();
    if total <= squad {
        return;
    }

    let slack = squad as f64 - total as f64;
    report.flag(
        ConstraintName::TeamSize,
        slack,
        format!(
            "role minimums sum to {}, above the squad size of {}",
            total, squad
        ),
    );
    for role in Role::ALL {
        if constraints.role_minimum(role) > 0 {
            report.flag(
                ConstraintName::MinRole(role),
                slack,
                format!("part of role minimums summing to {}", total),
            );
        }
    }
}

/// Budget against the cheapest completion that respects every role minimum.
fn check_budget_with_roles(program: &SquadProgram<'_>, facts: &PoolFacts, report: &mut Report) {
    let constraints = program.constraints();
    let squad = constraints.squad_size as usize;
    let minimums = constraints.role_minimums();
    if minimums.iter().all(|&m| m == 0) {
        return;
    }

    // Cheapest m_r of each role first, then the cheapest of what is left.
    let mut cost = 0.0;
    let mut taken = 0usize;
    let mut leftovers = Vec::with_capacity(facts.prices.len());
    for role in Role::ALL {
        let r = role.index();
        let need = minimums[r] as usize;
        cost += facts.role_prices[r].iter().take(need).sum::<f64>();
        taken += need.min(facts.role_prices[r].len());
        leftovers.extend(facts.role_prices[r].iter().skip(need).copied());
    }
    leftovers.sort_by(f64::total_cmp);
    cost += leftovers
        .iter()
        .take(squad.saturating_sub(taken))
        .sum::<f64>();

    let slack = constraints.budget_cap - cost;
    if slack >= -tolerance_for(constraints.budget_cap) {
        return;
    }
    report.flag(
        ConstraintName::Budget,
        slack,
        format!(
            "the cheapest squad meeting the role minimums costs {:.2}, above the cap of {:.2}",
            cost, constraints.budget_cap
        ),
    );
    for role in Role::ALL {
        if minimums[role.index()] > 0 {
            report.flag(
                ConstraintName::MinRole(role),
                slack,
                format!(
                    "{} minimum raises the cheapest squad above the budget",
                    role.label()
                ),
            );
        }
    }
}

/// Overseas cap against role minimums that domestic supply cannot cover.
fn check_overseas_with_roles(program: &SquadProgram<'_>, facts: &PoolFacts, report: &mut Report) {
    let constraints = program.constraints();
    let minimums = constraints.role_minimums();

    let mut forced = 0u64;
    let mut short_roles = Vec::new();
    for role in Role::ALL {
        let r = role.index();
        let shortfall = u64::from(minimums[r]).saturating_sub(facts.domestic_role_supply[r]);
        if shortfall > 0 {
            forced += shortfall;
            short_roles.push(role);
        }
    }

    let cap = u64::from(constraints.max_overseas);
    if forced <= cap {
        return;
    }
    let slack = cap as f64 - forced as f64;
    report.flag(
        ConstraintName::OverseasLimit,
        slack,
        format!(
            "role minimums force {} overseas selections, above the cap of {}",
            forced, cap
        ),
    );
    for role in short_roles {
        report.flag(
            ConstraintName::MinRole(role),
            slack,
            format!("too few domestic {} candidates", role.label()),
        );
    }
}
