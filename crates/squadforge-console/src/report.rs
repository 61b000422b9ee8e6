//! Text reports for rosters, infeasibility and pool statistics.

use std::fmt::Write;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use squadforge_core::{PoolStats, Role};
use squadforge_solver::{FeasibilityDiagnostics, RosterResult};

use crate::format_number;

const RULE: &str = "══════════════════════════════════════════════════════════════════════════";

/// One row per member, then the aggregates.
pub fn render_roster(roster: &RosterResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE.bright_cyan());
    let _ = writeln!(
        out,
        "  {:<3} {:<24} {:<13} {:>7} {:>8} {:>7}  {}",
        "#", "Player", "Role", "Price", "Impact", "SR", "Flags"
    );
    let _ = writeln!(out, "{}", RULE.bright_cyan());

    for (i, member) in roster.members().iter().enumerate() {
        let mut flags = String::new();
        if member.is_captain {
            flags.push('C');
        }
        if member.is_overseas {
            flags.push('O');
        }
        let strike_rate = if member.strike_rate > 0.0 {
            format!("{:.2}", member.strike_rate)
        } else {
            "-".to_string()
        };
        let _ = writeln!(
            out,
            "  {:<3} {:<24} {:<13} {:>7.2} {:>8} {:>7}  {}",
            i + 1,
            truncate(&member.name, 24),
            member.role.label(),
            member.price,
            format_number(member.impact),
            strike_rate,
            flags
        );
    }
    let _ = writeln!(out, "{}", RULE.bright_cyan());

    let _ = writeln!(
        out,
        "  Total impact      {}",
        format_number(roster.total_impact()).bright_green().bold()
    );
    let _ = writeln!(out, "  Total cost        {:.2}", roster.total_cost());
    let _ = writeln!(out, "  Budget remaining  {:.2}", roster.budget_remaining());
    let _ = writeln!(
        out,
        "  Overseas          {} / {}",
        roster.overseas_count(),
        roster.overseas_quota()
    );
    let roles: Vec<String> = Role::ALL
        .iter()
        .map(|&role| format!("{} {}", roster.role_count(role), role.label()))
        .collect();
    let _ = writeln!(out, "  Roles             {}", roles.join(", "));
    let _ = writeln!(
        out,
        "  Avg strike rate   {}",
        roster
            .average_strike_rate()
            .map(|sr| format!("{:.2}", sr))
            .unwrap_or_else(|| "n/a".to_string())
    );
    let _ = writeln!(
        out,
        "  Cost efficiency   {}",
        roster
            .cost_efficiency()
            .map(|e| format!("{:.2} impact per unit", e))
            .unwrap_or_else(|| "n/a".to_string())
    );
    let _ = writeln!(out, "  Captain           {}", roster.captains().join(", "));
    out
}

/// The violated-constraint message followed by one line per cause.
pub fn render_diagnostics(diagnostics: &FeasibilityDiagnostics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", diagnostics.to_string().bright_red().bold());
    for violated in diagnostics.violated() {
        let _ = writeln!(
            out,
            "  {:<18} {}",
            violated.name.as_str(),
            violated.detail.bright_black()
        );
    }
    let _ = writeln!(
        out,
        "{}",
        "  (advisory: derived from relaxations, not a minimal infeasible set)".bright_black()
    );
    out
}

pub fn render_pool_stats(stats: &PoolStats) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  Players       {}",
        stats
            .total_players
            .to_formatted_string(&Locale::en)
            .bright_yellow()
    );
    let _ = writeln!(out, "  Total value   {:.2}", stats.total_value);
    let _ = writeln!(out, "  Overseas      {}", stats.overseas_count);
    for role in Role::ALL {
        let _ = writeln!(out, "  {:<13} {}", role.label(), stats.role_count(role));
    }
    out
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(width - 1).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use squadforge_core::{ConstraintSet, RunsWicketsScorer};
    use squadforge_solver::OptimizationEngine;
    use squadforge_test::scenario::{scenario_constraints, scenario_pool};
    use squadforge_test::stars::star_players;

    #[test]
    fn test_roster_report() {
        let pool = star_players();
        let constraints = ConstraintSet::new(3, 40.0);
        let roster = OptimizationEngine::with_scorer(RunsWicketsScorer::default())
            .solve(&pool, &constraints)
            .unwrap()
            .into_result()
            .unwrap();
        let text = render_roster(&roster);
        assert!(text.contains("Player"));
        assert!(text.contains("Total cost"));
        for member in roster.members() {
            assert!(text.contains(&member.name));
        }
    }

    #[test]
    fn test_diagnostics_report() {
        let pool = scenario_pool();
        let outcome = OptimizationEngine::new()
            .solve(&pool, &scenario_constraints().with_budget_cap(3.0))
            .unwrap();
        let text = render_diagnostics(outcome.diagnostics().unwrap());
        assert!(text.contains("Violated constraints: Budget"));
        assert!(text.contains("advisory"));
    }

    #[test]
    fn test_pool_stats_report() {
        let text = render_pool_stats(&star_players().stats());
        assert!(text.contains("105.25"));
        assert!(text.contains("Wicketkeeper"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
