//! Solver statistics.
//!
//! Per-worker counters merged into a single summary once the search ends.

use std::time::Duration;

use serde::Serialize;

/// Search-level statistics.
///
/// Tracks aggregate metrics across every worker of one solve.
///
/// # Example
///
/// ```
/// use squadforge_solver::stats::SolverStats;
///
/// let mut stats = SolverStats::default();
/// stats.record_node();
/// stats.record_node();
/// stats.record_bound_prune();
/// stats.record_leaf(true);
///
/// assert_eq!(stats.nodes_explored, 2);
/// assert_eq!(stats.bound_prunes, 1);
/// assert_eq!(stats.incumbent_updates, 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SolverStats {
    /// Search nodes popped from the stack.
    pub nodes_explored: u64,
    /// Nodes discarded because their bound could not beat the incumbent.
    pub bound_prunes: u64,
    /// Nodes discarded because no completion could satisfy the rows.
    pub feasibility_prunes: u64,
    /// Complete selections evaluated.
    pub leaves_evaluated: u64,
    /// Times the incumbent was replaced.
    pub incumbent_updates: u64,
    /// Subtrees searched (1 for a sequential solve).
    pub subtrees: u64,
    /// Worker threads used.
    pub threads: usize,
    /// Wall-clock time of the search.
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl SolverStats {
    #[inline]
    pub fn record_node(&mut self) {
        self.nodes_explored += 1;
    }

    #[inline]
    pub fn record_bound_prune(&mut self) {
        self.bound_prunes += 1;
    }

    #[inline]
    pub fn record_feasibility_prune(&mut self) {
        self.feasibility_prunes += 1;
    }

    /// Records a complete selection and whether it became the incumbent.
    #[inline]
    pub fn record_leaf(&mut self, improved: bool) {
        self.leaves_evaluated += 1;
        if improved {
            self.incumbent_updates += 1;
        }
    }

    /// Folds another worker's counters into this one.
    pub fn merge(&mut self, other: &SolverStats) {
        self.nodes_explored += other.nodes_explored;
        self.bound_prunes += other.bound_prunes;
        self.feasibility_prunes += other.feasibility_prunes;
        self.leaves_evaluated += other.leaves_evaluated;
        self.incumbent_updates += other.incumbent_updates;
        self.subtrees += other.subtrees;
    }

    /// Returns the nodes per second rate.
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.nodes_explored as f64 / secs
        } else {
            0.0
        }
    }

    /// Share of explored nodes cut by either pruning rule.
    pub fn prune_rate(&self) -> f64 {
        if self.nodes_explored == 0 {
            0.0
        } else {
            (self.bound_prunes + self.feasibility_prunes) as f64 / self.nodes_explored as f64
        }
    }
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
pub(crate) fn whole_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(whole_millis(*d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_sums_counters() {
        let mut a = SolverStats {
            nodes_explored: 10,
            bound_prunes: 2,
            subtrees: 1,
            ..Default::default()
        };
        let b = SolverStats {
            nodes_explored: 5,
            feasibility_prunes: 3,
            leaves_evaluated: 1,
            incumbent_updates: 1,
            subtrees: 1,
            ..Default::default()
        };
        a.merge(&b);
        assert_eq!(a.nodes_explored, 15);
        assert_eq!(a.bound_prunes, 2);
        assert_eq!(a.feasibility_prunes, 3);
        assert_eq!(a.incumbent_updates, 1);
        assert_eq!(a.subtrees, 2);
    }

    #[test]
    fn test_whole_millis_saturates() {
        assert_eq!(whole_millis(Duration::from_micros(2_500)), 2);
        assert_eq!(whole_millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn test_rates_without_work() {
        let stats = SolverStats::default();
        assert_eq!(stats.nodes_per_second(), 0.0);
        assert_eq!(stats.prune_rate(), 0.0);
    }

    #[test]
    fn test_prune_rate() {
        let stats = SolverStats {
            nodes_explored: 8,
            bound_prunes: 1,
            feasibility_prunes: 1,
            ..Default::default()
        };
        assert_eq!(stats.prune_rate(), 0.25);
    }
}
