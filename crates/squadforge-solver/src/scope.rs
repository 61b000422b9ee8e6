//! Search scope shared by every worker of one solve.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::time::{Duration, Instant};

use crate::termination::TerminationReason;

/// Shared state of a running solve.
///
/// Holds the start instant, the global node counter, the best objective
/// found by any worker and the stop signal. Everything is atomic so
/// workers on a rayon pool can share one `&SearchScope`.
#[derive(Debug)]
pub struct SearchScope {
    start_time: Instant,
    nodes_explored: AtomicU64,
    best_objective: AtomicObjective,
    stopped: AtomicBool,
    stop_reason: AtomicU8,
}

impl Default for SearchScope {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            nodes_explored: AtomicU64::new(0),
            best_objective: AtomicObjective::new(),
            stopped: AtomicBool::new(false),
            stop_reason: AtomicU8::new(0),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Nodes reported so far by all workers.
    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored.load(Ordering::Relaxed)
    }

    /// Adds a worker's batch of explored nodes to the global count.
    pub fn add_nodes(&self, count: u64) {
        self.nodes_explored.fetch_add(count, Ordering::Relaxed);
    }

    /// Best objective published by any worker.
    pub fn best_objective(&self) -> Option<f64> {
        self.best_objective.get()
    }

    /// Publishes an objective; keeps the maximum.
    pub fn offer_objective(&self, objective: f64) {
        self.best_objective.offer(objective);
    }

    /// Requests every worker to stop; the first reason wins.
    pub fn stop(&self, reason: TerminationReason) {
        let _ = self.stop_reason.compare_exchange(
            0,
            reason.code(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        self.stopped.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    pub fn stop_reason(&self) -> Option<TerminationReason> {
        if self.is_stopped() {
            TerminationReason::from_code(self.stop_reason.load(Ordering::Acquire))
        } else {
            None
        }
    }
}

/// A maximized objective shared between threads.
///
/// `0` means empty; otherwise the cell holds `f64::to_bits(value) + 1`.
/// Objectives are non-negative, so the IEEE bit patterns order the same way
/// as the values and an integer `fetch_max` suffices.
#[derive(Debug, Default)]
pub(crate) struct AtomicObjective(AtomicU64);

impl AtomicObjective {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn get(&self) -> Option<f64> {
        match self.0.load(Ordering::Acquire) {
            0 => None,
            bits => Some(f64::from_bits(bits - 1)),
        }
    }

    pub fn offer(&self, objective: f64) {
        debug_assert!(objective >= 0.0);
        self.0.fetch_max(objective.to_bits() + 1, Ordering::AcqRel);
    }
}
