//! Node-count-based termination.

use super::{Termination, TerminationReason};
use crate::scope::SearchScope;

/// Terminates once the workers together have explored `limit` nodes.
///
/// Workers report nodes in batches, so the search may overshoot the limit
/// by at most one batch per worker.
#[derive(Debug, Clone)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Termination for NodeCountTermination {
    fn check(&self, scope: &SearchScope) -> Option<TerminationReason> {
        (scope.nodes_explored() >= self.limit).then_some(TerminationReason::NodeLimit)
    }
}
