//! Termination conditions for the branch-and-bound search.
//!
//! A search that terminates early never produces a roster; the reason is
//! reported to the caller as a distinct error.

mod composite;
mod external;
mod node_count;
mod time;

use std::fmt::{self, Debug};

use crate::scope::SearchScope;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use node_count::NodeCountTermination;
pub use time::TimeTermination;

/// Why a search stopped before proving optimality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    TimeLimit,
    NodeLimit,
    Cancelled,
}

impl TerminationReason {
    pub(crate) const fn code(self) -> u8 {
        match self {
            TerminationReason::TimeLimit => 1,
            TerminationReason::NodeLimit => 2,
            TerminationReason::Cancelled => 3,
        }
    }

    pub(crate) const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(TerminationReason::TimeLimit),
            2 => Some(TerminationReason::NodeLimit),
            3 => Some(TerminationReason::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::TimeLimit => write!(f, "TimeLimit"),
            TerminationReason::NodeLimit => write!(f, "NodeLimit"),
            TerminationReason::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Trait for determining when to stop searching.
///
/// Checked periodically by every worker against the shared scope.
pub trait Termination: Send + Sync + Debug {
    /// Returns the reason to stop, or `None` to keep searching.
    fn check(&self, scope: &SearchScope) -> Option<TerminationReason>;

    /// Returns true if searching should terminate.
    fn is_terminated(&self, scope: &SearchScope) -> bool {
        self.check(scope).is_some()
    }
}

/// An absent condition never terminates.
impl<T: Termination> Termination for Option<T> {
    fn check(&self, scope: &SearchScope) -> Option<TerminationReason> {
        self.as_ref().and_then(|t| t.check(scope))
    }
}
