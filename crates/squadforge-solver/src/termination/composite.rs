//! Composite termination (OR).
//!
//! Uses macro-generated tuple implementations, no boxing.

use super::{Termination, TerminationReason};
use crate::scope::SearchScope;

/// Combines multiple terminations with OR logic.
///
/// Wraps a tuple of terminations and reports the reason of the first
/// child, in tuple order, that terminates.
///
/// # Examples
///
/// ```
/// use squadforge_solver::termination::{NodeCountTermination, OrTermination, TimeTermination};
///
/// // Terminate after 30 seconds OR 1_000_000 nodes
/// let termination = OrTermination::new((
///     TimeTermination::seconds(30),
///     Some(NodeCountTermination::new(1_000_000)),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    /// Creates a new OR termination from a tuple of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Generates `Termination` implementations for OR tuples.
macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn check(&self, scope: &SearchScope) -> Option<TerminationReason> {
                None$(.or_else(|| (self.0).$idx.check(scope)))+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
