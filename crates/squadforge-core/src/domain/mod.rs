//! Domain model for squad selection.
//!
//! - [`Candidate`] and [`Role`]: the entities being selected
//! - [`CandidatePool`]: a validated snapshot handed to each solve
//! - [`ConstraintSet`]: the limits a squad must respect

mod candidate;
mod constraints;
mod pool;

#[cfg(test)]
mod tests;

pub use candidate::{Candidate, Role};
pub use constraints::ConstraintSet;
pub use pool::{CandidatePool, OverseasFilter, PoolFilter, PoolStats};
