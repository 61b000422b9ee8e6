//! SquadForge Core - Domain types for squad optimization
//!
//! This crate provides the fundamental abstractions for SquadForge:
//! - Candidates, roles and validated candidate pools
//! - Constraint sets describing the squad-building limits
//! - Replaceable impact scoring policies
//! - Validation errors raised before any solve

pub mod domain;
pub mod error;
pub mod scoring;

pub use domain::{
    Candidate, CandidatePool, ConstraintSet, OverseasFilter, PoolFilter, PoolStats, Role,
};
pub use error::ValidationError;
pub use scoring::{FnScorer, ImpactScorer, RunsWicketsScorer};
