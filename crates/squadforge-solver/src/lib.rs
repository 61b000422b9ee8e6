//! SquadForge Solver Engine
//!
//! This crate provides the exact squad optimizer including:
//! - The 0/1 program formulation with named rows
//! - Branch-and-bound search with a Lagrangian budget bound
//! - Termination conditions (time, node count, external cancellation)
//! - Feasibility diagnostics for infeasible configurations
//! - Roster aggregation for optimal selections

pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod exhaustive;
pub mod program;
pub mod roster;
pub mod scope;
pub mod stats;
pub mod termination;

pub use diagnostics::{FeasibilityDiagnostics, ViolatedConstraint};
pub use engine::{EngineConfig, OptimizationEngine, SolveOutcome};
pub use error::{ErrorKind, Result, SolveError};
pub use program::{ConstraintName, LinearRow, RowSense, SquadProgram};
pub use roster::{RosterMember, RosterResult};
pub use scope::SearchScope;
pub use stats::SolverStats;
pub use termination::{
    ExternalTermination, NodeCountTermination, OrTermination, Termination, TerminationReason,
    TimeTermination,
};
