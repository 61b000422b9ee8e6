//! Shared test fixtures for SquadForge crates.
//!
//! This crate provides pools, constraint sets and a reference solver for
//! testing. It depends only on `squadforge-core` so the solver crate can
//! use it as a dev-dependency.
//!
//! - [`scenario`] - The three-candidate worked example
//! - [`stars`] - A small pool of well-known players
//! - [`random`] - Seeded random pools and constraint sets
//! - [`oracle`] - Brute-force reference solver for small pools
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! squadforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use squadforge_test::scenario::{scenario_constraints, scenario_pool};
//! use squadforge_test::oracle::brute_force;
//! ```

pub mod oracle;
pub mod random;
pub mod scenario;
pub mod stars;

pub use oracle::{brute_force, OracleSolution};
pub use random::{random_constraints, random_pool};
pub use scenario::{scenario_constraints, scenario_pool};
pub use stars::star_players;
