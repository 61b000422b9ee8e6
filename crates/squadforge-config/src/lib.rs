//! Configuration system for SquadForge.
//!
//! Load squad limits and solver settings from TOML or YAML files so
//! constraint changes need no code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use squadforge_config::SquadConfig;
//! use std::time::Duration;
//!
//! let config = SquadConfig::from_toml_str(r#"
//!     [constraints]
//!     squad_size = 11
//!     budget_cap = 95.5
//!     max_overseas = 4
//!     min_wicket_keepers = 1
//!
//!     [termination]
//!     seconds_spent_limit = 10
//!
//!     [search]
//!     thread_count = { count = 4 }
//! "#).unwrap();
//!
//! assert_eq!(config.constraints.budget_cap, 95.5);
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(10)));
//! assert_eq!(config.search.thread_count.resolve(8), 4);
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use squadforge_config::SquadConfig;
//!
//! let config = SquadConfig::load("squad.toml").unwrap_or_default();
//! assert_eq!(config.constraints.squad_size, 11);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use squadforge_core::ConstraintSet;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level squad optimizer configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SquadConfig {
    /// Squad-building limits.
    #[serde(default)]
    pub constraints: ConstraintSet,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Search configuration.
    #[serde(default)]
    pub search: SearchConfig,
}

impl SquadConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing YAML for `.yaml`/`.yml`
    /// extensions and TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, cannot be parsed, or
    /// contains out-of-range values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if is_yaml {
            Self::from_yaml_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the type system cannot rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.constraints
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.search.thread_count == ThreadCount::Count(0) {
            return Err(ConfigError::Invalid(
                "thread_count must be at least 1".to_string(),
            ));
        }
        if let Some(weight) = self.search.wicket_weight {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "wicket_weight must be a finite non-negative number, got {weight}"
                )));
            }
        }
        Ok(())
    }

    /// Replaces the squad-building limits.
    pub fn with_constraints(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = constraints;
        self
    }

    /// Sets the termination time limit in seconds.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the termination time limit in milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            millis_spent_limit: Some(millis),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the search thread count.
    pub fn with_thread_count(mut self, thread_count: ThreadCount) -> Self {
        self.search.thread_count = thread_count;
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the node count limit, if configured.
    pub fn node_count_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.node_count_limit)
    }
}

/// Termination configuration.
///
/// Any limit firing before the search proves optimality ends the solve
/// without a roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Additional milliseconds to spend solving.
    pub millis_spent_limit: Option<u64>,

    /// Maximum number of search nodes to explore.
    pub node_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the combined time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self
            .seconds_spent_limit
            .unwrap_or(0)
            .saturating_mul(1000)
            .saturating_add(self.millis_spent_limit.unwrap_or(0));
        if self.seconds_spent_limit.is_none() && self.millis_spent_limit.is_none() {
            None
        } else {
            Some(Duration::from_millis(millis))
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Number of threads used to explore the branch-and-bound tree.
    #[serde(default)]
    pub thread_count: ThreadCount,

    /// Per-wicket weight for the default impact scorer.
    #[serde(default)]
    pub wicket_weight: Option<f64>,
}

/// Search thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadCount {
    /// Use every available core.
    Auto,

    /// Single-threaded search.
    #[default]
    None,

    /// Specific number of threads.
    Count(usize),
}

impl ThreadCount {
    /// Resolves to a concrete count given the number of available cores.
    pub fn resolve(self, available: usize) -> usize {
        match self {
            ThreadCount::Auto => available.max(1),
            ThreadCount::None => 1,
            ThreadCount::Count(n) => n.max(1),
        }
    }
}
