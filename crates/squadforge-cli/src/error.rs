//! Errors surfaced by the command line.

use std::path::PathBuf;

use squadforge::{ConfigError, SolveError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write output: {0}")]
    Write(#[from] std::io::Error),

    #[error("invalid TOML pool file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("cannot encode pool as TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("invalid YAML pool file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("cannot encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pool: {0}")]
    Pool(#[from] ValidationError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solve(#[from] SolveError),
}
