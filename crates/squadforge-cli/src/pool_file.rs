//! Pool documents: a `candidates` array in TOML or YAML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use squadforge::{Candidate, CandidatePool};

use crate::error::CliError;

/// The built-in star-player pool, as printed by `squadforge sample`.
pub const SAMPLE_POOL: &str = include_str!("sample_pool.toml");

/// On-disk shape of a pool file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PoolDocument {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolFormat {
    Toml,
    Yaml,
}

impl PoolFormat {
    /// YAML for `.yaml`/`.yml`, TOML for anything else.
    pub fn from_path(path: &Path) -> Self {
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if is_yaml {
            PoolFormat::Yaml
        } else {
            PoolFormat::Toml
        }
    }
}

/// Reads and validates the pool at `path`.
pub fn load_pool(path: &Path) -> Result<CandidatePool, CliError> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_pool(&contents, PoolFormat::from_path(path))
}

pub fn parse_pool(contents: &str, format: PoolFormat) -> Result<CandidatePool, CliError> {
    let document: PoolDocument = match format {
        PoolFormat::Toml => toml::from_str(contents)?,
        PoolFormat::Yaml => serde_yaml::from_str(contents)?,
    };
    Ok(CandidatePool::new(document.candidates)?)
}

/// Encodes `pool` as a TOML document with one `[[candidates]]` table each.
pub fn pool_to_toml(pool: &CandidatePool) -> Result<String, CliError> {
    let document = PoolDocument {
        candidates: pool.candidates().to_vec(),
    };
    Ok(toml::to_string(&document)?)
}
