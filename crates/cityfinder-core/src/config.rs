// crates/cityfinder-core/src/config.rs

//! Runtime configuration for a [`CityRepository`](crate::CityRepository).
//!
//! Defaults point at the bundled dataset. Environment variables override the
//! defaults, and the CLI's flags override both.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::loader::{default_dataset_path, FileSource};
use crate::text::Folding;

/// Path of the dataset to load.
pub const ENV_DATA_PATH: &str = "CITYFINDER_DATA";
/// `lowercase` or `ascii`, see [`Folding`].
pub const ENV_FOLDING: &str = "CITYFINDER_FOLDING";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub data_path: PathBuf,
    #[serde(default)]
    pub folding: Folding,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            data_path: default_dataset_path(),
            folding: Folding::default(),
        }
    }
}

impl RepositoryConfig {
    /// Defaults overridden by `CITYFINDER_DATA` / `CITYFINDER_FOLDING`.
    ///
    /// Unset or empty variables are ignored; an unknown folding name is an
    /// error rather than a silent fallback.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = lookup(ENV_DATA_PATH).filter(|v| !v.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(folding) = lookup(ENV_FOLDING).filter(|v| !v.trim().is_empty()) {
            config.folding = folding.parse()?;
        }
        Ok(config)
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_folding(mut self, folding: Folding) -> Self {
        self.folding = folding;
        self
    }

    pub fn file_source(&self) -> FileSource {
        FileSource::new(&self.data_path)
    }
}
