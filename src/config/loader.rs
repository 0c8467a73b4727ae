//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{CostingConfig, EligibilityConfig, EngineConfig, MatchingConfig};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// exposes the matching, costing, and eligibility sections.
///
/// # Directory Structure
///
/// ```text
/// config/dispatch/
/// ├── matching.yaml     # fuzzy threshold and manual overrides
/// ├── costing.yaml      # per-mile rate, per-diem, bonus tiers
/// └── eligibility.yaml  # exclusions and last-resort pool
/// ```
///
/// # Example
///
/// ```no_run
/// use assignment_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/dispatch").unwrap();
/// assert!(loader.config().matching().threshold > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` when a required file is missing and
    /// `ConfigParseError` when a file contains invalid YAML or is missing
    /// required fields.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let matching = Self::load_yaml::<MatchingConfig>(&path.join("matching.yaml"))?;
        let costing = Self::load_yaml::<CostingConfig>(&path.join("costing.yaml"))?;
        let eligibility = Self::load_yaml::<EligibilityConfig>(&path.join("eligibility.yaml"))?;

        Ok(Self {
            config: EngineConfig::new(matching, costing, eligibility),
        })
    }

    /// Wraps an already-built configuration, bypassing the filesystem.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
