//! Dashboard configuration loading and saving.

use std::path::{Path, PathBuf};

use alf_data::DataStore;
use alf_data::store::{DEFAULT_HISTORICAL_NAME, DEFAULT_PREFIX};
use serde::{Deserialize, Serialize};

use crate::aggregate::WindowPolicy;
use crate::catalog::Catalog;
use crate::error::{AppError, AppResult};
use crate::request::ChartRequest;

/// Where the data lives, what the selectors offer and what they start on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub file_prefix: String,
    pub historical_name: String,
    pub window_policy: WindowPolicy,
    pub defaults: ChartRequest,
    pub catalog: Catalog,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            file_prefix: DEFAULT_PREFIX.to_string(),
            historical_name: DEFAULT_HISTORICAL_NAME.to_string(),
            window_policy: WindowPolicy::default(),
            defaults: ChartRequest::default(),
            catalog: Catalog::default(),
        }
    }
}

impl DashboardConfig {
    /// Open the data directory named by this configuration.
    pub fn open_store(&self) -> AppResult<DataStore> {
        Ok(DataStore::new(self.data_dir.clone())?
            .with_prefix(&self.file_prefix)
            .with_historical_name(&self.historical_name))
    }

    fn check(&self) -> AppResult<()> {
        if self.file_prefix.is_empty() {
            return Err(AppError::Config("file_prefix must not be empty".to_string()));
        }
        if self.catalog.max_replicate == 0 {
            return Err(AppError::Config(
                "catalog.max_replicate must be at least 1".to_string(),
            ));
        }
        self.defaults
            .validate(&self.catalog)
            .map_err(|e| AppError::Config(format!("defaults: {}", e)))
    }
}

/// Load configuration from a YAML file. Relative data directories resolve
/// against the file's own directory.
pub fn load_config(path: &Path) -> AppResult<DashboardConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut config: DashboardConfig = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;

    if config.data_dir.is_relative() {
        if let Some(parent) = path.parent() {
            config.data_dir = parent.join(&config.data_dir);
        }
    }

    config.check()?;
    tracing::debug!(path = %path.display(), data_dir = %config.data_dir.display(), "loaded config");
    Ok(config)
}

/// Save configuration to a YAML file.
pub fn save_config(path: &Path, config: &DashboardConfig) -> AppResult<()> {
    let content = serde_yaml::to_string(config)
        .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(path, content).map_err(|e| AppError::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
