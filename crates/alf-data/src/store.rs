//! Record storage API.

use std::fs;
use std::path::{Path, PathBuf};

use alf_core::{HistoricalRecord, SimulationRecord};

use crate::collection::{decode_historical, decode_modeled};
use crate::scenario::ScenarioKey;
use crate::{DataError, DataResult};

pub const DEFAULT_PREFIX: &str = "AR5_2015";
pub const DEFAULT_HISTORICAL_NAME: &str = "Observed";

/// Anything able to hand over the two record collections a chart needs.
///
/// Collections are read fresh on every call.
pub trait RecordSource {
    fn load_modeled(&self, scenario: &ScenarioKey) -> DataResult<Vec<SimulationRecord>>;
    fn load_historical(&self) -> DataResult<Vec<HistoricalRecord>>;
}

/// Directory of exported collections, one file per scenario plus one
/// observed file.
#[derive(Debug, Clone)]
pub struct DataStore {
    root_dir: PathBuf,
    prefix: String,
    historical_name: String,
}

impl DataStore {
    pub fn new(root_dir: PathBuf) -> DataResult<Self> {
        if !root_dir.is_dir() {
            return Err(DataError::DataDirNotFound { path: root_dir });
        }
        Ok(Self {
            root_dir,
            prefix: DEFAULT_PREFIX.to_string(),
            historical_name: DEFAULT_HISTORICAL_NAME.to_string(),
        })
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_historical_name(mut self, name: impl Into<String>) -> Self {
        self.historical_name = name.into();
        self
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn modeled_path(&self, scenario: &ScenarioKey) -> PathBuf {
        self.root_dir.join(scenario.file_name(&self.prefix))
    }

    pub fn historical_path(&self) -> PathBuf {
        self.root_dir
            .join(format!("{}_{}.json", self.prefix, self.historical_name))
    }

    pub fn has_scenario(&self, scenario: &ScenarioKey) -> bool {
        self.modeled_path(scenario).is_file()
    }

    /// Scenarios with a collection file in the data directory, sorted.
    pub fn list_scenarios(&self) -> DataResult<Vec<ScenarioKey>> {
        let entries = fs::read_dir(&self.root_dir).map_err(|e| DataError::Io {
            path: self.root_dir.clone(),
            source: e,
        })?;

        let mut scenarios = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DataError::Io {
                path: self.root_dir.clone(),
                source: e,
            })?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if let Some(key) = ScenarioKey::from_file_name(&self.prefix, &file_name) {
                if key.rcp != self.historical_name && entry.path().is_file() {
                    scenarios.push(key);
                }
            }
        }

        scenarios.sort();
        Ok(scenarios)
    }

    fn read(path: &Path) -> DataResult<String> {
        fs::read_to_string(path).map_err(|e| DataError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

impl RecordSource for DataStore {
    fn load_modeled(&self, scenario: &ScenarioKey) -> DataResult<Vec<SimulationRecord>> {
        let path = self.modeled_path(scenario);
        if !path.is_file() {
            return Err(DataError::UnresolvedScenario {
                gcm: scenario.gcm.clone(),
                rcp: scenario.rcp.clone(),
                path,
            });
        }

        let content = Self::read(&path)?;
        let records = decode_modeled(&path, &content)?;
        tracing::debug!(
            scenario = %scenario,
            path = %path.display(),
            records = records.len(),
            "loaded modeled collection"
        );
        Ok(records)
    }

    fn load_historical(&self) -> DataResult<Vec<HistoricalRecord>> {
        let path = self.historical_path();
        if !path.is_file() {
            return Err(DataError::HistoricalNotFound { path });
        }

        let content = Self::read(&path)?;
        let records = decode_historical(&path, &content)?;
        tracing::debug!(
            path = %path.display(),
            records = records.len(),
            "loaded historical collection"
        );
        Ok(records)
    }
}
