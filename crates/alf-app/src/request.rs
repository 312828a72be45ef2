//! Chart requests: the parameter set a front end collects from its
//! selectors.

use alf_core::{PlotType, Region, Replicate};
use alf_data::ScenarioKey;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{AppError, AppResult};

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartRequest {
    pub plot_type: PlotType,
    pub region: Region,
    pub gcm: String,
    pub rcp: String,
    pub replicate: Replicate,
}

impl Default for ChartRequest {
    fn default() -> Self {
        Self {
            plot_type: PlotType::AnnualAreaBurned,
            region: Region::default(),
            gcm: "GFDL-CM3".to_string(),
            rcp: "rcp60".to_string(),
            replicate: Replicate::default(),
        }
    }
}

impl ChartRequest {
    pub fn scenario(&self) -> ScenarioKey {
        ScenarioKey::new(&self.gcm, &self.rcp)
    }

    /// Check the request against the selectable options.
    ///
    /// Regions are not checked here: the data decides which regions exist
    /// and a missing one surfaces as a lookup error while aggregating.
    pub fn validate(&self, catalog: &Catalog) -> AppResult<()> {
        if !catalog.replicates().contains(&self.replicate.get()) {
            return Err(AppError::InvalidInput(format!(
                "replicate {} outside 1..={}",
                self.replicate, catalog.max_replicate
            )));
        }

        if !catalog.has_gcm(&self.gcm) {
            return Err(AppError::InvalidInput(format!(
                "unknown climate model: {}",
                self.gcm
            )));
        }

        if !catalog.has_rcp(&self.rcp) {
            return Err(AppError::InvalidInput(format!(
                "unknown emissions scenario: {}",
                self.rcp
            )));
        }

        Ok(())
    }
}
