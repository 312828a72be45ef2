//! Selectable options offered to the user.

use std::ops::RangeInclusive;

use alf_core::PlotType;
use serde::{Deserialize, Serialize};

/// A labelled choice, as shown in a selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDef {
    pub label: String,
    pub value: String,
}

impl OptionDef {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub regions: Vec<OptionDef>,
    pub gcms: Vec<OptionDef>,
    pub rcps: Vec<OptionDef>,
    pub max_replicate: u32,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            regions: vec![
                OptionDef::new(
                    "Northwestern Interior Forest LCC",
                    "Northwestern_Interior_Forest_LCC",
                ),
                OptionDef::new("Western Alaska LCC", "Western_Alaska_LCC"),
                OptionDef::new("AIEM Domain", "AIEM_Domain"),
                OptionDef::new("Arctic LCC", "Arctic_LCC"),
                OptionDef::new("North Pacific LCC", "North_Pacific_LCC"),
            ],
            gcms: ["GFDL-CM3", "GISS-E2-R", "IPSL-CM5A-LR", "MRI-CGCM3", "NCAR-CCSM4"]
                .into_iter()
                .map(|gcm| OptionDef::new(gcm, gcm))
                .collect(),
            rcps: vec![
                OptionDef::new("RCP 4.5", "rcp45"),
                OptionDef::new("RCP 6.0", "rcp60"),
                OptionDef::new("RCP 8.5", "rcp85"),
            ],
            max_replicate: 199,
        }
    }
}

impl Catalog {
    pub fn plot_types() -> Vec<OptionDef> {
        PlotType::ALL
            .into_iter()
            .map(|p| OptionDef::new(p.label(), p.code()))
            .collect()
    }

    pub fn replicates(&self) -> RangeInclusive<u32> {
        1..=self.max_replicate
    }

    pub fn has_gcm(&self, value: &str) -> bool {
        self.gcms.iter().any(|o| o.value == value)
    }

    pub fn has_rcp(&self, value: &str) -> bool {
        self.rcps.iter().any(|o| o.value == value)
    }

    pub fn region_label(&self, value: &str) -> Option<&str> {
        self.regions
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}
