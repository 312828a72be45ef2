use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The three chart modes offered by the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotType {
    /// Burned area per year, modeled replicate against observed history.
    #[default]
    #[serde(rename = "AAB")]
    AnnualAreaBurned,
    /// Running total of burned area from 1950 on.
    #[serde(rename = "CAB")]
    CumulativeAreaBurned,
    /// Vegetation counts per class over time.
    #[serde(rename = "VEG")]
    Vegetation,
}

impl PlotType {
    pub const ALL: [PlotType; 3] = [
        PlotType::AnnualAreaBurned,
        PlotType::CumulativeAreaBurned,
        PlotType::Vegetation,
    ];

    /// Short code used in configuration and on the command line.
    pub fn code(self) -> &'static str {
        match self {
            PlotType::AnnualAreaBurned => "AAB",
            PlotType::CumulativeAreaBurned => "CAB",
            PlotType::Vegetation => "VEG",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlotType::AnnualAreaBurned => "Annual Area Burned",
            PlotType::CumulativeAreaBurned => "Cumulative Area Burned",
            PlotType::Vegetation => "Vegetation",
        }
    }

    /// Whether the observed collection takes part in this chart.
    pub fn uses_historical(self) -> bool {
        !matches!(self, PlotType::Vegetation)
    }
}

impl FromStr for PlotType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "aab" | "annual" | "annual-area-burned" => Ok(PlotType::AnnualAreaBurned),
            "cab" | "cumulative" | "cumulative-area-burned" => Ok(PlotType::CumulativeAreaBurned),
            "veg" | "vegetation" => Ok(PlotType::Vegetation),
            _ => Err(CoreError::UnknownPlotType(s.to_string())),
        }
    }
}

impl fmt::Display for PlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
