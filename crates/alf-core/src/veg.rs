//! Vegetation classes reported in ALFRESCO vegetation counts.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VegClass {
    BlackSpruce,
    WhiteSpruce,
    Deciduous,
    GraminoidTundra,
    ShrubTundra,
    WetlandTundra,
    TemperateRainforest,
    BarrenLichenMoss,
}

impl VegClass {
    /// Every class present in the vegetation counts.
    pub const ALL: [VegClass; 8] = [
        VegClass::BlackSpruce,
        VegClass::WhiteSpruce,
        VegClass::Deciduous,
        VegClass::GraminoidTundra,
        VegClass::ShrubTundra,
        VegClass::WetlandTundra,
        VegClass::TemperateRainforest,
        VegClass::BarrenLichenMoss,
    ];

    /// Classes that get a series in the vegetation chart, in legend order.
    ///
    /// Wetland tundra, temperate rainforest and barren lichen-moss are
    /// declared in the data but never charted.
    pub const CHARTED: [VegClass; 5] = [
        VegClass::BlackSpruce,
        VegClass::WhiteSpruce,
        VegClass::Deciduous,
        VegClass::GraminoidTundra,
        VegClass::ShrubTundra,
    ];

    /// Key used for this class in `veg_counts` and as the series name.
    pub fn label(self) -> &'static str {
        match self {
            VegClass::BlackSpruce => "Black Spruce",
            VegClass::WhiteSpruce => "White Spruce",
            VegClass::Deciduous => "Deciduous",
            VegClass::GraminoidTundra => "Graminoid Tundra",
            VegClass::ShrubTundra => "Shrub Tundra",
            VegClass::WetlandTundra => "Wetland Tundra",
            VegClass::TemperateRainforest => "Temperate Rainforest",
            VegClass::BarrenLichenMoss => "Barren lichen-moss",
        }
    }

    pub fn is_charted(self) -> bool {
        Self::CHARTED.contains(&self)
    }
}

impl FromStr for VegClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownVegClass(s.to_string()))
    }
}

impl fmt::Display for VegClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
