//! Typed simulation and historical records.
//!
//! Records arrive as loosely shaped JSON documents. [`RawRecord`] mirrors the
//! stored modeled layout and [`RawObservation`] the observed one, which has no
//! replicate. [`SimulationRecord::from_raw`] and [`HistoricalRecord::from_raw`]
//! check them once at load time so the chart code only ever sees well-formed
//! fire and vegetation samples.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::ids::Year;
use crate::region::Region;

/// Burned area keyed by region name.
pub type AreaByRegion = BTreeMap<String, f64>;

/// Counts keyed by vegetation class label.
pub type VegCounts = BTreeMap<String, f64>;

/// Vegetation counts keyed by region name.
pub type VegCountsByRegion = BTreeMap<String, VegCounts>;

/// Stored modeled document layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(
        default,
        deserialize_with = "deserialize_replicate",
        skip_serializing_if = "Option::is_none"
    )]
    pub replicate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fire_year: Option<Year>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub av_year: Option<Year>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_area_burned: Option<AreaByRegion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veg_counts: Option<VegCountsByRegion>,
}

/// Stored observed document layout. Any `replicate` field is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fire_year: Option<Year>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub av_year: Option<Year>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_area_burned: Option<AreaByRegion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veg_counts: Option<VegCountsByRegion>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReplicateRepr {
    Number(u32),
    Text(String),
}

// The exporter writes replicate ids either as numbers or as numeric strings.
fn deserialize_replicate<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<ReplicateRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(ReplicateRepr::Number(value)) => Ok(Some(value)),
        Some(ReplicateRepr::Text(text)) => text
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid replicate '{}'", text))),
    }
}

/// Burned area for one fire year.
#[derive(Debug, Clone, PartialEq)]
pub struct FireSample {
    pub year: Year,
    pub area_by_region: AreaByRegion,
}

impl FireSample {
    pub fn area(&self, region: &Region) -> CoreResult<f64> {
        self.area_by_region
            .get(region.as_str())
            .copied()
            .ok_or_else(|| CoreError::MissingRegion {
                region: region.to_string(),
            })
    }
}

/// Vegetation counts for one vegetation year.
#[derive(Debug, Clone, PartialEq)]
pub struct VegSample {
    pub year: Year,
    pub counts_by_region: VegCountsByRegion,
}

impl VegSample {
    pub fn counts(&self, region: &Region) -> CoreResult<&VegCounts> {
        self.counts_by_region
            .get(region.as_str())
            .ok_or_else(|| CoreError::MissingRegion {
                region: region.to_string(),
            })
    }
}

/// Access shared by modeled and observed records.
pub trait YearlyRecord {
    fn fire(&self) -> Option<&FireSample>;
    fn veg(&self) -> Option<&VegSample>;
}

/// One row of modeled output for a (model, scenario) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRecord {
    pub replicate: u32,
    pub fire: Option<FireSample>,
    pub veg: Option<VegSample>,
}

impl SimulationRecord {
    pub fn from_raw(doc_id: u64, raw: RawRecord) -> CoreResult<Self> {
        let replicate = raw.replicate.ok_or_else(|| CoreError::InvalidRecord {
            doc_id,
            reason: "modeled record has no replicate".to_string(),
        })?;
        let samples = RawObservation {
            fire_year: raw.fire_year,
            av_year: raw.av_year,
            total_area_burned: raw.total_area_burned,
            veg_counts: raw.veg_counts,
        };
        let (fire, veg) = split_samples(doc_id, samples)?;
        Ok(Self {
            replicate,
            fire,
            veg,
        })
    }

    pub fn with_fire(replicate: u32, year: Year, area_by_region: AreaByRegion) -> Self {
        Self {
            replicate,
            fire: Some(FireSample {
                year,
                area_by_region,
            }),
            veg: None,
        }
    }

    pub fn with_veg(replicate: u32, year: Year, counts_by_region: VegCountsByRegion) -> Self {
        Self {
            replicate,
            fire: None,
            veg: Some(VegSample {
                year,
                counts_by_region,
            }),
        }
    }
}

impl YearlyRecord for SimulationRecord {
    fn fire(&self) -> Option<&FireSample> {
        self.fire.as_ref()
    }

    fn veg(&self) -> Option<&VegSample> {
        self.veg.as_ref()
    }
}

/// One row of observed data. Observed data has no replicate.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRecord {
    pub fire: Option<FireSample>,
    pub veg: Option<VegSample>,
}

impl HistoricalRecord {
    pub fn from_raw(doc_id: u64, raw: RawObservation) -> CoreResult<Self> {
        let (fire, veg) = split_samples(doc_id, raw)?;
        Ok(Self { fire, veg })
    }

    pub fn with_fire(year: Year, area_by_region: AreaByRegion) -> Self {
        Self {
            fire: Some(FireSample {
                year,
                area_by_region,
            }),
            veg: None,
        }
    }
}

impl YearlyRecord for HistoricalRecord {
    fn fire(&self) -> Option<&FireSample> {
        self.fire.as_ref()
    }

    fn veg(&self) -> Option<&VegSample> {
        self.veg.as_ref()
    }
}

fn split_samples(
    doc_id: u64,
    raw: RawObservation,
) -> CoreResult<(Option<FireSample>, Option<VegSample>)> {
    let invalid = |reason: &str| CoreError::InvalidRecord {
        doc_id,
        reason: reason.to_string(),
    };

    let fire = match (raw.fire_year, raw.total_area_burned) {
        (Some(year), Some(area_by_region)) => Some(FireSample {
            year,
            area_by_region,
        }),
        (None, None) => None,
        (Some(_), None) => return Err(invalid("fire_year without total_area_burned")),
        (None, Some(_)) => return Err(invalid("total_area_burned without fire_year")),
    };

    let veg = match (raw.av_year, raw.veg_counts) {
        (Some(year), Some(counts_by_region)) => Some(VegSample {
            year,
            counts_by_region,
        }),
        (None, None) => None,
        (Some(_), None) => return Err(invalid("av_year without veg_counts")),
        (None, Some(_)) => return Err(invalid("veg_counts without av_year")),
    };

    if fire.is_none() && veg.is_none() {
        return Err(invalid("record has neither fire nor vegetation data"));
    }

    Ok((fire, veg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw<T: serde::de::DeserializeOwned>(json: &str) -> T {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn replicate_accepts_numeric_strings() {
        let record = SimulationRecord::from_raw(
            1,
            raw(r#"{"replicate": "12", "fire_year": 1990, "total_area_burned": {"R": 3.5}}"#),
        )
        .unwrap();
        assert_eq!(record.replicate, 12);
        assert_eq!(record.fire.as_ref().unwrap().year, 1990);
        assert!(record.veg.is_none());
    }

    #[test]
    fn replicate_rejects_garbage() {
        let result = serde_json::from_str::<RawRecord>(r#"{"replicate": "one"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn observed_record_ignores_replicate_field() {
        let record = HistoricalRecord::from_raw(
            1,
            raw(r#"{"replicate": "observed", "fire_year": 1950, "total_area_burned": {"R": 2.0}}"#),
        )
        .unwrap();
        assert_eq!(record.fire.as_ref().unwrap().year, 1950);
    }

    #[test]
    fn modeled_record_requires_replicate() {
        let err = SimulationRecord::from_raw(
            4,
            raw(r#"{"fire_year": 1990, "total_area_burned": {"R": 1.0}}"#),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidRecord { doc_id: 4, .. }));
    }

    #[test]
    fn year_and_mapping_must_pair_up() {
        let err = HistoricalRecord::from_raw(2, raw(r#"{"fire_year": 1990}"#)).unwrap_err();
        assert!(err.to_string().contains("fire_year without total_area_burned"));

        let err = HistoricalRecord::from_raw(3, raw(r#"{"veg_counts": {"R": {}}}"#)).unwrap_err();
        assert!(err.to_string().contains("veg_counts without av_year"));
    }

    #[test]
    fn empty_record_is_rejected() {
        let err = HistoricalRecord::from_raw(9, raw(r#"{"replicate": 1}"#)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRecord { doc_id: 9, .. }));
    }

    #[test]
    fn both_kinds_can_share_a_record() {
        let record = SimulationRecord::from_raw(
            1,
            raw(r#"{
                "replicate": 1,
                "fire_year": 1960, "total_area_burned": {"R": 1.0},
                "av_year": 1960, "veg_counts": {"R": {"Deciduous": 4.0}}
            }"#),
        )
        .unwrap();
        assert!(record.fire.is_some());
        assert_eq!(
            record.veg.as_ref().unwrap().counts(&Region::new("R")).unwrap()["Deciduous"],
            4.0
        );
    }

    #[test]
    fn region_lookup_names_the_region() {
        let sample = FireSample {
            year: 2000,
            area_by_region: AreaByRegion::from([("R".to_string(), 1.0)]),
        };
        let err = sample.area(&Region::new("Z")).unwrap_err();
        assert_eq!(
            err,
            CoreError::MissingRegion {
                region: "Z".to_string()
            }
        );
    }
}
