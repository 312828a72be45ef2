//! Query helpers for inspecting loaded collections.

use std::collections::BTreeSet;

use alf_core::{SimulationRecord, Year};

use crate::error::{AppError, AppResult};

/// Summary of a modeled collection's contents.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSummary {
    pub record_count: usize,
    pub fire_record_count: usize,
    pub veg_record_count: usize,
    pub replicates: BTreeSet<u32>,
    pub fire_year_range: Option<(Year, Year)>,
    pub veg_year_range: Option<(Year, Year)>,
}

fn extend_range(range: &mut Option<(Year, Year)>, year: Year) {
    *range = Some(match *range {
        Some((lo, hi)) => (lo.min(year), hi.max(year)),
        None => (year, year),
    });
}

/// Get a summary of a modeled collection.
pub fn summarize_collection(records: &[SimulationRecord]) -> AppResult<CollectionSummary> {
    if records.is_empty() {
        return Err(AppError::InvalidInput("No records in collection".to_string()));
    }

    let mut summary = CollectionSummary {
        record_count: records.len(),
        fire_record_count: 0,
        veg_record_count: 0,
        replicates: BTreeSet::new(),
        fire_year_range: None,
        veg_year_range: None,
    };

    for record in records {
        summary.replicates.insert(record.replicate);
        if let Some(fire) = &record.fire {
            summary.fire_record_count += 1;
            extend_range(&mut summary.fire_year_range, fire.year);
        }
        if let Some(veg) = &record.veg {
            summary.veg_record_count += 1;
            extend_range(&mut summary.veg_year_range, veg.year);
        }
    }

    Ok(summary)
}

/// List every region named in a collection's fire or vegetation mappings.
pub fn list_regions(records: &[SimulationRecord]) -> Vec<String> {
    let mut regions = BTreeSet::new();
    for record in records {
        if let Some(fire) = &record.fire {
            regions.extend(fire.area_by_region.keys().cloned());
        }
        if let Some(veg) = &record.veg {
            regions.extend(veg.counts_by_region.keys().cloned());
        }
    }
    regions.into_iter().collect()
}
