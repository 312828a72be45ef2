//! Decoding of document-table exports.
//!
//! A collection file is a single JSON object holding one table, `_default`,
//! which maps decimal document ids to records:
//!
//! ```json
//! {"_default": {"1": {"replicate": 1, "fire_year": 1950, "total_area_burned": {"AIEM_Domain": 12.0}}}}
//! ```
//!
//! Records come back in ascending numeric document id order.

use std::collections::BTreeMap;
use std::path::Path;

use alf_core::{CoreResult, HistoricalRecord, SimulationRecord};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{DataError, DataResult};

#[derive(Deserialize)]
struct TableFile<D> {
    #[serde(rename = "_default", default = "BTreeMap::new")]
    documents: BTreeMap<u64, D>,
}

fn decode_with<D: DeserializeOwned, R>(
    source: &Path,
    content: &str,
    convert: impl Fn(u64, D) -> CoreResult<R>,
) -> DataResult<Vec<R>> {
    let table: TableFile<D> = serde_json::from_str(content).map_err(|e| DataError::Json {
        path: source.to_path_buf(),
        source: e,
    })?;

    table
        .documents
        .into_iter()
        .map(|(doc_id, raw)| convert(doc_id, raw))
        .collect::<CoreResult<Vec<R>>>()
        .map_err(|e| DataError::Record {
            path: source.to_path_buf(),
            source: e,
        })
}

/// Decode a modeled collection. `source` only labels errors.
pub fn decode_modeled(source: &Path, content: &str) -> DataResult<Vec<SimulationRecord>> {
    decode_with(source, content, SimulationRecord::from_raw)
}

/// Decode the observed collection. `source` only labels errors.
pub fn decode_historical(source: &Path, content: &str) -> DataResult<Vec<HistoricalRecord>> {
    decode_with(source, content, HistoricalRecord::from_raw)
}
