use thiserror::Error;

use crate::ids::Year;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Region not found: {region}")]
    MissingRegion { region: String },

    #[error("Vegetation class '{class}' missing for region {region} in year {year}")]
    MissingVegClass {
        region: String,
        class: String,
        year: Year,
    },

    #[error("Invalid replicate '{value}': {reason}")]
    InvalidReplicate { value: String, reason: &'static str },

    #[error("Unknown plot type: {0}")]
    UnknownPlotType(String),

    #[error("Unknown vegetation class: {0}")]
    UnknownVegClass(String),

    #[error("Invalid record (document {doc_id}): {reason}")]
    InvalidRecord { doc_id: u64, reason: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
