//! alf-data: reader for exported ALFRESCO record collections.

pub mod collection;
pub mod scenario;
pub mod store;

pub use collection::{decode_historical, decode_modeled};
pub use scenario::ScenarioKey;
pub use store::{DataStore, RecordSource};

use std::path::PathBuf;

pub type DataResult<T> = Result<T, DataError>;

#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("Failed to read {path}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed collection {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid record in {path}: {source}")]
    Record {
        path: PathBuf,
        source: alf_core::CoreError,
    },

    #[error("No data for scenario {gcm} / {rcp} (expected {path})")]
    UnresolvedScenario {
        gcm: String,
        rcp: String,
        path: PathBuf,
    },

    #[error("Historical data not found: {path}")]
    HistoricalNotFound { path: PathBuf },

    #[error("Data directory not found: {path}")]
    DataDirNotFound { path: PathBuf },
}
