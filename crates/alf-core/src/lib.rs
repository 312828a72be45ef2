//! alf-core: shared vocabulary for ALFRESCO post-processing charts.
//!
//! Contains:
//! - ids (replicate identifiers and years)
//! - region (region keys into per-region mappings)
//! - veg (vegetation classes and which of them are charted)
//! - plot (the three chart modes)
//! - record (typed simulation/historical records, validated at decode time)
//! - chart (chart-ready series and results)
//! - error (shared error types)

pub mod chart;
pub mod error;
pub mod ids;
pub mod plot;
pub mod record;
pub mod region;
pub mod veg;

// Re-exports: nice ergonomics for downstream crates
pub use chart::*;
pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use plot::PlotType;
pub use record::*;
pub use region::Region;
pub use veg::VegClass;
