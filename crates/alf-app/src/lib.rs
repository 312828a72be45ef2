//! Shared application service layer for ALFRESCO post-processing charts.
//!
//! This crate sits between a front end (the CLI today) and the stored
//! simulation output: it validates chart requests, loads the record
//! collections a request needs and reshapes them into chart series.

pub mod aggregate;
pub mod catalog;
pub mod chart_service;
pub mod config;
pub mod error;
pub mod export;
pub mod plotly;
pub mod query;
pub mod request;

// Re-export key types for convenience
pub use aggregate::{Aggregator, WindowPolicy, compute_chart};
pub use catalog::{Catalog, OptionDef};
pub use chart_service::{ChartService, render_chart};
pub use config::{DashboardConfig, load_config, save_config};
pub use error::{AppError, AppResult};
pub use export::{ChartDocument, to_csv};
pub use plotly::to_figure;
pub use query::{CollectionSummary, list_regions, summarize_collection};
pub use request::ChartRequest;
