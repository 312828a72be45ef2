//! Chart export formats.

use alf_core::ChartResult;
use serde::Serialize;

use crate::request::ChartRequest;

/// A computed chart together with the request that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct ChartDocument<'a> {
    pub generated_at: String,
    pub request: &'a ChartRequest,
    pub chart: &'a ChartResult,
}

impl<'a> ChartDocument<'a> {
    pub fn new(request: &'a ChartRequest, chart: &'a ChartResult) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            request,
            chart,
        }
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Flatten every series into `series,year,value` rows.
pub fn to_csv(chart: &ChartResult) -> String {
    let mut csv = String::from("series,year,value\n");
    for series in &chart.series {
        let name = csv_field(&series.name);
        for (year, value) in series.points() {
            csv.push_str(&format!("{},{},{}\n", name, year, value));
        }
    }
    csv
}
