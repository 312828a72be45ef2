//! Chart-ready output handed to a front end.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::Year;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
    Closest,
}

/// One named x/y series. `x` and `y` always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub x: Vec<Year>,
    pub y: Vec<f64>,
    pub render_kind: RenderKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ChartSeries {
    pub fn new(name: impl Into<String>, render_kind: RenderKind) -> Self {
        Self {
            name: name.into(),
            x: Vec::new(),
            y: Vec::new(),
            render_kind,
            color: None,
        }
    }

    pub fn from_points<I>(name: impl Into<String>, render_kind: RenderKind, points: I) -> Self
    where
        I: IntoIterator<Item = (Year, f64)>,
    {
        let mut series = Self::new(name, render_kind);
        for (year, value) in points {
            series.push(year, value);
        }
        series
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn push(&mut self, year: Year, value: f64) {
        self.x.push(year);
        self.y.push(value);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (Year, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Non-fatal conditions the caller may want to surface as "no data".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartWarning {
    /// No modeled record matched the requested replicate.
    EmptyReplicate { replicate: u32 },
}

impl fmt::Display for ChartWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartWarning::EmptyReplicate { replicate } => {
                write!(f, "no modeled records for replicate {}", replicate)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    pub title: String,
    pub x_axis_range: (Year, Year),
    pub series: Vec<ChartSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_mode: Option<BarMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_mode: Option<HoverMode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ChartWarning>,
}

impl ChartResult {
    pub fn new(title: impl Into<String>, x_axis_range: (Year, Year)) -> Self {
        Self {
            title: title.into(),
            x_axis_range,
            series: Vec::new(),
            bar_mode: None,
            hover_mode: None,
            warnings: Vec::new(),
        }
    }

    /// True when no series carries a single point.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(ChartSeries::is_empty)
    }

    pub fn series_named(&self, name: &str) -> Option<&ChartSeries> {
        self.series.iter().find(|s| s.name == name)
    }
}
