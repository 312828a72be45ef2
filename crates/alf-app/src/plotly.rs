//! Plotly figure export.
//!
//! Produces the `{ "data": [...], "layout": {...} }` document a Plotly front
//! end renders directly.

use alf_core::{BarMode, ChartResult, ChartSeries, HoverMode, RenderKind};
use serde_json::{Map, Value, json};

fn trace(series: &ChartSeries) -> Value {
    let kind = match series.render_kind {
        RenderKind::Bar => "bar",
        RenderKind::Line => "scatter",
    };

    let mut trace = json!({
        "x": series.x,
        "y": series.y,
        "type": kind,
        "name": series.name,
    });
    if series.render_kind == RenderKind::Line {
        trace["mode"] = json!("lines");
    }
    if let Some(color) = &series.color {
        trace["marker"] = json!({ "color": color });
    }
    trace
}

pub fn to_figure(chart: &ChartResult) -> Value {
    let mut layout = Map::new();
    layout.insert("title".to_string(), json!(chart.title));
    layout.insert(
        "xaxis".to_string(),
        json!({ "range": [chart.x_axis_range.0, chart.x_axis_range.1] }),
    );
    if let Some(BarMode::Group) = chart.bar_mode {
        layout.insert("barmode".to_string(), json!("group"));
    }
    if let Some(HoverMode::Closest) = chart.hover_mode {
        layout.insert("hovermode".to_string(), json!("closest"));
    }

    json!({
        "data": chart.series.iter().map(trace).collect::<Vec<_>>(),
        "layout": Value::Object(layout),
    })
}
