//! Reshaping of yearly records into chart series.
//!
//! Every mode groups samples into an ordered year map before emitting
//! points, so each series comes out sorted by year with one point per year
//! (a later record for the same year replaces an earlier one).

use std::collections::BTreeMap;

use alf_core::{
    BarMode, ChartResult, ChartSeries, ChartWarning, CoreError, CoreResult, FireSample,
    HistoricalRecord, HoverMode, PlotType, Region, RenderKind, Replicate, SimulationRecord,
    VegClass, VegCounts, Year, YearlyRecord,
};
use serde::{Deserialize, Serialize};

use crate::request::ChartRequest;

/// First year drawn, and the lower bound for cumulative and vegetation data.
pub const FIRST_CHART_YEAR: Year = 1950;
pub const LAST_CHART_YEAR: Year = 2010;

/// Number of leading observed records shown in the annual chart. This is a
/// position window over the collection, not a year filter.
pub const HISTORICAL_ANNUAL_WINDOW: usize = 89;

pub const HISTORICAL_SERIES_NAME: &str = "Historical";
pub const MODELED_COLOR: &str = "#999999";
pub const HISTORICAL_COLOR: &str = "#ff6666";

/// Which records of a collection the cumulative and vegetation charts read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPolicy {
    /// Every record.
    #[default]
    Inclusive,
    /// Leave out the final document of each collection read by the
    /// cumulative and vegetation charts, as the original dashboard's loop
    /// bounds did. The annual chart is unaffected.
    SourceCompatible,
}

impl WindowPolicy {
    fn window<R>(self, records: &[R]) -> &[R] {
        match self {
            WindowPolicy::Inclusive => records,
            WindowPolicy::SourceCompatible => &records[..records.len().saturating_sub(1)],
        }
    }
}

pub fn chart_title(gcm: &str, rcp: &str) -> String {
    format!("AR5 {} {}", gcm, rcp)
}

pub fn replicate_series_name(replicate: Replicate) -> String {
    format!("Replicate: {}", replicate)
}

/// Computes chart data from already-loaded collections. Holds no state
/// between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    policy: WindowPolicy,
}

/// Compute a chart with the default window policy.
pub fn compute_chart(
    request: &ChartRequest,
    modeled: &[SimulationRecord],
    historical: &[HistoricalRecord],
) -> CoreResult<ChartResult> {
    Aggregator::default().compute(request, modeled, historical)
}

impl Aggregator {
    pub fn new(policy: WindowPolicy) -> Self {
        Self { policy }
    }

    /// Build the chart for `request` from collections already scoped to the
    /// request's (gcm, rcp) pair.
    ///
    /// Fails with [`CoreError::MissingRegion`] when a contributing record
    /// has no entry for the requested region. An unknown replicate is not an
    /// error: the modeled series comes back empty and the result carries a
    /// [`ChartWarning::EmptyReplicate`]. The warning is raised whenever none
    /// of the records the mode reads belong to the replicate.
    pub fn compute(
        &self,
        request: &ChartRequest,
        modeled: &[SimulationRecord],
        historical: &[HistoricalRecord],
    ) -> CoreResult<ChartResult> {
        let mut result = match request.plot_type {
            PlotType::AnnualAreaBurned => annual_area_burned(request, modeled, historical)?,
            PlotType::CumulativeAreaBurned => {
                self.cumulative_area_burned(request, modeled, historical)?
            }
            PlotType::Vegetation => self.vegetation(request, modeled)?,
        };

        if !self.replicate_contributes(request, modeled) {
            result.warnings.push(ChartWarning::EmptyReplicate {
                replicate: request.replicate.get(),
            });
        }

        tracing::debug!(
            plot_type = %request.plot_type,
            region = %request.region,
            replicate = %request.replicate,
            series = result.series.len(),
            "computed chart"
        );
        Ok(result)
    }

    /// Whether any record inside the mode's window carries the mode's sample
    /// kind for the requested replicate.
    fn replicate_contributes(&self, request: &ChartRequest, modeled: &[SimulationRecord]) -> bool {
        let read = match request.plot_type {
            PlotType::AnnualAreaBurned => modeled,
            PlotType::CumulativeAreaBurned | PlotType::Vegetation => self.policy.window(modeled),
        };
        read.iter()
            .filter(|r| request.replicate.matches(r.replicate))
            .any(|r| match request.plot_type {
                PlotType::Vegetation => r.veg().is_some(),
                PlotType::AnnualAreaBurned | PlotType::CumulativeAreaBurned => r.fire().is_some(),
            })
    }

    fn cumulative_area_burned(
        &self,
        request: &ChartRequest,
        modeled: &[SimulationRecord],
        historical: &[HistoricalRecord],
    ) -> CoreResult<ChartResult> {
        let historical_by_year = fire_by_year(
            self.policy.window(historical).iter().filter_map(YearlyRecord::fire),
            &request.region,
        )?;
        let modeled_by_year = fire_by_year(
            replicate_fire(self.policy.window(modeled), request.replicate),
            &request.region,
        )?;

        let mut result = ChartResult::new(
            chart_title(&request.gcm, &request.rcp),
            (FIRST_CHART_YEAR, LAST_CHART_YEAR),
        );
        result.series.push(
            ChartSeries::from_points(
                replicate_series_name(request.replicate),
                RenderKind::Line,
                running_total(&modeled_by_year),
            )
            .with_color(MODELED_COLOR),
        );
        result.series.push(
            ChartSeries::from_points(
                HISTORICAL_SERIES_NAME,
                RenderKind::Line,
                running_total(&historical_by_year),
            )
            .with_color(HISTORICAL_COLOR),
        );
        Ok(result)
    }

    fn vegetation(
        &self,
        request: &ChartRequest,
        modeled: &[SimulationRecord],
    ) -> CoreResult<ChartResult> {
        let mut counts_by_year: BTreeMap<Year, &VegCounts> = BTreeMap::new();
        for record in self.policy.window(modeled) {
            if !request.replicate.matches(record.replicate) {
                continue;
            }
            if let Some(sample) = &record.veg {
                counts_by_year.insert(sample.year, sample.counts(&request.region)?);
            }
        }

        let mut series: Vec<ChartSeries> = VegClass::CHARTED
            .iter()
            .map(|class| ChartSeries::new(class.label(), RenderKind::Line))
            .collect();

        for (&year, counts) in counts_by_year.range(FIRST_CHART_YEAR..) {
            for (class, line) in VegClass::CHARTED.iter().zip(series.iter_mut()) {
                let count = counts.get(class.label()).copied().ok_or_else(|| {
                    CoreError::MissingVegClass {
                        region: request.region.to_string(),
                        class: class.label().to_string(),
                        year,
                    }
                })?;
                line.push(year, count);
            }
        }

        let mut result = ChartResult::new(
            chart_title(&request.gcm, &request.rcp),
            (FIRST_CHART_YEAR, LAST_CHART_YEAR),
        );
        result.series = series;
        result.hover_mode = Some(HoverMode::Closest);
        Ok(result)
    }
}

fn annual_area_burned(
    request: &ChartRequest,
    modeled: &[SimulationRecord],
    historical: &[HistoricalRecord],
) -> CoreResult<ChartResult> {
    let historical_by_year = fire_by_year(
        historical
            .iter()
            .take(HISTORICAL_ANNUAL_WINDOW)
            .filter_map(YearlyRecord::fire),
        &request.region,
    )?;
    let modeled_by_year =
        fire_by_year(replicate_fire(modeled, request.replicate), &request.region)?;

    let mut result = ChartResult::new(
        chart_title(&request.gcm, &request.rcp),
        (FIRST_CHART_YEAR, LAST_CHART_YEAR),
    );
    result.series.push(
        ChartSeries::from_points(
            replicate_series_name(request.replicate),
            RenderKind::Bar,
            modeled_by_year,
        )
        .with_color(MODELED_COLOR),
    );
    result.series.push(
        ChartSeries::from_points(HISTORICAL_SERIES_NAME, RenderKind::Bar, historical_by_year)
            .with_color(HISTORICAL_COLOR),
    );
    result.bar_mode = Some(BarMode::Group);
    Ok(result)
}

fn replicate_fire(
    records: &[SimulationRecord],
    replicate: Replicate,
) -> impl Iterator<Item = &FireSample> {
    records
        .iter()
        .filter(move |r| replicate.matches(r.replicate))
        .filter_map(|r| r.fire.as_ref())
}

fn fire_by_year<'a>(
    samples: impl Iterator<Item = &'a FireSample>,
    region: &Region,
) -> CoreResult<BTreeMap<Year, f64>> {
    let mut by_year = BTreeMap::new();
    for sample in samples {
        by_year.insert(sample.year, sample.area(region)?);
    }
    Ok(by_year)
}

/// Running sum over the years from [`FIRST_CHART_YEAR`] on, starting at zero.
fn running_total(by_year: &BTreeMap<Year, f64>) -> Vec<(Year, f64)> {
    let mut total = 0.0;
    by_year
        .range(FIRST_CHART_YEAR..)
        .map(|(&year, &value)| {
            total += value;
            (year, total)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alf_core::{AreaByRegion, VegCountsByRegion};

    fn area(region: &str, value: f64) -> AreaByRegion {
        AreaByRegion::from([(region.to_string(), value)])
    }

    fn request(plot_type: PlotType, replicate: u32) -> ChartRequest {
        ChartRequest {
            plot_type,
            region: Region::new("R"),
            gcm: "GFDL-CM3".to_string(),
            rcp: "rcp60".to_string(),
            replicate: Replicate::new(replicate).unwrap(),
        }
    }

    fn veg_counts(region: &str, base: f64) -> VegCountsByRegion {
        let counts: VegCounts = VegClass::ALL
            .iter()
            .enumerate()
            .map(|(i, class)| (class.label().to_string(), base + i as f64))
            .collect();
        VegCountsByRegion::from([(region.to_string(), counts)])
    }

    #[test]
    fn running_total_starts_at_first_chart_year() {
        let by_year = BTreeMap::from([(1949, 100.0), (1950, 1.0), (1952, 2.0), (1951, 3.0)]);
        assert_eq!(
            running_total(&by_year),
            vec![(1950, 1.0), (1951, 4.0), (1952, 6.0)]
        );
    }

    #[test]
    fn source_compatible_window_drops_last_record() {
        let records = [1, 2, 3];
        assert_eq!(WindowPolicy::SourceCompatible.window(&records), &[1, 2]);
        assert_eq!(WindowPolicy::Inclusive.window(&records), &[1, 2, 3]);
        let empty: [u8; 0] = [];
        assert!(WindowPolicy::SourceCompatible.window(&empty).is_empty());
    }

    #[test]
    fn annual_sorts_years_and_keeps_last_duplicate() {
        let modeled = vec![
            SimulationRecord::with_fire(1, 1952, area("R", 3.0)),
            SimulationRecord::with_fire(1, 1950, area("R", 1.0)),
            SimulationRecord::with_fire(1, 1952, area("R", 4.0)),
        ];
        let result = compute_chart(&request(PlotType::AnnualAreaBurned, 1), &modeled, &[]).unwrap();

        let series = &result.series[0];
        assert_eq!(series.x, vec![1950, 1952]);
        assert_eq!(series.y, vec![1.0, 4.0]);
        assert_eq!(series.render_kind, RenderKind::Bar);
        assert_eq!(result.bar_mode, Some(BarMode::Group));
        assert_eq!(result.title, "AR5 GFDL-CM3 rcp60");
        assert_eq!(result.x_axis_range, (1950, 2010));
    }

    #[test]
    fn annual_does_not_filter_early_years() {
        let modeled = vec![SimulationRecord::with_fire(1, 1901, area("R", 3.0))];
        let historical = vec![HistoricalRecord::with_fire(1930, area("R", 1.0))];
        let result =
            compute_chart(&request(PlotType::AnnualAreaBurned, 1), &modeled, &historical).unwrap();
        assert_eq!(result.series[0].x, vec![1901]);
        assert_eq!(result.series[1].x, vec![1930]);
    }

    #[test]
    fn cumulative_source_compatible_skips_final_documents() {
        let modeled = vec![
            SimulationRecord::with_fire(1, 1950, area("R", 1.0)),
            SimulationRecord::with_fire(1, 1951, area("R", 2.0)),
        ];
        let historical = vec![
            HistoricalRecord::with_fire(1950, area("R", 5.0)),
            HistoricalRecord::with_fire(1951, area("R", 6.0)),
        ];
        let result = Aggregator::new(WindowPolicy::SourceCompatible)
            .compute(
                &request(PlotType::CumulativeAreaBurned, 1),
                &modeled,
                &historical,
            )
            .unwrap();
        assert_eq!(result.series[0].x, vec![1950]);
        assert_eq!(result.series[1].y, vec![5.0]);
    }

    #[test]
    fn warning_follows_the_windowed_records() {
        let modeled = vec![
            SimulationRecord::with_fire(1, 1950, area("R", 1.0)),
            SimulationRecord::with_fire(2, 1950, area("R", 2.0)),
        ];
        let aggregator = Aggregator::new(WindowPolicy::SourceCompatible);

        let cumulative = aggregator
            .compute(&request(PlotType::CumulativeAreaBurned, 2), &modeled, &[])
            .unwrap();
        assert!(cumulative.series[0].is_empty());
        assert_eq!(
            cumulative.warnings,
            vec![ChartWarning::EmptyReplicate { replicate: 2 }]
        );

        let annual = aggregator
            .compute(&request(PlotType::AnnualAreaBurned, 2), &modeled, &[])
            .unwrap();
        assert_eq!(annual.series[0].y, vec![2.0]);
        assert!(annual.warnings.is_empty());
    }

    #[test]
    fn fire_chart_warns_when_replicate_has_only_vegetation() {
        let modeled = vec![
            SimulationRecord::with_fire(1, 1950, area("R", 1.0)),
            SimulationRecord::with_veg(2, 1950, veg_counts("R", 1.0)),
        ];
        let fire = compute_chart(&request(PlotType::AnnualAreaBurned, 2), &modeled, &[]).unwrap();
        assert_eq!(
            fire.warnings,
            vec![ChartWarning::EmptyReplicate { replicate: 2 }]
        );

        let veg = compute_chart(&request(PlotType::Vegetation, 2), &modeled, &[]).unwrap();
        assert!(veg.warnings.is_empty());
        assert_eq!(veg.series[0].x, vec![1950]);
    }

    #[test]
    fn annual_ignores_window_policy() {
        let modeled = vec![
            SimulationRecord::with_fire(1, 1950, area("R", 1.0)),
            SimulationRecord::with_fire(1, 1951, area("R", 2.0)),
        ];
        let result = Aggregator::new(WindowPolicy::SourceCompatible)
            .compute(&request(PlotType::AnnualAreaBurned, 1), &modeled, &[])
            .unwrap();
        assert_eq!(result.series[0].len(), 2);
    }

    #[test]
    fn vegetation_emits_one_line_per_charted_class() {
        let modeled = vec![
            SimulationRecord::with_veg(1, 1951, veg_counts("R", 10.0)),
            SimulationRecord::with_veg(1, 1949, veg_counts("R", 0.0)),
            SimulationRecord::with_veg(1, 1950, veg_counts("R", 20.0)),
            SimulationRecord::with_veg(2, 1952, veg_counts("R", 30.0)),
        ];
        let result = compute_chart(&request(PlotType::Vegetation, 1), &modeled, &[]).unwrap();

        let names: Vec<_> = result.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Black Spruce",
                "White Spruce",
                "Deciduous",
                "Graminoid Tundra",
                "Shrub Tundra"
            ]
        );
        for series in &result.series {
            assert_eq!(series.x, vec![1950, 1951]);
            assert_eq!(series.render_kind, RenderKind::Line);
        }
        assert_eq!(result.series[0].y, vec![20.0, 10.0]);
        assert_eq!(result.series[2].y, vec![22.0, 12.0]);
        assert_eq!(result.hover_mode, Some(HoverMode::Closest));
    }

    #[test]
    fn vegetation_missing_class_is_an_error() {
        let mut counts = veg_counts("R", 0.0);
        counts.get_mut("R").unwrap().remove("Deciduous");
        let modeled = vec![SimulationRecord::with_veg(1, 1960, counts)];
        let err = compute_chart(&request(PlotType::Vegetation, 1), &modeled, &[]).unwrap_err();
        assert!(matches!(
            err,
            CoreError::MissingVegClass { year: 1960, ref class, .. } if class == "Deciduous"
        ));
    }

    #[test]
    fn fire_modes_skip_vegetation_only_records() {
        let modeled = vec![
            SimulationRecord::with_veg(1, 1950, veg_counts("Other", 1.0)),
            SimulationRecord::with_fire(1, 1950, area("R", 7.0)),
        ];
        let result =
            compute_chart(&request(PlotType::CumulativeAreaBurned, 1), &modeled, &[]).unwrap();
        assert_eq!(result.series[0].y, vec![7.0]);
    }

    #[test]
    fn unknown_replicate_yields_warning_not_error() {
        let modeled = vec![SimulationRecord::with_fire(1, 1950, area("R", 7.0))];
        let result =
            compute_chart(&request(PlotType::CumulativeAreaBurned, 5), &modeled, &[]).unwrap();
        assert!(result.is_empty());
        assert_eq!(
            result.warnings,
            vec![ChartWarning::EmptyReplicate { replicate: 5 }]
        );
    }

    #[test]
    fn region_of_other_replicates_is_never_read() {
        let modeled = vec![
            SimulationRecord::with_fire(1, 1950, area("R", 1.0)),
            SimulationRecord::with_fire(2, 1950, area("Elsewhere", 1.0)),
        ];
        assert!(compute_chart(&request(PlotType::AnnualAreaBurned, 1), &modeled, &[]).is_ok());
        assert!(compute_chart(&request(PlotType::AnnualAreaBurned, 2), &modeled, &[]).is_err());
    }
}
