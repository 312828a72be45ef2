//! Chart execution: load the collections a request needs and aggregate them.

use alf_core::ChartResult;
use alf_data::{DataStore, RecordSource};

use crate::aggregate::{Aggregator, WindowPolicy};
use crate::catalog::Catalog;
use crate::config::DashboardConfig;
use crate::error::AppResult;
use crate::request::ChartRequest;

/// Load and aggregate without catalog validation.
///
/// Both collections are read fresh from `source`. The observed collection is
/// only read for the modes that draw it. Loader errors are returned as they
/// come.
pub fn render_chart<S: RecordSource + ?Sized>(
    source: &S,
    request: &ChartRequest,
    policy: WindowPolicy,
) -> AppResult<ChartResult> {
    let scenario = request.scenario();
    tracing::debug!(
        scenario = %scenario,
        plot_type = %request.plot_type,
        "rendering chart"
    );

    let modeled = source.load_modeled(&scenario)?;
    let historical = if request.plot_type.uses_historical() {
        source.load_historical()?
    } else {
        Vec::new()
    };

    let chart = Aggregator::new(policy).compute(request, &modeled, &historical)?;
    for warning in &chart.warnings {
        tracing::warn!(scenario = %scenario, "{}", warning);
    }
    Ok(chart)
}

/// A record source plus the options and policy requests are checked
/// against.
pub struct ChartService<S> {
    source: S,
    catalog: Catalog,
    policy: WindowPolicy,
}

impl ChartService<DataStore> {
    pub fn from_config(config: &DashboardConfig) -> AppResult<Self> {
        Ok(Self::new(
            config.open_store()?,
            config.catalog.clone(),
            config.window_policy,
        ))
    }
}

impl<S: RecordSource> ChartService<S> {
    pub fn new(source: S, catalog: Catalog, policy: WindowPolicy) -> Self {
        Self {
            source,
            catalog,
            policy,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Validate `request` at the boundary, then render it.
    pub fn render(&self, request: &ChartRequest) -> AppResult<ChartResult> {
        request.validate(&self.catalog)?;
        render_chart(&self.source, request, self.policy)
    }
}
