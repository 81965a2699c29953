//! Riskscope core library - climate risk scoring, NGFS scenario projection
//! and financial impact estimation

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Records and scenario series are read-only inputs
// - No global mutable state, no caching, no threads or async
// - Missing data resolves to a documented default, never an error
// - Identical input yields byte-for-byte identical output

pub mod config;
pub mod framework;
pub mod impact;
pub mod opportunity;
pub mod projection;
pub mod record;
pub mod report;
pub mod risk;
pub mod scenario;
pub mod summary;

pub use config::ResolvedConfig;
pub use framework::{read_score, resolve_metrics, score_or_zero, Framework, MetricKey};
pub use impact::{assessment_impacts, standalone_impacts, ImpactRow};
pub use opportunity::is_high_value;
pub use projection::{lookup_score, parse_projections, HeatMap, ProjectionTable};
pub use record::{Category, RiskRecord};
pub use report::{build_record_reports, RecordReport};
pub use risk::{classify_level, heat_tier, HeatTier, RiskLevel};
pub use scenario::{ScenarioDataPoint, ScenarioMetric, ScenarioSeries};
pub use summary::PortfolioSummary;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Everything derived from a record set under one framework
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub framework: Framework,
    pub records: Vec<RecordReport>,
    pub summary: PortfolioSummary,
    pub heat_maps: Vec<HeatMap>,
}

/// Score a record set
pub fn assess(records: &[RiskRecord], framework: Framework) -> Assessment {
    Assessment {
        framework,
        records: build_record_reports(records, framework),
        summary: summary::summarize(records, framework),
        heat_maps: projection::build_heat_maps(records),
    }
}

/// Impact rows for the configured scenario selection
///
/// With `records` the estimate runs in assessment mode, otherwise in
/// standalone mode from the configured organization profile. Rows come back
/// sorted by impact.
pub fn estimate_impacts(
    points: &[ScenarioDataPoint],
    records: Option<&[RiskRecord]>,
    config: &ResolvedConfig,
) -> Vec<ImpactRow> {
    let series = scenario::select_series(points, &config.scenario, &config.model);
    let rows = match records {
        Some(records) => assessment_impacts(
            records,
            &series,
            config.horizon,
            config.metric,
            &config.assumptions,
        ),
        None => standalone_impacts(
            &series,
            config.horizon,
            config.metric,
            &config.organization,
            &config.assumptions,
        ),
    };
    report::sort_impacts(rows)
}

/// Load a JSON array of risk records
pub fn load_records(path: &Path) -> Result<Vec<RiskRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read records: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse records: {}", path.display()))
}

/// Load a JSON array of scenario data points
pub fn load_scenario_points(path: &Path) -> Result<Vec<ScenarioDataPoint>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario data: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse scenario data: {}", path.display()))
}
