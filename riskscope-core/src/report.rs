//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output across runs

use crate::config::ResolvedConfig;
use crate::framework::{read_metrics, Framework, MetricValue};
use crate::impact::{has_standalone_formula, ImpactRow};
use crate::opportunity::is_high_value;
use crate::projection::HeatMap;
use crate::record::{category_title, RiskRecord};
use crate::risk::classify_level;
use crate::scenario::scenario_label;
use crate::summary::PortfolioSummary;
use anyhow::{Context, Result};
use serde::Serialize;

/// Scored view of one record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RecordReport {
    pub id: String,
    pub category: String,
    pub subcategory: String,
    pub title: String,
    pub metrics: Vec<MetricValue>,
    pub overall_risk: f64,
    pub level: String,
    pub high_value: bool,
}

impl RecordReport {
    pub fn new(record: &RiskRecord, framework: Framework) -> Self {
        let overall_risk = record.overall_risk_or_default();
        let (title, _) = category_title(&record.category, &record.subcategory);
        RecordReport {
            id: record.id.clone(),
            category: record.category.to_string(),
            subcategory: record.subcategory.clone(),
            title,
            metrics: read_metrics(record, framework),
            overall_risk,
            level: classify_level(overall_risk).as_str().to_string(),
            high_value: is_high_value(record, framework),
        }
    }
}

/// Reports for every record, in input order
pub fn build_record_reports(records: &[RiskRecord], framework: Framework) -> Vec<RecordReport> {
    records
        .iter()
        .map(|record| RecordReport::new(record, framework))
        .collect()
}

/// Sort impact rows deterministically
pub fn sort_impacts(mut rows: Vec<ImpactRow>) -> Vec<ImpactRow> {
    rows.sort_by(|a, b| {
        // 1. Impact descending
        b.financial_impact
            .partial_cmp(&a.financial_impact)
            .unwrap_or(std::cmp::Ordering::Equal)
            // 2. Category ascending
            .then_with(|| a.category.cmp(&b.category))
            // 3. Id ascending
            .then_with(|| a.id.cmp(&b.id))
    });
    rows
}

/// Render record reports as text output
pub fn render_records_text(reports: &[RecordReport], summary: Option<&PortfolioSummary>) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<12} {:<12} {:<22} {:<8} {:<8} {:<4} {}\n",
        "ID", "CATEGORY", "SUBCATEGORY", "OVERALL", "LEVEL", "HV", "METRICS"
    ));

    for report in reports {
        let metrics = report
            .metrics
            .iter()
            .map(|m| format!("{}={}", m.label, m.score))
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!(
            "{:<12} {:<12} {:<22} {:<8} {:<8} {:<4} {}\n",
            truncate_or_pad(&report.id, 12),
            report.category,
            truncate_or_pad(&report.title, 22),
            format!("{:.2}", report.overall_risk),
            report.level,
            if report.high_value { "yes" } else { "-" },
            metrics,
        ));
    }

    if let Some(summary) = summary {
        output.push('\n');
        output.push_str(&format!(
            "{} records, {} high risk, {} opportunities ({} high-value)\n",
            summary.total_records,
            summary.high_risk_count,
            summary.opportunity_count,
            summary.high_value_count
        ));
        output.push_str(&format!(
            "Average overall risk: {:.1} ({})\n",
            summary.average_overall_risk, summary.profile
        ));
    }

    output
}

/// Render impact rows as text output
pub fn render_impacts_text(rows: &[ImpactRow]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<20} {:<12} {:<20} {:<8} {:<10} {:>16} {}\n",
        "ID", "CATEGORY", "SUBCATEGORY", "SCORE", "MULT", "IMPACT", "TYPE"
    ));

    for row in rows {
        output.push_str(&format!(
            "{:<20} {:<12} {:<20} {:<8} {:<10} {:>16} {} ({})\n",
            truncate_or_pad(&row.id, 20),
            row.category,
            truncate_or_pad(&row.subcategory, 20),
            format!("{:.2}", row.original_score),
            format!("{:.2}", row.ngfs_multiplier),
            format!("{:.2}", row.financial_impact),
            row.impact_type,
            row.currency,
        ));
    }

    output
}

/// Render heat maps as text grids
pub fn render_heat_maps_text(maps: &[HeatMap]) -> String {
    let mut output = String::new();

    for map in maps {
        output.push_str(&format!(
            "{} ({}/{}) baseline {:.2}\n",
            map.record_id, map.category, map.subcategory, map.baseline
        ));
        if let Some(first) = map.rows.first() {
            output.push_str(&format!("  {:<20}", ""));
            for cell in &first.cells {
                output.push_str(&format!(" {:<20}", cell.scenario));
            }
            output.push('\n');
        }
        for row in &map.rows {
            output.push_str(&format!("  {:<20}", row.horizon));
            for cell in &row.cells {
                let text = format!("{:.1} {}", cell.score, cell.tier.as_str());
                output.push_str(&format!(" {:<20}", text));
            }
            output.push('\n');
        }
        output.push('\n');
    }

    output
}

/// Render any serializable report as pretty JSON
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize report")
}

/// Stderr notice for an impact estimate that produced no rows
///
/// Standalone mode with a metric it has no formula for is reported as such;
/// anything else means the selected series has no usable data.
pub fn empty_impact_notice(config: &ResolvedConfig, standalone: bool) -> String {
    if standalone && !has_standalone_formula(config.metric) {
        return format!(
            "Warning: metric {} has no standalone formula (use carbonPrice, energyDemand, temperature or gdpImpact, or pass --records)",
            config.metric
        );
    }
    format!(
        "Warning: no impact results for scenario '{}' (model {}, year {}, metric {}); scenario data is not ready",
        scenario_label(&config.scenario),
        config.model,
        config.horizon,
        config.metric
    )
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        format!("{:<width$}", s, width = width)
    }
}
