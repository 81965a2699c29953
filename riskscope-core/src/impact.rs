//! Scenario-driven financial impact estimation
//!
//! Two modes share one multiplier concept, the ratio of a scenario metric at
//! the chosen horizon year to its value at the series baseline:
//!
//! - Standalone: organization parameters and a single risk score
//! - Assessment: one row per existing risk record
//!
//! Global invariants enforced:
//! - Reported impacts are non-negative magnitudes
//! - A degenerate baseline never divides by zero
//! - No scenario data, or no point at the horizon year, yields no rows

use crate::framework::{score_or_zero, MetricKey};
use crate::record::RiskRecord;
use crate::scenario::{ScenarioDataPoint, ScenarioMetric, ScenarioSeries};
use serde::{Deserialize, Serialize};

/// Organization parameters for standalone estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationProfile {
    pub name: String,
    /// Annual revenue in dollars
    pub annual_revenue: f64,
    /// tCO2e per $1M revenue
    pub carbon_intensity: f64,
    /// MWh per $1M revenue
    pub energy_intensity: f64,
    /// Aggregated risk score in [1, 5]
    pub risk_score: f64,
}

impl Default for OrganizationProfile {
    fn default() -> Self {
        OrganizationProfile {
            name: "Your Organization".to_string(),
            annual_revenue: 100_000_000.0,
            carbon_intensity: 2.5,
            energy_intensity: 150.0,
            risk_score: 3.0,
        }
    }
}

/// Fixed assumptions behind the impact formulas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactAssumptions {
    /// Assumed energy cost in $/MWh
    pub energy_unit_cost: f64,
    /// Share of revenue at risk per degree of warming
    pub revenue_at_risk_per_degree: f64,
    /// Display scale applied in assessment mode
    pub assessment_scale: f64,
}

impl Default for ImpactAssumptions {
    fn default() -> Self {
        ImpactAssumptions {
            energy_unit_cost: 100.0,
            revenue_at_risk_per_degree: 0.01,
            assessment_scale: 10.0,
        }
    }
}

/// One impact row for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactRow {
    pub id: String,
    pub category: String,
    pub subcategory: String,
    pub original_score: f64,
    pub ngfs_multiplier: f64,
    pub financial_impact: f64,
    pub impact_type: String,
    pub currency: String,
}

/// Impact type and unit reported for a metric in assessment mode
pub fn assessment_labels(metric: ScenarioMetric) -> (&'static str, &'static str) {
    match metric {
        ScenarioMetric::CarbonPrice => ("Cost Impact", "$/tCO2"),
        ScenarioMetric::Temperature => ("Physical Risk", "°C"),
        ScenarioMetric::GdpImpact => ("Economic Impact", "%"),
        ScenarioMetric::EnergyDemand => ("Energy Cost", "EJ/yr"),
        ScenarioMetric::RenewableShare => ("Transition Opportunity", "%"),
        ScenarioMetric::FossilFuelDemand => ("Stranded Asset Risk", "EJ/yr"),
        ScenarioMetric::Co2Emissions => ("Regulatory Risk", "GtCO2/yr"),
    }
}

/// Metric value at the horizon point; null reads as 0
fn horizon_value(metric: ScenarioMetric, point: &ScenarioDataPoint) -> f64 {
    metric.value(point).unwrap_or(0.0)
}

/// Metric value at the baseline point; a null field or missing point reads as 1
fn baseline_value(metric: ScenarioMetric, series: &ScenarioSeries) -> f64 {
    series
        .baseline()
        .and_then(|p| metric.value(p))
        .unwrap_or(1.0)
}

/// Horizon-to-baseline ratio, or `fallback` when the baseline is not positive
pub fn baseline_ratio(value: f64, baseline: f64, fallback: f64) -> f64 {
    if baseline > 0.0 {
        value / baseline
    } else {
        fallback
    }
}

/// Assessment-mode multiplier for a metric
///
/// GDP impact is already a percentage deviation, so it uses the absolute
/// horizon value against a fixed baseline of 1 rather than a true ratio.
pub fn assessment_multiplier(
    series: &ScenarioSeries,
    horizon_point: &ScenarioDataPoint,
    metric: ScenarioMetric,
) -> f64 {
    let (value, baseline) = match metric {
        ScenarioMetric::GdpImpact => (horizon_value(metric, horizon_point).abs(), 1.0),
        _ => (
            horizon_value(metric, horizon_point),
            baseline_value(metric, series),
        ),
    };
    baseline_ratio(value, baseline, value)
}

/// Mean of the record's impact, likelihood and vulnerability scores that are
/// present and positive; 0 when none are
pub fn average_present_score(record: &RiskRecord) -> f64 {
    let present: Vec<i32> = [MetricKey::Impact, MetricKey::Likelihood, MetricKey::Vulnerability]
        .iter()
        .map(|key| score_or_zero(record, *key))
        .filter(|score| *score > 0)
        .collect();
    if present.is_empty() {
        return 0.0;
    }
    let sum: i32 = present.iter().sum();
    f64::from(sum) / present.len() as f64
}

fn standalone_row(
    id: &str,
    category: &str,
    subcategory: &str,
    profile: &OrganizationProfile,
    multiplier: f64,
    impact: f64,
    impact_type: &str,
) -> ImpactRow {
    ImpactRow {
        id: id.to_string(),
        category: category.to_string(),
        subcategory: subcategory.to_string(),
        original_score: profile.risk_score,
        ngfs_multiplier: multiplier,
        financial_impact: impact.abs(),
        impact_type: impact_type.to_string(),
        currency: "$/year".to_string(),
    }
}

/// Whether standalone mode has a formula for a metric
///
/// Only carbonPrice, energyDemand, temperature and gdpImpact do.
pub fn has_standalone_formula(metric: ScenarioMetric) -> bool {
    matches!(
        metric,
        ScenarioMetric::CarbonPrice
            | ScenarioMetric::EnergyDemand
            | ScenarioMetric::Temperature
            | ScenarioMetric::GdpImpact
    )
}

/// Standalone estimate for one organization
///
/// Metrics without a standalone formula yield no rows.
pub fn standalone_impacts(
    series: &ScenarioSeries,
    horizon_year: i32,
    metric: ScenarioMetric,
    profile: &OrganizationProfile,
    assumptions: &ImpactAssumptions,
) -> Vec<ImpactRow> {
    if series.is_empty() {
        tracing::debug!("no scenario data loaded, no standalone impact");
        return Vec::new();
    }
    let Some(point) = series.at_year(horizon_year) else {
        tracing::debug!(year = horizon_year, "horizon year not in scenario series");
        return Vec::new();
    };

    let revenue_millions = profile.annual_revenue / 1_000_000.0;
    let risk_share = profile.risk_score / 5.0;

    let row = match metric {
        ScenarioMetric::CarbonPrice => {
            let price = horizon_value(metric, point);
            let baseline_price = baseline_value(metric, series);
            let total_emissions = revenue_millions * profile.carbon_intensity;
            let impact = total_emissions * (price - baseline_price) * risk_share;
            standalone_row(
                "carbon-impact",
                "transition",
                "Carbon Pricing",
                profile,
                baseline_ratio(price, baseline_price, 1.0),
                impact,
                "Cost Impact",
            )
        }
        ScenarioMetric::EnergyDemand => {
            let demand = horizon_value(metric, point);
            let baseline_demand = baseline_value(metric, series);
            let demand_multiplier = baseline_ratio(demand, baseline_demand, 1.0);
            let total_energy = revenue_millions * profile.energy_intensity;
            let impact = total_energy
                * assumptions.energy_unit_cost
                * (demand_multiplier - 1.0)
                * risk_share;
            standalone_row(
                "energy-impact",
                "transition",
                "Energy Costs",
                profile,
                demand_multiplier,
                impact,
                "Energy Cost",
            )
        }
        ScenarioMetric::Temperature => {
            let temperature = horizon_value(metric, point);
            let baseline_temperature = baseline_value(metric, series);
            let impact = profile.annual_revenue
                * assumptions.revenue_at_risk_per_degree
                * (temperature - baseline_temperature)
                * risk_share;
            standalone_row(
                "temperature-impact",
                "physical",
                "Temperature Risk",
                profile,
                baseline_ratio(temperature, baseline_temperature, 1.0),
                impact,
                "Physical Risk",
            )
        }
        ScenarioMetric::GdpImpact => {
            let gdp_impact = horizon_value(metric, point).abs();
            let impact = profile.annual_revenue * (gdp_impact / 100.0) * risk_share;
            standalone_row(
                "gdp-impact",
                "transition",
                "Economic Impact",
                profile,
                gdp_impact,
                impact,
                "Economic Impact",
            )
        }
        ScenarioMetric::RenewableShare
        | ScenarioMetric::FossilFuelDemand
        | ScenarioMetric::Co2Emissions => {
            tracing::debug!(%metric, "no standalone formula for metric");
            return Vec::new();
        }
    };

    vec![row]
}

/// Assessment estimate, one row per record
pub fn assessment_impacts(
    records: &[RiskRecord],
    series: &ScenarioSeries,
    horizon_year: i32,
    metric: ScenarioMetric,
    assumptions: &ImpactAssumptions,
) -> Vec<ImpactRow> {
    if series.is_empty() {
        tracing::debug!("no scenario data loaded, no assessment impact");
        return Vec::new();
    }
    let Some(point) = series.at_year(horizon_year) else {
        tracing::debug!(year = horizon_year, "horizon year not in scenario series");
        return Vec::new();
    };

    let multiplier = assessment_multiplier(series, point, metric);
    let (impact_type, currency) = assessment_labels(metric);

    records
        .iter()
        .map(|record| {
            let average = average_present_score(record);
            ImpactRow {
                id: record.id.clone(),
                category: record.category.to_string(),
                subcategory: record.subcategory.clone(),
                original_score: average,
                ngfs_multiplier: multiplier,
                financial_impact: (average * multiplier * assumptions.assessment_scale).abs(),
                impact_type: impact_type.to_string(),
                currency: currency.to_string(),
            }
        })
        .collect()
}
