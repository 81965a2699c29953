//! Scenario projection tables and heat-map grids
//!
//! A record may carry a table of projected scores keyed by scenario and
//! horizon, either as a JSON object or as a serialized JSON string. A
//! missing or unparsable table means "no scenario view" and is skipped,
//! never raised.

use crate::framework::{score_or_zero, MetricKey};
use crate::record::RiskRecord;
use crate::risk::{heat_tier, HeatTier};
use crate::scenario::{Horizon, Scenario};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Score used for a (scenario, horizon) pair the table does not carry
pub const DEFAULT_PROJECTED_SCORE: f64 = 3.0;

/// Scenario → horizon → projected score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectionTable {
    cells: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ProjectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, scenario: impl Into<String>, horizon: impl Into<String>, score: f64) {
        self.cells
            .entry(scenario.into())
            .or_default()
            .insert(horizon.into(), score);
    }

    /// Stored value for an exact pair, if any
    pub fn get(&self, scenario: &str, horizon: &str) -> Option<f64> {
        self.cells.get(scenario)?.get(horizon).copied()
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Score carried by one cell: a bare number, or an object with `overallRisk`
fn cell_score(cell: &Value) -> Option<f64> {
    let score = match cell {
        Value::Number(n) => n.as_f64(),
        Value::Object(fields) => fields.get("overallRisk").and_then(Value::as_f64),
        _ => None,
    }?;
    score.is_finite().then_some(score)
}

fn table_from_value(value: &Value) -> Option<ProjectionTable> {
    let scenarios = value.as_object()?;
    let mut table = ProjectionTable::new();
    for (scenario, horizons) in scenarios {
        let Some(horizons) = horizons.as_object() else {
            continue;
        };
        for (horizon, cell) in horizons {
            if let Some(score) = cell_score(cell) {
                table.insert(scenario.as_str(), horizon.as_str(), score);
            }
        }
    }
    Some(table)
}

/// Parse a record's projection payload
///
/// Returns `None` when the field is absent, null, not valid JSON, or does
/// not decode to an object.
pub fn parse_projections(record: &RiskRecord) -> Option<ProjectionTable> {
    let raw = record.scenario_projections.as_ref()?;
    let decoded;
    let value = match raw {
        Value::Null => return None,
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(v) => {
                decoded = v;
                &decoded
            }
            Err(e) => {
                tracing::debug!(record = %record.id, error = %e, "unparsable scenario projections");
                return None;
            }
        },
        other => other,
    };

    let table = table_from_value(value);
    if table.is_none() {
        tracing::debug!(record = %record.id, "scenario projections are not an object");
    }
    table
}

/// Projected score for an exact pair
///
/// Absent pairs, and stored zeros, read as [`DEFAULT_PROJECTED_SCORE`].
pub fn lookup_score(table: &ProjectionTable, scenario: &str, horizon: &str) -> f64 {
    match table.get(scenario, horizon) {
        Some(score) if score != 0.0 => score,
        _ => DEFAULT_PROJECTED_SCORE,
    }
}

/// Projected score for a canonical pair
///
/// Tries the display keys ("Net Zero 2050", "Short-term (2030)") before the
/// generator keys ("net-zero-2050", "2030").
pub fn lookup_canonical(table: &ProjectionTable, scenario: Scenario, horizon: Horizon) -> f64 {
    let year = horizon.year().to_string();
    let candidates = [
        (scenario.label(), horizon.label()),
        (scenario.id(), horizon.label()),
        (scenario.label(), year.as_str()),
        (scenario.id(), year.as_str()),
    ];
    candidates
        .iter()
        .find_map(|(s, h)| table.get(s, h).filter(|score| *score != 0.0))
        .unwrap_or(DEFAULT_PROJECTED_SCORE)
}

/// Mean of impact, likelihood and vulnerability with absent scores as 0
///
/// Used for trend framing next to the heat map, not for the grid itself.
pub fn baseline_score(record: &RiskRecord) -> f64 {
    let sum = score_or_zero(record, MetricKey::Impact)
        + score_or_zero(record, MetricKey::Likelihood)
        + score_or_zero(record, MetricKey::Vulnerability);
    f64::from(sum) / 3.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatMapCell {
    pub scenario: &'static str,
    pub score: f64,
    pub tier: HeatTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatMapRow {
    pub horizon: &'static str,
    pub cells: Vec<HeatMapCell>,
}

/// Horizon × scenario grid for one record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatMap {
    pub record_id: String,
    pub category: String,
    pub subcategory: String,
    pub baseline: f64,
    pub rows: Vec<HeatMapRow>,
}

/// Build the heat map for a record, or `None` if it has no projections
pub fn build_heat_map(record: &RiskRecord) -> Option<HeatMap> {
    let table = parse_projections(record)?;

    let rows = Horizon::ALL
        .iter()
        .map(|horizon| HeatMapRow {
            horizon: horizon.label(),
            cells: Scenario::ALL
                .iter()
                .map(|scenario| {
                    let score = lookup_canonical(&table, *scenario, *horizon);
                    HeatMapCell {
                        scenario: scenario.label(),
                        score,
                        tier: heat_tier(score),
                    }
                })
                .collect(),
        })
        .collect();

    Some(HeatMap {
        record_id: record.id.clone(),
        category: record.category.to_string(),
        subcategory: record.subcategory.clone(),
        baseline: baseline_score(record),
        rows,
    })
}

/// Heat maps for every record that has a scenario view
pub fn build_heat_maps(records: &[RiskRecord]) -> Vec<HeatMap> {
    records
        .iter()
        .filter_map(|record| {
            let map = build_heat_map(record);
            if map.is_none() {
                tracing::debug!(record = %record.id, "no scenario view, skipping heat map");
            }
            map
        })
        .collect()
}
