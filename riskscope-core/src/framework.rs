//! Scoring frameworks and metric resolution
//!
//! The (framework, category) → metric columns mapping is a lookup table, so
//! adding a framework is a data change. Column order drives display layout
//! and must stay stable.
//!
//! Two score accessors exist on purpose and must not be merged:
//! - [`read_score`]: display/edit value, absent or zero reads as 3
//! - [`score_or_zero`]: qualification/averaging value, absent or zero reads as 0

use crate::record::{Category, RiskRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Score shown for a metric the record does not carry
pub const DEFAULT_DISPLAY_SCORE: i32 = 3;

/// Active scoring schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    Standard,
    Advanced,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Standard => "standard",
            Framework::Advanced => "advanced",
        }
    }
}

impl FromStr for Framework {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Framework::Standard),
            "advanced" => Ok(Framework::Advanced),
            other => anyhow::bail!(
                "unknown framework '{}' (expected 'standard' or 'advanced')",
                other
            ),
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named per-record metric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    Impact,
    Likelihood,
    Vulnerability,
    Exposure,
    StrategicMisalignment,
    MitigationReadiness,
    MarketReadiness,
    ValueCreation,
    Feasibility,
}

impl MetricKey {
    pub fn label(&self) -> &'static str {
        match self {
            MetricKey::Impact => "Impact",
            MetricKey::Likelihood => "Likelihood",
            MetricKey::Vulnerability => "Vulnerability",
            MetricKey::Exposure => "Exposure",
            MetricKey::StrategicMisalignment => "Strategic Misalignment",
            MetricKey::MitigationReadiness => "Mitigation Readiness",
            MetricKey::MarketReadiness => "Market Readiness",
            MetricKey::ValueCreation => "Value Creation",
            MetricKey::Feasibility => "Feasibility",
        }
    }

    /// Raw stored value, before any defaulting
    pub fn raw(&self, record: &RiskRecord) -> Option<i32> {
        match self {
            MetricKey::Impact => record.impact_score,
            MetricKey::Likelihood => record.likelihood_score,
            MetricKey::Vulnerability => record.vulnerability_score,
            MetricKey::Exposure => record.exposure_score,
            MetricKey::StrategicMisalignment => record.strategic_misalignment_score,
            MetricKey::MitigationReadiness => record.mitigation_readiness_score,
            MetricKey::MarketReadiness => record.market_readiness_score,
            MetricKey::ValueCreation => record.value_creation_score,
            MetricKey::Feasibility => record.feasibility_score,
        }
    }
}

/// Whether a category scores as a risk or an opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryClass {
    Risk,
    Opportunity,
}

impl CategoryClass {
    pub fn of(category: &Category) -> Self {
        if category.is_opportunity() {
            CategoryClass::Opportunity
        } else {
            CategoryClass::Risk
        }
    }
}

pub const STANDARD_METRICS: &[MetricKey] = &[
    MetricKey::Impact,
    MetricKey::Likelihood,
    MetricKey::Vulnerability,
];

pub const ADVANCED_RISK_METRICS: &[MetricKey] = &[
    MetricKey::Exposure,
    MetricKey::Vulnerability,
    MetricKey::StrategicMisalignment,
    MetricKey::MitigationReadiness,
];

pub const ADVANCED_OPPORTUNITY_METRICS: &[MetricKey] = &[
    MetricKey::StrategicMisalignment,
    MetricKey::MarketReadiness,
    MetricKey::ValueCreation,
    MetricKey::Feasibility,
];

/// (framework, category class) → ordered metric columns
const METRIC_TABLE: &[(Framework, CategoryClass, &[MetricKey])] = &[
    (Framework::Standard, CategoryClass::Risk, STANDARD_METRICS),
    (Framework::Standard, CategoryClass::Opportunity, STANDARD_METRICS),
    (Framework::Advanced, CategoryClass::Risk, ADVANCED_RISK_METRICS),
    (
        Framework::Advanced,
        CategoryClass::Opportunity,
        ADVANCED_OPPORTUNITY_METRICS,
    ),
];

/// One display column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricColumn {
    pub key: MetricKey,
    pub label: &'static str,
}

/// Ordered metric keys for a category under a framework
pub fn metric_keys(category: &Category, framework: Framework) -> &'static [MetricKey] {
    let class = CategoryClass::of(category);
    METRIC_TABLE
        .iter()
        .find(|(fw, cls, _)| *fw == framework && *cls == class)
        .map(|(_, _, keys)| *keys)
        .unwrap_or(STANDARD_METRICS)
}

/// Ordered metric columns: 3 under standard, 4 under advanced
pub fn resolve_metrics(category: &Category, framework: Framework) -> Vec<MetricColumn> {
    metric_keys(category, framework)
        .iter()
        .map(|key| MetricColumn {
            key: *key,
            label: key.label(),
        })
        .collect()
}

/// Display score: absent or zero reads as [`DEFAULT_DISPLAY_SCORE`]
pub fn read_score(record: &RiskRecord, key: MetricKey) -> i32 {
    match key.raw(record) {
        Some(v) if v != 0 => v,
        _ => DEFAULT_DISPLAY_SCORE,
    }
}

/// Qualification score: absent reads as 0
///
/// Used by high-value qualification, baseline framing and assessment
/// averaging, where a missing metric must not count as a mid-range score.
pub fn score_or_zero(record: &RiskRecord, key: MetricKey) -> i32 {
    key.raw(record).unwrap_or(0)
}

/// A resolved (column, display score) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricValue {
    pub key: MetricKey,
    pub label: &'static str,
    pub score: i32,
}

/// Resolve columns for a record and read each with the display default
pub fn read_metrics(record: &RiskRecord, framework: Framework) -> Vec<MetricValue> {
    resolve_metrics(&record.category, framework)
        .into_iter()
        .map(|column| MetricValue {
            key: column.key,
            label: column.label,
            score: read_score(record, column.key),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_categories() -> Vec<Category> {
        vec![
            Category::Transition,
            Category::Physical,
            Category::Opportunity,
            Category::Other("governance".to_string()),
        ]
    }

    #[test]
    fn test_column_counts_per_framework() {
        for category in all_categories() {
            assert_eq!(resolve_metrics(&category, Framework::Standard).len(), 3);
            assert_eq!(resolve_metrics(&category, Framework::Advanced).len(), 4);
        }
    }

    #[test]
    fn test_resolution_is_stable() {
        for category in all_categories() {
            for framework in [Framework::Standard, Framework::Advanced] {
                let first = resolve_metrics(&category, framework);
                let second = resolve_metrics(&category, framework);
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn test_advanced_opportunity_columns() {
        let keys = metric_keys(&Category::Opportunity, Framework::Advanced);
        assert_eq!(keys, ADVANCED_OPPORTUNITY_METRICS);
        assert_eq!(keys[0], MetricKey::StrategicMisalignment);
        assert_eq!(keys[3], MetricKey::Feasibility);
    }

    #[test]
    fn test_unknown_category_uses_risk_columns() {
        let keys = metric_keys(&Category::Other("unknown".to_string()), Framework::Advanced);
        assert_eq!(keys, ADVANCED_RISK_METRICS);
    }

    #[test]
    fn test_read_score_defaults() {
        let mut record = RiskRecord::new("r", Category::Transition, "market");
        assert_eq!(read_score(&record, MetricKey::Impact), 3);

        record.impact_score = Some(0);
        assert_eq!(read_score(&record, MetricKey::Impact), 3);

        record.impact_score = Some(5);
        assert_eq!(read_score(&record, MetricKey::Impact), 5);

        record.impact_score = Some(1);
        assert_eq!(read_score(&record, MetricKey::Impact), 1);
    }

    #[test]
    fn test_read_score_defaults_every_key() {
        let record = RiskRecord::new("r", Category::Opportunity, "markets");
        for key in STANDARD_METRICS
            .iter()
            .chain(ADVANCED_RISK_METRICS)
            .chain(ADVANCED_OPPORTUNITY_METRICS)
        {
            assert_eq!(read_score(&record, *key), 3, "{}", key.label());
            assert_eq!(score_or_zero(&record, *key), 0, "{}", key.label());
        }
    }

    #[test]
    fn test_framework_parsing() {
        assert_eq!("advanced".parse::<Framework>().unwrap(), Framework::Advanced);
        assert_eq!("standard".parse::<Framework>().unwrap(), Framework::Standard);
        assert!("expert".parse::<Framework>().is_err());
    }
}
