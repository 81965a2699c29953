//! High-value opportunity qualification and record grouping

use crate::framework::{score_or_zero, Framework, MetricKey, ADVANCED_OPPORTUNITY_METRICS};
use crate::record::{Category, RiskRecord};
use serde::Serialize;

/// Any qualifying metric at or above this marks a high-value opportunity
pub const HIGH_VALUE_THRESHOLD: i32 = 4;

const STANDARD_QUALIFYING_METRICS: &[MetricKey] = &[MetricKey::Impact, MetricKey::Likelihood];

/// Metrics checked for high-value qualification under a framework
pub fn qualifying_metrics(framework: Framework) -> &'static [MetricKey] {
    match framework {
        Framework::Standard => STANDARD_QUALIFYING_METRICS,
        Framework::Advanced => ADVANCED_OPPORTUNITY_METRICS,
    }
}

/// Whether an opportunity record qualifies as high-value
///
/// Non-opportunity records never qualify. Absent metrics read as 0 here,
/// not 3, so a sparse record cannot qualify by default.
pub fn is_high_value(record: &RiskRecord, framework: Framework) -> bool {
    if !record.category.is_opportunity() {
        return false;
    }
    qualifying_metrics(framework)
        .iter()
        .any(|key| score_or_zero(record, *key) >= HIGH_VALUE_THRESHOLD)
}

/// High-value subset, in input order
pub fn high_value_opportunities(records: &[RiskRecord], framework: Framework) -> Vec<&RiskRecord> {
    records
        .iter()
        .filter(|r| is_high_value(r, framework))
        .collect()
}

/// Group key for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    HighValue,
    Category(Category),
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordGroup<'a> {
    pub key: GroupKey,
    pub records: Vec<&'a RiskRecord>,
}

/// Group records for display
///
/// Order: high-value opportunities, then transition, physical, opportunity,
/// then any other category in first-seen order. Empty groups are omitted.
/// High-value records also stay in their own category group.
pub fn group_records(records: &[RiskRecord], framework: Framework) -> Vec<RecordGroup<'_>> {
    let mut groups = Vec::new();

    let high_value = high_value_opportunities(records, framework);
    if !high_value.is_empty() {
        groups.push(RecordGroup {
            key: GroupKey::HighValue,
            records: high_value,
        });
    }

    let mut order = vec![
        Category::Transition,
        Category::Physical,
        Category::Opportunity,
    ];
    for record in records {
        if !order.contains(&record.category) {
            order.push(record.category.clone());
        }
    }

    for category in order {
        let members: Vec<&RiskRecord> = records.iter().filter(|r| r.category == category).collect();
        if !members.is_empty() {
            groups.push(RecordGroup {
                key: GroupKey::Category(category),
                records: members,
            });
        }
    }

    groups
}
