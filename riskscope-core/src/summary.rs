//! Portfolio summary views
//!
//! Global invariants enforced:
//! - Summaries are strictly derived (never stored, always computed)
//! - No modification of record data

use crate::framework::Framework;
use crate::opportunity::high_value_opportunities;
use crate::record::RiskRecord;
use crate::risk::{classify_level, RiskLevel, HIGH_RISK_THRESHOLD};
use serde::Serialize;

/// Headline figures for a record set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PortfolioSummary {
    pub total_records: usize,
    pub high_risk_count: usize,
    pub opportunity_count: usize,
    pub high_value_count: usize,
    pub average_overall_risk: f64,
    pub profile: &'static str,
}

/// Profile label for a mean overall risk
pub fn profile_label(average: f64) -> &'static str {
    match classify_level(average) {
        RiskLevel::High => "High risk profile",
        RiskLevel::Medium => "Medium risk profile",
        RiskLevel::Low => "Lower risk profile",
    }
}

/// Summarize a record set
///
/// Overall risk reads as 0 when absent here, so unscored records pull the
/// mean down instead of counting as medium.
pub fn summarize(records: &[RiskRecord], framework: Framework) -> PortfolioSummary {
    let high_risk_count = records
        .iter()
        .filter(|r| r.overall_risk_or_zero() >= HIGH_RISK_THRESHOLD)
        .count();
    let opportunity_count = records
        .iter()
        .filter(|r| r.category.is_opportunity())
        .count();

    let average_overall_risk = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.overall_risk_or_zero()).sum::<f64>() / records.len() as f64
    };

    PortfolioSummary {
        total_records: records.len(),
        high_risk_count,
        opportunity_count,
        high_value_count: high_value_opportunities(records, framework).len(),
        average_overall_risk,
        profile: profile_label(average_overall_risk),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Category;

    fn scored(id: &str, category: Category, overall: Option<f64>) -> RiskRecord {
        let mut record = RiskRecord::new(id, category, "x");
        record.overall_risk = overall;
        record
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[], Framework::Standard);
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.average_overall_risk, 0.0);
        assert_eq!(summary.profile, "Lower risk profile");
    }

    #[test]
    fn test_summary_counts() {
        let mut hv = scored("o1", Category::Opportunity, Some(2.0));
        hv.likelihood_score = Some(4);
        let records = vec![
            scored("t1", Category::Transition, Some(4.5)),
            scored("p1", Category::Physical, Some(4.0)),
            scored("p2", Category::Physical, None),
            hv,
        ];
        let summary = summarize(&records, Framework::Standard);
        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.high_risk_count, 2);
        assert_eq!(summary.opportunity_count, 1);
        assert_eq!(summary.high_value_count, 1);
        // (4.5 + 4.0 + 0 + 2.0) / 4
        assert_eq!(summary.average_overall_risk, 2.625);
        assert_eq!(summary.profile, "Lower risk profile");
    }

    #[test]
    fn test_profile_labels() {
        assert_eq!(profile_label(4.0), "High risk profile");
        assert_eq!(profile_label(3.2), "Medium risk profile");
        assert_eq!(profile_label(2.9), "Lower risk profile");
    }
}
