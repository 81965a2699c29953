//! Cross-module properties that must hold for any input

use riskscope_core::impact::{ImpactAssumptions, OrganizationProfile};
use riskscope_core::projection::{lookup_canonical, DEFAULT_PROJECTED_SCORE};
use riskscope_core::scenario::{Horizon, Scenario};
use riskscope_core::{
    assessment_impacts, classify_level, heat_tier, parse_projections, read_score, resolve_metrics,
    score_or_zero, standalone_impacts, Category, Framework, HeatTier, MetricKey, ProjectionTable,
    RiskLevel, RiskRecord, ScenarioDataPoint, ScenarioMetric, ScenarioSeries,
};

const SIGNED_VALUES: [Option<f64>; 7] = [
    None,
    Some(-12.5),
    Some(-1.0),
    Some(0.0),
    Some(0.5),
    Some(3.0),
    Some(140.0),
];

fn series_with(metric: ScenarioMetric, baseline: Option<f64>, horizon: Option<f64>) -> ScenarioSeries {
    let mut base = ScenarioDataPoint {
        year: 2020,
        ..Default::default()
    };
    let mut later = ScenarioDataPoint {
        year: 2030,
        ..Default::default()
    };
    let slot = |point: &mut ScenarioDataPoint, value: Option<f64>| match metric {
        ScenarioMetric::Temperature => point.temperature = value,
        ScenarioMetric::CarbonPrice => point.carbon_price = value,
        ScenarioMetric::GdpImpact => point.gdp_impact = value,
        ScenarioMetric::EnergyDemand => point.energy_demand = value,
        ScenarioMetric::RenewableShare => point.renewable_share = value,
        ScenarioMetric::FossilFuelDemand => point.fossil_fuel_demand = value,
        ScenarioMetric::Co2Emissions => point.co2_emissions = value,
    };
    slot(&mut base, baseline);
    slot(&mut later, horizon);
    ScenarioSeries::from_points(vec![base, later])
}

fn scored_record(impact: Option<i32>, likelihood: Option<i32>, vulnerability: Option<i32>) -> RiskRecord {
    let mut record = RiskRecord::new("r1", Category::Transition, "market");
    record.impact_score = impact;
    record.likelihood_score = likelihood;
    record.vulnerability_score = vulnerability;
    record
}

#[test]
fn test_financial_impact_is_never_negative() {
    let profile = OrganizationProfile::default();
    let assumptions = ImpactAssumptions::default();
    let records = vec![
        scored_record(Some(5), Some(4), Some(3)),
        scored_record(Some(1), None, None),
        scored_record(None, None, None),
    ];

    for metric in ScenarioMetric::ALL {
        for baseline in SIGNED_VALUES {
            for horizon in SIGNED_VALUES {
                let series = series_with(metric, baseline, horizon);
                let rows = standalone_impacts(&series, 2030, metric, &profile, &assumptions)
                    .into_iter()
                    .chain(assessment_impacts(&records, &series, 2030, metric, &assumptions));
                for row in rows {
                    assert!(
                        row.financial_impact >= 0.0 && row.financial_impact.is_finite(),
                        "{} {:?} {:?} -> {}",
                        metric,
                        baseline,
                        horizon,
                        row.financial_impact
                    );
                }
            }
        }
    }
}

#[test]
fn test_resolved_metrics_are_stable_and_ordered() {
    let transition = Category::Transition;
    let opportunity = Category::Opportunity;
    let other = Category::Other("governance".to_string());

    assert_eq!(
        resolve_metrics(&transition, Framework::Standard),
        resolve_metrics(&opportunity, Framework::Standard)
    );
    assert_eq!(
        resolve_metrics(&transition, Framework::Advanced),
        resolve_metrics(&other, Framework::Advanced)
    );

    let first = resolve_metrics(&opportunity, Framework::Advanced);
    let second = resolve_metrics(&opportunity, Framework::Advanced);
    assert_eq!(first, second);
    let labels: Vec<&str> = first.iter().map(|c| c.label).collect();
    assert_eq!(
        labels,
        vec![
            "Strategic Misalignment",
            "Market Readiness",
            "Value Creation",
            "Feasibility"
        ]
    );
}

#[test]
fn test_display_and_averaging_defaults_differ() {
    let record = RiskRecord::new("t1", Category::Transition, "market");
    for key in [
        MetricKey::Impact,
        MetricKey::Likelihood,
        MetricKey::Vulnerability,
        MetricKey::Exposure,
        MetricKey::StrategicMisalignment,
        MetricKey::MitigationReadiness,
        MetricKey::MarketReadiness,
        MetricKey::ValueCreation,
        MetricKey::Feasibility,
    ] {
        assert_eq!(read_score(&record, key), 3);
        assert_eq!(score_or_zero(&record, key), 0);
    }
}

#[test]
fn test_stored_zero_reads_as_default_for_display() {
    let record = scored_record(Some(0), Some(2), None);
    assert_eq!(read_score(&record, MetricKey::Impact), 3);
    assert_eq!(read_score(&record, MetricKey::Likelihood), 2);
}

#[test]
fn test_serialized_table_parses_back() {
    let mut table = ProjectionTable::new();
    table.insert("Net Zero 2050", "Short-term (2030)", 4.2);
    table.insert("Net Zero 2050", "Long-term (2050)", 2.1);
    table.insert("Current Policies", "Medium-term (2040)", 3.7);

    let mut record = RiskRecord::new("t1", Category::Transition, "market");
    record.scenario_projections = Some(serde_json::Value::String(
        table.to_json_string().unwrap(),
    ));

    let parsed = parse_projections(&record).unwrap();
    assert_eq!(parsed, table);
    assert_eq!(
        lookup_canonical(&parsed, Scenario::CurrentPolicies, Horizon::MediumTerm),
        3.7
    );
    assert_eq!(
        lookup_canonical(&parsed, Scenario::Ndcs, Horizon::MediumTerm),
        DEFAULT_PROJECTED_SCORE
    );
}

#[test]
fn test_corrupted_or_non_object_payload_is_absent() {
    let mut record = RiskRecord::new("t1", Category::Transition, "market");
    for payload in [
        serde_json::Value::String("{\"Net Zero 2050\": ".to_string()),
        serde_json::Value::String("[1, 2, 3]".to_string()),
        serde_json::Value::String("\"text\"".to_string()),
        serde_json::json!(42),
        serde_json::Value::Null,
    ] {
        record.scenario_projections = Some(payload);
        assert!(parse_projections(&record).is_none());
    }
}

#[test]
fn test_tier_and_level_boundaries() {
    assert_eq!(heat_tier(1.5), HeatTier::Low);
    assert_eq!(heat_tier(1.51), HeatTier::MediumLow);
    assert_eq!(heat_tier(2.5), HeatTier::MediumLow);
    assert_eq!(heat_tier(3.5), HeatTier::Medium);
    assert_eq!(heat_tier(4.5), HeatTier::High);
    assert_eq!(heat_tier(4.51), HeatTier::VeryHigh);

    assert_eq!(classify_level(2.99), RiskLevel::Low);
    assert_eq!(classify_level(3.0), RiskLevel::Medium);
    assert_eq!(classify_level(3.99), RiskLevel::Medium);
    assert_eq!(classify_level(4.0), RiskLevel::High);
}

#[test]
fn test_out_of_range_scores_classify_without_clamping() {
    assert_eq!(classify_level(7.0), RiskLevel::High);
    assert_eq!(classify_level(-1.0), RiskLevel::Low);
    assert_eq!(heat_tier(9.0), HeatTier::VeryHigh);
    assert_eq!(heat_tier(0.0), HeatTier::Low);
}

#[test]
fn test_default_profile_carbon_example() {
    let profile = OrganizationProfile::default();
    let assumptions = ImpactAssumptions::default();
    let series = series_with(ScenarioMetric::CarbonPrice, Some(80.0), Some(125.0));

    let rows = standalone_impacts(
        &series,
        2030,
        ScenarioMetric::CarbonPrice,
        &profile,
        &assumptions,
    );
    // 100 × 2.5 tCO2e × $45 × 3/5
    assert!((rows[0].financial_impact - 6750.0).abs() < 1e-9);
}
