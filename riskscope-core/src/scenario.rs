//! NGFS scenario catalog and scenario time series
//!
//! The baseline of a series is its first chronological point. Series are
//! read-only inputs fetched upstream; this module only orders, filters and
//! averages them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Model id of the cross-model average series
pub const AVERAGE_MODEL: &str = "Average";

/// Canonical NGFS scenarios, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    NetZero2050,
    Below2C,
    DelayedTransition,
    DivergentNetZero,
    Ndcs,
    CurrentPolicies,
    HotHouseWorld,
}

impl Scenario {
    pub const ALL: [Scenario; 7] = [
        Scenario::NetZero2050,
        Scenario::Below2C,
        Scenario::DelayedTransition,
        Scenario::DivergentNetZero,
        Scenario::Ndcs,
        Scenario::CurrentPolicies,
        Scenario::HotHouseWorld,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Scenario::NetZero2050 => "net-zero-2050",
            Scenario::Below2C => "below-2c",
            Scenario::DelayedTransition => "delayed-transition",
            Scenario::DivergentNetZero => "divergent-net-zero",
            Scenario::Ndcs => "ndcs",
            Scenario::CurrentPolicies => "current-policies",
            Scenario::HotHouseWorld => "hot-house-world",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::NetZero2050 => "Net Zero 2050",
            Scenario::Below2C => "Below 2°C",
            Scenario::DelayedTransition => "Delayed Transition",
            Scenario::DivergentNetZero => "Divergent Net Zero",
            Scenario::Ndcs => "NDCs",
            Scenario::CurrentPolicies => "Current Policies",
            Scenario::HotHouseWorld => "Hot House World",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scenario::NetZero2050 => "Ambitious climate action with global net zero by 2050. High immediate carbon pricing but lower long-term physical risks.",
            Scenario::Below2C => "Policies consistent with limiting warming to below 2°C. Moderate carbon pricing with gradual transition.",
            Scenario::DelayedTransition => "Climate action delayed until 2030, then accelerated transition. Higher stranded assets and transition costs.",
            Scenario::DivergentNetZero => "Uneven policy implementation across regions. Some achieve net zero while others lag behind.",
            Scenario::Ndcs => "Current nationally determined contributions only. Limited additional climate action beyond existing commitments.",
            Scenario::CurrentPolicies => "No additional climate policies beyond current commitments. Highest physical risk impacts but lower transition costs.",
            Scenario::HotHouseWorld => "Failure of international cooperation. Highest temperature increases and most severe physical impacts.",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Scenario::ALL.iter().copied().find(|s| s.id() == id)
    }
}

/// Display label for a scenario id, falling back to the id itself
pub fn scenario_label(id: &str) -> &str {
    Scenario::from_id(id).map(|s| s.label()).unwrap_or(id)
}

/// Canonical projection horizons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Horizon {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl Horizon {
    pub const ALL: [Horizon; 3] = [Horizon::ShortTerm, Horizon::MediumTerm, Horizon::LongTerm];

    pub fn label(&self) -> &'static str {
        match self {
            Horizon::ShortTerm => "Short-term (2030)",
            Horizon::MediumTerm => "Medium-term (2040)",
            Horizon::LongTerm => "Long-term (2050)",
        }
    }

    pub fn year(&self) -> i32 {
        match self {
            Horizon::ShortTerm => 2030,
            Horizon::MediumTerm => 2040,
            Horizon::LongTerm => 2050,
        }
    }
}

/// A scenario variable that can drive a multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScenarioMetric {
    Temperature,
    CarbonPrice,
    GdpImpact,
    EnergyDemand,
    RenewableShare,
    FossilFuelDemand,
    Co2Emissions,
}

impl ScenarioMetric {
    pub const ALL: [ScenarioMetric; 7] = [
        ScenarioMetric::Temperature,
        ScenarioMetric::CarbonPrice,
        ScenarioMetric::GdpImpact,
        ScenarioMetric::EnergyDemand,
        ScenarioMetric::RenewableShare,
        ScenarioMetric::FossilFuelDemand,
        ScenarioMetric::Co2Emissions,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ScenarioMetric::Temperature => "temperature",
            ScenarioMetric::CarbonPrice => "carbonPrice",
            ScenarioMetric::GdpImpact => "gdpImpact",
            ScenarioMetric::EnergyDemand => "energyDemand",
            ScenarioMetric::RenewableShare => "renewableShare",
            ScenarioMetric::FossilFuelDemand => "fossilFuelDemand",
            ScenarioMetric::Co2Emissions => "co2Emissions",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScenarioMetric::Temperature => "Temperature Increase (°C)",
            ScenarioMetric::CarbonPrice => "Carbon Price (USD/tCO2)",
            ScenarioMetric::GdpImpact => "GDP Impact (%)",
            ScenarioMetric::EnergyDemand => "Energy Demand (EJ/yr)",
            ScenarioMetric::RenewableShare => "Renewable Share (%)",
            ScenarioMetric::FossilFuelDemand => "Fossil Fuel Demand (EJ/yr)",
            ScenarioMetric::Co2Emissions => "CO2 Emissions (GtCO2/yr)",
        }
    }

    /// Read this metric from a data point
    pub fn value(&self, point: &ScenarioDataPoint) -> Option<f64> {
        match self {
            ScenarioMetric::Temperature => point.temperature,
            ScenarioMetric::CarbonPrice => point.carbon_price,
            ScenarioMetric::GdpImpact => point.gdp_impact,
            ScenarioMetric::EnergyDemand => point.energy_demand,
            ScenarioMetric::RenewableShare => point.renewable_share,
            ScenarioMetric::FossilFuelDemand => point.fossil_fuel_demand,
            ScenarioMetric::Co2Emissions => point.co2_emissions,
        }
    }
}

impl FromStr for ScenarioMetric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScenarioMetric::ALL
            .iter()
            .copied()
            .find(|m| m.id() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown scenario metric '{}'", s))
    }
}

impl fmt::Display for ScenarioMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One (scenario, model, year) observation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDataPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub scenario: String,
    #[serde(default)]
    pub model: String,
    pub year: i32,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub carbon_price: Option<f64>,
    #[serde(default)]
    pub gdp_impact: Option<f64>,
    #[serde(default)]
    pub energy_demand: Option<f64>,
    #[serde(default)]
    pub renewable_share: Option<f64>,
    #[serde(default)]
    pub fossil_fuel_demand: Option<f64>,
    #[serde(default)]
    pub co2_emissions: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
}

/// A chronologically ordered series for one scenario
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioSeries {
    points: Vec<ScenarioDataPoint>,
}

impl ScenarioSeries {
    /// Order points by year; points sharing a year keep their input order
    pub fn from_points(mut points: Vec<ScenarioDataPoint>) -> Self {
        points.sort_by_key(|p| p.year);
        ScenarioSeries { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First chronological point
    pub fn baseline(&self) -> Option<&ScenarioDataPoint> {
        self.points.first()
    }

    /// First point observed in the given year
    pub fn at_year(&self, year: i32) -> Option<&ScenarioDataPoint> {
        self.points.iter().find(|p| p.year == year)
    }

    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.points.iter().map(|p| p.year).collect();
        years.dedup();
        years
    }
}

fn mean_of(points: &[&ScenarioDataPoint], metric: ScenarioMetric) -> f64 {
    let sum: f64 = points.iter().map(|p| metric.value(p).unwrap_or(0.0)).sum();
    sum / points.len() as f64
}

/// Cross-model "Average" series for one scenario
///
/// Each field is the per-year mean over every model's point for that year,
/// with null fields counted as 0.
pub fn aggregate_models(points: &[ScenarioDataPoint], scenario: &str) -> ScenarioSeries {
    let mut by_year: BTreeMap<i32, Vec<&ScenarioDataPoint>> = BTreeMap::new();
    for point in points.iter().filter(|p| p.scenario == scenario) {
        by_year.entry(point.year).or_default().push(point);
    }

    let averaged = by_year
        .into_iter()
        .map(|(year, group)| ScenarioDataPoint {
            id: Some(format!("avg-{}-{}", scenario, year)),
            scenario: scenario.to_string(),
            model: AVERAGE_MODEL.to_string(),
            year,
            temperature: Some(mean_of(&group, ScenarioMetric::Temperature)),
            carbon_price: Some(mean_of(&group, ScenarioMetric::CarbonPrice)),
            gdp_impact: Some(mean_of(&group, ScenarioMetric::GdpImpact)),
            energy_demand: Some(mean_of(&group, ScenarioMetric::EnergyDemand)),
            renewable_share: Some(mean_of(&group, ScenarioMetric::RenewableShare)),
            fossil_fuel_demand: Some(mean_of(&group, ScenarioMetric::FossilFuelDemand)),
            co2_emissions: Some(mean_of(&group, ScenarioMetric::Co2Emissions)),
            data_source: group.first().and_then(|p| p.data_source.clone()),
        })
        .collect();

    ScenarioSeries::from_points(averaged)
}

/// Series for a (scenario, model) selection
///
/// The "Average" model aggregates across models; any other model filters.
pub fn select_series(points: &[ScenarioDataPoint], scenario: &str, model: &str) -> ScenarioSeries {
    if model == AVERAGE_MODEL {
        return aggregate_models(points, scenario);
    }
    let selected = points
        .iter()
        .filter(|p| p.scenario == scenario && p.model == model)
        .cloned()
        .collect();
    ScenarioSeries::from_points(selected)
}
