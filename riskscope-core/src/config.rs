//! Configuration file support for Riskscope
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.riskscoperc.json` in the working directory
//! 3. `riskscope.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::framework::Framework;
use crate::impact::{ImpactAssumptions, OrganizationProfile};
use crate::scenario::{ScenarioMetric, AVERAGE_MODEL};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_SCENARIO: &str = "net-zero-2050";
const DEFAULT_HORIZON: i32 = 2030;

/// Riskscope configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskscopeConfig {
    /// Scoring framework: "standard" or "advanced" (default: standard)
    #[serde(default)]
    pub framework: Option<String>,

    /// Scenario id (default: net-zero-2050)
    #[serde(default)]
    pub scenario: Option<String>,

    /// Model id, or "Average" for the cross-model mean (default: Average)
    #[serde(default)]
    pub model: Option<String>,

    /// Horizon year for impact estimation (default: 2030)
    #[serde(default)]
    pub horizon: Option<i32>,

    /// Scenario metric driving the multiplier (default: carbonPrice)
    #[serde(default)]
    pub metric: Option<String>,

    /// Organization parameters for standalone estimation
    #[serde(default)]
    pub organization: Option<OrganizationConfig>,

    /// Overrides for the fixed impact assumptions
    #[serde(default)]
    pub assumptions: Option<AssumptionConfig>,
}

/// Organization parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrganizationConfig {
    pub name: Option<String>,
    /// Annual revenue in dollars (default: 100,000,000)
    pub annual_revenue: Option<f64>,
    /// tCO2e per $1M revenue (default: 2.5)
    pub carbon_intensity: Option<f64>,
    /// MWh per $1M revenue (default: 150)
    pub energy_intensity: Option<f64>,
    /// Risk score in [1, 5] (default: 3)
    pub risk_score: Option<f64>,
}

/// Impact assumption overrides
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssumptionConfig {
    /// Energy cost in $/MWh (default: 100)
    pub energy_unit_cost: Option<f64>,
    /// Share of revenue at risk per degree of warming (default: 0.01)
    pub revenue_at_risk_per_degree: Option<f64>,
    /// Assessment-mode display scale (default: 10)
    pub assessment_scale: Option<f64>,
}

/// Selection values given on the command line
///
/// Applied on top of the config file before validation, so a flag is held
/// to the same rules as the file field it replaces.
#[derive(Debug, Clone, Default)]
pub struct SelectionOverrides {
    pub framework: Option<String>,
    pub scenario: Option<String>,
    pub model: Option<String>,
    pub horizon: Option<i32>,
    pub metric: Option<String>,
}

/// Resolved configuration with defaults applied
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub framework: Framework,
    pub scenario: String,
    pub model: String,
    pub horizon: i32,
    pub metric: ScenarioMetric,
    pub organization: OrganizationProfile,
    pub assumptions: ImpactAssumptions,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

fn check_non_negative(name: &str, value: Option<f64>) -> Result<()> {
    if let Some(v) = value {
        if !v.is_finite() {
            anyhow::bail!("{} must be finite (got {})", name, v);
        }
        if v < 0.0 {
            anyhow::bail!("{} must be non-negative (got {})", name, v);
        }
    }
    Ok(())
}

impl RiskscopeConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref framework) = self.framework {
            framework
                .parse::<Framework>()
                .context("invalid framework")?;
        }

        if let Some(ref metric) = self.metric {
            metric.parse::<ScenarioMetric>().context("invalid metric")?;
        }

        if let Some(ref scenario) = self.scenario {
            if scenario.trim().is_empty() {
                anyhow::bail!("scenario must not be empty");
            }
        }

        if let Some(ref model) = self.model {
            if model.trim().is_empty() {
                anyhow::bail!("model must not be empty");
            }
        }

        if let Some(horizon) = self.horizon {
            if horizon <= 0 {
                anyhow::bail!("horizon must be a positive year (got {})", horizon);
            }
        }

        if let Some(ref org) = self.organization {
            check_non_negative("organization.annual_revenue", org.annual_revenue)?;
            check_non_negative("organization.carbon_intensity", org.carbon_intensity)?;
            check_non_negative("organization.energy_intensity", org.energy_intensity)?;
            if let Some(score) = org.risk_score {
                if !(1.0..=5.0).contains(&score) {
                    anyhow::bail!(
                        "organization.risk_score must be between 1 and 5 (got {})",
                        score
                    );
                }
            }
        }

        if let Some(ref a) = self.assumptions {
            for (name, val) in [
                ("assumptions.energy_unit_cost", a.energy_unit_cost),
                (
                    "assumptions.revenue_at_risk_per_degree",
                    a.revenue_at_risk_per_degree,
                ),
                ("assumptions.assessment_scale", a.assessment_scale),
            ] {
                check_non_negative(name, val)?;
            }
        }

        Ok(())
    }

    /// Replace file values with any command-line overrides
    pub fn apply_overrides(&mut self, overrides: &SelectionOverrides) {
        if let Some(ref framework) = overrides.framework {
            self.framework = Some(framework.clone());
        }
        if let Some(ref scenario) = overrides.scenario {
            self.scenario = Some(scenario.clone());
        }
        if let Some(ref model) = overrides.model {
            self.model = Some(model.clone());
        }
        if let Some(horizon) = overrides.horizon {
            self.horizon = Some(horizon);
        }
        if let Some(ref metric) = overrides.metric {
            self.metric = Some(metric.clone());
        }
    }

    /// Resolve config into the form used by the engine
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let framework = match &self.framework {
            Some(f) => f.parse()?,
            None => Framework::default(),
        };
        let metric = match &self.metric {
            Some(m) => m.parse()?,
            None => ScenarioMetric::CarbonPrice,
        };

        let defaults = OrganizationProfile::default();
        let organization = match &self.organization {
            Some(o) => OrganizationProfile {
                name: o.name.clone().unwrap_or(defaults.name),
                annual_revenue: o.annual_revenue.unwrap_or(defaults.annual_revenue),
                carbon_intensity: o.carbon_intensity.unwrap_or(defaults.carbon_intensity),
                energy_intensity: o.energy_intensity.unwrap_or(defaults.energy_intensity),
                risk_score: o.risk_score.unwrap_or(defaults.risk_score),
            },
            None => defaults,
        };

        let base = ImpactAssumptions::default();
        let assumptions = match &self.assumptions {
            Some(a) => ImpactAssumptions {
                energy_unit_cost: a.energy_unit_cost.unwrap_or(base.energy_unit_cost),
                revenue_at_risk_per_degree: a
                    .revenue_at_risk_per_degree
                    .unwrap_or(base.revenue_at_risk_per_degree),
                assessment_scale: a.assessment_scale.unwrap_or(base.assessment_scale),
            },
            None => base,
        };

        Ok(ResolvedConfig {
            framework,
            scenario: self
                .scenario
                .clone()
                .unwrap_or_else(|| DEFAULT_SCENARIO.to_string()),
            model: self
                .model
                .clone()
                .unwrap_or_else(|| AVERAGE_MODEL.to_string()),
            horizon: self.horizon.unwrap_or(DEFAULT_HORIZON),
            metric,
            organization,
            assumptions,
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        RiskscopeConfig::default().resolve()
    }
}

/// Discover and load a config file from the project root
///
/// Search order:
/// 1. `.riskscoperc.json`
/// 2. `riskscope.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(project_root: &Path) -> Result<Option<(RiskscopeConfig, PathBuf)>> {
    for name in [".riskscoperc.json", "riskscope.config.json"] {
        let path = project_root.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<RiskscopeConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: RiskscopeConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config for a project
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config from the project root.
/// Returns default config if nothing is found.
pub fn load_and_resolve(project_root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    load_and_resolve_with(project_root, config_path, &SelectionOverrides::default())
}

/// Load config, apply command-line overrides, then validate and resolve
pub fn load_and_resolve_with(
    project_root: &Path,
    config_path: Option<&Path>,
    overrides: &SelectionOverrides,
) -> Result<ResolvedConfig> {
    let (mut config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(project_root)? {
            Some((config, path)) => (config, Some(path)),
            None => (RiskscopeConfig::default(), None),
        }
    };

    config.apply_overrides(overrides);
    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config_is_valid() {
        let config = RiskscopeConfig::default();
        config.validate().expect("default config should be valid");
        let resolved = config.resolve().expect("default config should resolve");
        assert_eq!(resolved.framework, Framework::Standard);
        assert_eq!(resolved.scenario, "net-zero-2050");
        assert_eq!(resolved.model, "Average");
        assert_eq!(resolved.horizon, 2030);
        assert_eq!(resolved.metric, ScenarioMetric::CarbonPrice);
        assert_eq!(resolved.organization.annual_revenue, 100_000_000.0);
        assert_eq!(resolved.organization.risk_score, 3.0);
        assert_eq!(resolved.assumptions.energy_unit_cost, 100.0);
        assert_eq!(resolved.assumptions.assessment_scale, 10.0);
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "framework": "advanced",
            "scenario": "hot-house-world",
            "model": "GCAM",
            "horizon": 2050,
            "metric": "temperature",
            "organization": {
                "name": "Acme Cement",
                "annual_revenue": 250000000,
                "carbon_intensity": 40.0,
                "energy_intensity": 300.0,
                "risk_score": 4
            },
            "assumptions": {
                "energy_unit_cost": 120.0,
                "revenue_at_risk_per_degree": 0.02,
                "assessment_scale": 5
            }
        }"#;
        let config: RiskscopeConfig = serde_json::from_str(json).unwrap();
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.framework, Framework::Advanced);
        assert_eq!(resolved.scenario, "hot-house-world");
        assert_eq!(resolved.model, "GCAM");
        assert_eq!(resolved.horizon, 2050);
        assert_eq!(resolved.metric, ScenarioMetric::Temperature);
        assert_eq!(resolved.organization.name, "Acme Cement");
        assert_eq!(resolved.organization.risk_score, 4.0);
        assert_eq!(resolved.assumptions.energy_unit_cost, 120.0);
        assert_eq!(resolved.assumptions.assessment_scale, 5.0);
    }

    #[test]
    fn test_reject_unknown_fields() {
        let json = r#"{"unknown_field": true}"#;
        let result: Result<RiskscopeConfig, _> = serde_json::from_str(json);
        assert!(result.is_err(), "unknown fields should be rejected");
    }

    #[test]
    fn test_reject_unknown_framework() {
        let json = r#"{"framework": "expert"}"#;
        let config: RiskscopeConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_unknown_metric() {
        let json = r#"{"metric": "rainfall"}"#;
        let config: RiskscopeConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_risk_score_out_of_range() {
        for score in ["0.5", "5.5"] {
            let json = format!(r#"{{"organization": {{"risk_score": {}}}}}"#, score);
            let config: RiskscopeConfig = serde_json::from_str(&json).unwrap();
            assert!(config.validate().is_err(), "risk_score {} accepted", score);
        }
    }

    #[test]
    fn test_reject_negative_revenue() {
        let json = r#"{"organization": {"annual_revenue": -1.0}}"#;
        let config: RiskscopeConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_negative_assumption() {
        let json = r#"{"assumptions": {"energy_unit_cost": -5.0}}"#;
        let config: RiskscopeConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_non_positive_horizon() {
        let json = r#"{"horizon": 0}"#;
        let config: RiskscopeConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_organization_uses_defaults_for_rest() {
        let json = r#"{"organization": {"annual_revenue": 5000000}}"#;
        let config: RiskscopeConfig = serde_json::from_str(json).unwrap();
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.organization.annual_revenue, 5_000_000.0);
        assert_eq!(resolved.organization.carbon_intensity, 2.5); // default
        assert_eq!(resolved.organization.energy_intensity, 150.0); // default
        assert_eq!(resolved.organization.risk_score, 3.0); // default
    }

    #[test]
    fn test_discover_riskscoperc() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".riskscoperc.json");
        fs::write(&config_path, r#"{"horizon": 2040}"#).unwrap();

        let result = discover_config(dir.path()).unwrap();
        assert!(result.is_some());
        let (config, path) = result.unwrap();
        assert_eq!(config.horizon, Some(2040));
        assert_eq!(path, config_path);
    }

    #[test]
    fn test_discover_riskscope_config_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("riskscope.config.json"),
            r#"{"framework": "advanced"}"#,
        )
        .unwrap();

        let (config, _) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.framework.as_deref(), Some("advanced"));
    }

    #[test]
    fn test_discover_priority_order() {
        let dir = tempfile::tempdir().unwrap();

        // Create both config files - .riskscoperc.json should win
        fs::write(dir.path().join(".riskscoperc.json"), r#"{"horizon": 2030}"#).unwrap();
        fs::write(
            dir.path().join("riskscope.config.json"),
            r#"{"horizon": 2050}"#,
        )
        .unwrap();

        let (config, _) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(
            config.horizon,
            Some(2030),
            ".riskscoperc.json should take priority"
        );
    }

    #[test]
    fn test_no_config_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = discover_config(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_and_resolve_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = load_and_resolve(dir.path(), None).unwrap();
        assert!(resolved.config_path.is_none());
        assert_eq!(resolved.horizon, 2030);
    }

    #[test]
    fn test_load_and_resolve_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("custom.json");
        fs::write(&config_path, r#"{"metric": "gdpImpact"}"#).unwrap();

        let resolved = load_and_resolve(dir.path(), Some(&config_path)).unwrap();
        assert_eq!(resolved.metric, ScenarioMetric::GdpImpact);
        assert_eq!(resolved.config_path, Some(config_path));
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".riskscoperc.json");
        fs::write(&config_path, r#"{"framework": "expert"}"#).unwrap();

        let err = load_and_resolve(dir.path(), None).unwrap_err();
        assert!(format!("{:#}", err).contains(".riskscoperc.json"));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(".riskscoperc.json"),
            r#"{"scenario": "ndcs", "horizon": 2050, "model": "GCAM"}"#,
        )
        .unwrap();

        let overrides = SelectionOverrides {
            horizon: Some(2040),
            metric: Some("temperature".to_string()),
            ..Default::default()
        };
        let resolved = load_and_resolve_with(dir.path(), None, &overrides).unwrap();
        assert_eq!(resolved.scenario, "ndcs");
        assert_eq!(resolved.model, "GCAM");
        assert_eq!(resolved.horizon, 2040);
        assert_eq!(resolved.metric, ScenarioMetric::Temperature);
    }

    #[test]
    fn test_overrides_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let rejected = [
            SelectionOverrides {
                horizon: Some(0),
                ..Default::default()
            },
            SelectionOverrides {
                scenario: Some(String::new()),
                ..Default::default()
            },
            SelectionOverrides {
                model: Some("  ".to_string()),
                ..Default::default()
            },
            SelectionOverrides {
                metric: Some("rainfall".to_string()),
                ..Default::default()
            },
            SelectionOverrides {
                framework: Some("expert".to_string()),
                ..Default::default()
            },
        ];
        for overrides in &rejected {
            assert!(
                load_and_resolve_with(dir.path(), None, overrides).is_err(),
                "{:?} accepted",
                overrides
            );
        }
    }

    #[test]
    fn test_override_horizon_error_message() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = SelectionOverrides {
            horizon: Some(0),
            ..Default::default()
        };
        let err = load_and_resolve_with(dir.path(), None, &overrides).unwrap_err();
        assert!(format!("{:#}", err).contains("horizon must be a positive year"));
    }
}
