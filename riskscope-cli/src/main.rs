//! Riskscope CLI - climate risk scoring and scenario impact estimation

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use riskscope_core::config::{self, ResolvedConfig, SelectionOverrides};
use riskscope_core::report::{
    empty_impact_notice, render_heat_maps_text, render_impacts_text, render_json,
    render_records_text,
};
use riskscope_core::scenario::{Horizon, Scenario, ScenarioMetric};
use riskscope_core::{assess, estimate_impacts, load_records, load_scenario_points, Framework};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "riskscope")]
#[command(about = "Climate risk scoring, NGFS scenario heat maps and financial impact estimates")]
#[command(version = env!("RISKSCOPE_VERSION"))]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score risk records: metric columns, risk level, high-value flag
    Score {
        /// Path to a JSON array of risk records
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Scoring framework (overrides config file)
        #[arg(long)]
        framework: Option<FrameworkArg>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Render scenario projection heat maps for risk records
    Heatmap {
        /// Path to a JSON array of risk records
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Estimate financial impact from scenario data
    Impact {
        /// Path to a JSON array of scenario data points
        #[arg(long)]
        series: PathBuf,

        /// Risk records for assessment mode (omit for standalone mode)
        #[arg(long)]
        records: Option<PathBuf>,

        /// Scenario id (overrides config file)
        #[arg(long)]
        scenario: Option<String>,

        /// Model id, or "Average" (overrides config file)
        #[arg(long)]
        model: Option<String>,

        /// Horizon year (overrides config file)
        #[arg(long)]
        horizon: Option<i32>,

        /// Scenario metric id, e.g. carbonPrice (overrides config file)
        #[arg(long)]
        metric: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List canonical scenarios, horizons and scenario metrics
    Scenarios,
    /// Validate or show configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running anything
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FrameworkArg {
    Standard,
    Advanced,
}

impl From<FrameworkArg> for Framework {
    fn from(arg: FrameworkArg) -> Self {
        match arg {
            FrameworkArg::Standard => Framework::Standard,
            FrameworkArg::Advanced => Framework::Advanced,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Score {
            path,
            format,
            framework,
            config: config_path,
        } => {
            let overrides = SelectionOverrides {
                framework: framework.map(|f| Framework::from(f).as_str().to_string()),
                ..Default::default()
            };
            let resolved = load_config(config_path.as_deref(), &overrides)?;
            let framework = resolved.framework;

            let records = load_records(&require_file(&path)?)?;
            tracing::info!(count = records.len(), %framework, "scoring records");
            let assessment = assess(&records, framework);

            match format {
                OutputFormat::Text => print!(
                    "{}",
                    render_records_text(&assessment.records, Some(&assessment.summary))
                ),
                OutputFormat::Json => println!("{}", render_json(&assessment)?),
            }
        }
        Commands::Heatmap { path, format } => {
            let records = load_records(&require_file(&path)?)?;
            let maps = riskscope_core::projection::build_heat_maps(&records);
            if maps.len() < records.len() {
                eprintln!(
                    "Note: {} of {} record(s) have no scenario projections",
                    records.len() - maps.len(),
                    records.len()
                );
            }
            match format {
                OutputFormat::Text => print!("{}", render_heat_maps_text(&maps)),
                OutputFormat::Json => println!("{}", render_json(&maps)?),
            }
        }
        Commands::Impact {
            series,
            records,
            scenario,
            model,
            horizon,
            metric,
            format,
            config: config_path,
        } => {
            // CLI flags override config file values
            let overrides = SelectionOverrides {
                framework: None,
                scenario,
                model,
                horizon,
                metric,
            };
            let resolved = load_config(config_path.as_deref(), &overrides)?;

            let points = load_scenario_points(&require_file(&series)?)?;
            let records = match records {
                Some(path) => Some(load_records(&require_file(&path)?)?),
                None => None,
            };

            let rows = estimate_impacts(&points, records.as_deref(), &resolved);
            if rows.is_empty() {
                eprintln!("{}", empty_impact_notice(&resolved, records.is_none()));
            }

            match format {
                OutputFormat::Text => print!("{}", render_impacts_text(&rows)),
                OutputFormat::Json => println!("{}", render_json(&rows)?),
            }
        }
        Commands::Scenarios => print_catalog(),
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let project_root = std::env::current_dir()?;
                match config::load_and_resolve(&project_root, path.as_deref()) {
                    Ok(config) => {
                        if let Some(ref p) = config.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref())
                    .context("failed to load configuration")?;
                print_config(&resolved);
            }
        },
    }

    Ok(())
}

/// Load configuration from an explicit path or the current directory,
/// with command-line overrides applied before validation
fn load_config(
    config_path: Option<&Path>,
    overrides: &SelectionOverrides,
) -> anyhow::Result<ResolvedConfig> {
    let project_root = std::env::current_dir()?;
    let resolved = config::load_and_resolve_with(&project_root, config_path, overrides)
        .context("failed to load configuration")?;
    if let Some(path) = &resolved.config_path {
        eprintln!("Using config: {}", path.display());
    }
    Ok(resolved)
}

/// Normalize an input path to absolute and check it exists
fn require_file(path: &Path) -> anyhow::Result<PathBuf> {
    let normalized = if path.is_relative() {
        std::env::current_dir()?.join(path)
    } else {
        path.to_path_buf()
    };
    if !normalized.is_file() {
        anyhow::bail!("File does not exist: {}", normalized.display());
    }
    Ok(normalized)
}

fn print_catalog() {
    println!("Scenarios:");
    for scenario in Scenario::ALL {
        println!("  {:<20} {}", scenario.id(), scenario.label());
        println!("  {:<20} {}", "", scenario.description());
    }
    println!();
    println!("Horizons:");
    for horizon in Horizon::ALL {
        println!("  {:<20} {}", horizon.year(), horizon.label());
    }
    println!();
    println!("Metrics:");
    for metric in ScenarioMetric::ALL {
        println!("  {:<20} {}", metric.id(), metric.label());
    }
}

fn print_config(resolved: &ResolvedConfig) {
    println!("Configuration:");
    if let Some(ref p) = resolved.config_path {
        println!("  Source: {}", p.display());
    } else {
        println!("  Source: defaults (no config file found)");
    }
    println!();
    println!("Selection:");
    println!("  framework: {}", resolved.framework);
    println!("  scenario: {}", resolved.scenario);
    println!("  model: {}", resolved.model);
    println!("  horizon: {}", resolved.horizon);
    println!("  metric: {}", resolved.metric);
    println!();
    println!("Organization:");
    println!("  name: {}", resolved.organization.name);
    println!("  annual_revenue: {}", resolved.organization.annual_revenue);
    println!("  carbon_intensity: {}", resolved.organization.carbon_intensity);
    println!("  energy_intensity: {}", resolved.organization.energy_intensity);
    println!("  risk_score: {}", resolved.organization.risk_score);
    println!();
    println!("Assumptions:");
    println!("  energy_unit_cost: {}", resolved.assumptions.energy_unit_cost);
    println!(
        "  revenue_at_risk_per_degree: {}",
        resolved.assumptions.revenue_at_risk_per_degree
    );
    println!("  assessment_scale: {}", resolved.assumptions.assessment_scale);
}
