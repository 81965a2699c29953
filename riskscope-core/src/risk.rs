//! Risk level and heat-map tier classification
//!
//! Global invariants enforced:
//! - Pure functions of the score, no side effects
//! - No clamping: out-of-range scores walk the same inequality chain

use serde::{Deserialize, Serialize};

/// Discrete risk level label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,    // < 3
    Medium, // 3-4
    High,   // >= 4
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Heat-map severity bucket for scenario-projected scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeatTier {
    Low,        // <= 1.5
    MediumLow,  // <= 2.5
    Medium,     // <= 3.5
    High,       // <= 4.5
    VeryHigh,   // > 4.5
}

impl HeatTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeatTier::Low => "Low",
            HeatTier::MediumLow => "Medium-Low",
            HeatTier::Medium => "Medium",
            HeatTier::High => "High",
            HeatTier::VeryHigh => "Very High",
        }
    }
}

/// Score at or above which a record is High risk
pub const HIGH_RISK_THRESHOLD: f64 = 4.0;
/// Score at or above which a record is Medium risk
pub const MEDIUM_RISK_THRESHOLD: f64 = 3.0;

/// Classify a score into a risk level
///
/// score >= 4 → High, 3 <= score < 4 → Medium, otherwise Low.
pub fn classify_level(score: f64) -> RiskLevel {
    if score >= HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Assign a heat-map tier
///
/// Boundary values belong to the lower tier: exactly 2.5 is Medium-Low.
pub fn heat_tier(score: f64) -> HeatTier {
    if score <= 1.5 {
        HeatTier::Low
    } else if score <= 2.5 {
        HeatTier::MediumLow
    } else if score <= 3.5 {
        HeatTier::Medium
    } else if score <= 4.5 {
        HeatTier::High
    } else {
        HeatTier::VeryHigh
    }
}
