//! Risk and opportunity records as produced by upstream analysis
//!
//! Records are immutable inputs. Nothing in this crate mutates a record;
//! every derived value is recomputed from the record on access.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level record category
///
/// Unknown categories are preserved verbatim and treated as risks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Transition,
    Physical,
    Opportunity,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Transition => "transition",
            Category::Physical => "physical",
            Category::Opportunity => "opportunity",
            Category::Other(raw) => raw,
        }
    }

    pub fn is_opportunity(&self) -> bool {
        matches!(self, Category::Opportunity)
    }
}

impl From<String> for Category {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "transition" => Category::Transition,
            "physical" => Category::Physical,
            "opportunity" => Category::Opportunity,
            _ => Category::Other(raw),
        }
    }
}

impl From<&str> for Category {
    fn from(raw: &str) -> Self {
        Category::from(raw.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A citation as rendered by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub relevance: String,
}

/// A source entry: either a full citation or a bare URL string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceEntry {
    Url(String),
    Citation(Citation),
}

/// Peer rankings, 1 = best and 6 = worst
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerRankings {
    pub impact: Option<u8>,
    pub likelihood: Option<u8>,
    pub vulnerability: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerComparison {
    #[serde(default)]
    pub peers: Vec<String>,
    #[serde(default)]
    pub rankings: PeerRankings,
    #[serde(default)]
    pub rationale: Option<String>,
}

/// One assessed risk or opportunity item
///
/// Metric scores are nominally integers in [1, 5] but are stored as read:
/// absent, zero, or out-of-range values are all representable here and
/// resolved by the accessors in [`crate::framework`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRecord {
    #[serde(default)]
    pub id: String,
    pub category: Category,
    #[serde(default)]
    pub subcategory: String,

    // Standard framework metrics
    #[serde(default)]
    pub impact_score: Option<i32>,
    #[serde(default)]
    pub likelihood_score: Option<i32>,
    #[serde(default)]
    pub vulnerability_score: Option<i32>,

    // Advanced framework metrics for risks
    #[serde(default)]
    pub exposure_score: Option<i32>,
    #[serde(default)]
    pub strategic_misalignment_score: Option<i32>,
    #[serde(default)]
    pub mitigation_readiness_score: Option<i32>,

    // Advanced framework metrics for opportunities
    #[serde(default)]
    pub market_readiness_score: Option<i32>,
    #[serde(default)]
    pub value_creation_score: Option<i32>,
    #[serde(default)]
    pub feasibility_score: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_horizon: Option<String>,
    #[serde(default)]
    pub overall_risk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceEntry>,
    /// Either a nested JSON object or a serialized JSON string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_projections: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_comparison: Option<PeerComparison>,
    #[serde(default)]
    pub is_ai_generated: bool,
}

/// Overall risk used when a record carries none
pub const DEFAULT_OVERALL_RISK: f64 = 3.0;

impl RiskRecord {
    /// Create an empty record with the given identity
    pub fn new(id: impl Into<String>, category: Category, subcategory: impl Into<String>) -> Self {
        RiskRecord {
            id: id.into(),
            category,
            subcategory: subcategory.into(),
            impact_score: None,
            likelihood_score: None,
            vulnerability_score: None,
            exposure_score: None,
            strategic_misalignment_score: None,
            mitigation_readiness_score: None,
            market_readiness_score: None,
            value_creation_score: None,
            feasibility_score: None,
            time_horizon: None,
            overall_risk: None,
            narrative: None,
            reasoning: None,
            sources: Vec::new(),
            scenario_projections: None,
            peer_comparison: None,
            is_ai_generated: false,
        }
    }

    /// Overall risk for display and classification (absent or zero reads as 3)
    pub fn overall_risk_or_default(&self) -> f64 {
        match self.overall_risk {
            Some(v) if v != 0.0 && !v.is_nan() => v,
            _ => DEFAULT_OVERALL_RISK,
        }
    }

    /// Overall risk for portfolio aggregates (absent or zero reads as 0)
    pub fn overall_risk_or_zero(&self) -> f64 {
        match self.overall_risk {
            Some(v) if !v.is_nan() => v,
            _ => 0.0,
        }
    }

    /// Sources in citation shape; bare URLs get a positional title
    pub fn normalized_sources(&self) -> Vec<Citation> {
        self.sources
            .iter()
            .enumerate()
            .map(|(index, entry)| match entry {
                SourceEntry::Url(url) => Citation {
                    title: format!("Source {}", index + 1),
                    url: url.clone(),
                    organization: String::new(),
                    relevance: String::new(),
                },
                SourceEntry::Citation(citation) => citation.clone(),
            })
            .collect()
    }
}

/// Human title and description for a (category, subcategory) pair
pub fn category_title(category: &Category, subcategory: &str) -> (String, &'static str) {
    let known = match (category, subcategory) {
        (Category::Transition, "policy_legal") => {
            Some(("Policy & Legal", "Carbon pricing, regulations, litigation"))
        }
        (Category::Transition, "technology") => {
            Some(("Technology", "Product substitution, tech disruption"))
        }
        (Category::Transition, "market") => Some(("Market", "Demand shifts, material costs")),
        (Category::Transition, "reputation") => {
            Some(("Reputation", "Stakeholder concerns, industry stigma"))
        }
        (Category::Physical, "acute") => Some(("Acute Physical", "Extreme weather events")),
        (Category::Physical, "chronic") => {
            Some(("Chronic Physical", "Long-term climate pattern shifts"))
        }
        (Category::Opportunity, "resource_efficiency") => Some((
            "Resource Efficiency",
            "Energy/water savings, waste reduction",
        )),
        (Category::Opportunity, "energy_source") => {
            Some(("Energy Source", "Low-emission alternatives, incentives"))
        }
        (Category::Opportunity, "products_services") => Some((
            "Products/Services",
            "New climate solutions, R&D innovation",
        )),
        (Category::Opportunity, "markets") => Some((
            "Markets",
            "Access to new markets, public sector incentives",
        )),
        (Category::Opportunity, "resilience") => Some((
            "Resilience",
            "Supply chain diversification, resource substitutes",
        )),
        _ => None,
    };

    match known {
        Some((title, description)) => (title.to_string(), description),
        None => (subcategory.to_string(), ""),
    }
}
