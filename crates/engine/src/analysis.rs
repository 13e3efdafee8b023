//! Portfolio analysis.
//!
//! No reasoning is performed yet: every request receives the same
//! moderate-risk assessment.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

/// Index product families a user can be steered towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    Stablecoin,
    Crypto,
    Hybrid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalysis {
    pub risk_profile: RiskProfile,
    pub recommended_index: IndexKind,
    pub diversification_score: f64,
    pub suggestions: Vec<String>,
}

pub struct PortfolioAnalyzer;

impl PortfolioAnalyzer {
    pub fn analyze() -> PortfolioAnalysis {
        PortfolioAnalysis {
            risk_profile: RiskProfile::Moderate,
            recommended_index: IndexKind::Hybrid,
            diversification_score: 7.5,
            suggestions: vec![
                "Consider reducing USDC allocation".to_string(),
                "Add more ETH exposure for growth potential".to_string(),
            ],
        }
    }
}
