//! Scoring thresholds

use serde::{Deserialize, Serialize};

/// Thresholds used by [`super::ScoringPolicy`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum score for a signal to be valid
    #[serde(rename = "pass-score")]
    pub pass_score: i32,

    /// Confidence at or above this earns the confidence bonus
    #[serde(rename = "min-confidence")]
    pub min_confidence: f64,

    /// Strength at or above this earns the strength bonus
    #[serde(rename = "min-strength")]
    pub min_strength: f64,

    /// Buy signals earn the RSI bonus below this value
    #[serde(rename = "rsi-buy-ceiling")]
    pub rsi_buy_ceiling: f64,

    /// Sell signals earn the RSI bonus above this value
    #[serde(rename = "rsi-sell-floor")]
    pub rsi_sell_floor: f64,

    /// Review stage applies above this confidence...
    #[serde(rename = "review-confidence")]
    pub review_confidence: f64,

    /// ...and above this strength
    #[serde(rename = "review-strength")]
    pub review_strength: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            pass_score: 70,
            min_confidence: 60.0,
            min_strength: 50.0,
            rsi_buy_ceiling: 70.0,
            rsi_sell_floor: 30.0,
            review_confidence: 75.0,
            review_strength: 70.0,
        }
    }
}
