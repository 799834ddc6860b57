//! Outcome validation policies

use tracing::debug;

use crate::domain::{Direction, RiskLevel, TradeSignal};

use super::config::ValidationConfig;

/// Decides whether a processed item is valid
///
/// Validation runs in two stages. `validate` is the pure verdict on the item
/// alone; `review` is the caller-level cross-check applied on top of it. The
/// pool always calls both, in that order.
pub trait ValidationPolicy<I>: Send + Sync {
    /// Pure verdict; must return the same answer for the same item
    fn validate(&self, item: &I) -> bool;

    /// Caller-level override of the verdict
    fn review(&self, _item: &I, valid: bool) -> bool {
        valid
    }
}

/// Accepts every item
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl<I> ValidationPolicy<I> for AcceptAll {
    fn validate(&self, _item: &I) -> bool {
        true
    }
}

/// Default policy for trading signals
///
/// Scores confidence, strength, risk, directional indicators and the
/// risk/reward ratio, then rejects high-risk signals that carry both high
/// confidence and high strength during review.
#[derive(Debug, Clone, Default)]
pub struct ScoringPolicy {
    config: ValidationConfig,
}

impl ScoringPolicy {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Raw score for a signal
    pub fn score<S: TradeSignal>(&self, signal: &S) -> i32 {
        let cfg = &self.config;
        let mut score = 0;

        if signal.confidence() >= cfg.min_confidence {
            score += 20;
        }
        if signal.strength() >= cfg.min_strength {
            score += 20;
        }

        score += match signal.risk() {
            RiskLevel::Low => 30,
            RiskLevel::Medium => 15,
            RiskLevel::High => -10,
        };

        let ind = signal.indicators();
        match signal.direction() {
            Direction::Buy => {
                if ind.rsi < cfg.rsi_buy_ceiling {
                    score += 15;
                }
                if ind.ema12 > ind.ema26 {
                    score += 10;
                }
                if ind.macd > 0.0 {
                    score += 5;
                }
            }
            Direction::Sell => {
                if ind.rsi > cfg.rsi_sell_floor {
                    score += 15;
                }
                if ind.ema12 < ind.ema26 {
                    score += 10;
                }
                if ind.macd < 0.0 {
                    score += 5;
                }
            }
        }

        // Undefined ratio falls through to the penalty
        score += match signal.risk_reward_ratio() {
            Some(ratio) if ratio >= 2.0 => 10,
            Some(ratio) if ratio >= 1.5 => 5,
            _ => -10,
        };

        score
    }

    /// Whether a raw score clears the pass mark
    pub fn passes(&self, score: i32) -> bool {
        score >= self.config.pass_score
    }
}

impl<S: TradeSignal> ValidationPolicy<S> for ScoringPolicy {
    fn validate(&self, item: &S) -> bool {
        self.passes(self.score(item))
    }

    fn review(&self, item: &S, valid: bool) -> bool {
        if item.confidence() > self.config.review_confidence && item.strength() > self.config.review_strength {
            let reviewed = valid && item.risk() != RiskLevel::High;
            if reviewed != valid {
                debug!(risk = %item.risk(), "ScoringPolicy::review: high-risk signal rejected");
            }
            return reviewed;
        }
        valid
    }
}
