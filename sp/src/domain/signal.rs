//! Trading signal work item

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::WorkItem;
use super::risk::{Direction, RiskLevel};

/// Technical indicators carried by a signal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Indicators {
    pub rsi: f64,
    pub ema12: f64,
    pub ema26: f64,
    pub macd: f64,
}

/// A trading signal as produced by the upstream analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: String,

    #[serde(default)]
    pub symbol: String,

    #[serde(rename = "type")]
    pub direction: Direction,

    pub price: f64,

    #[serde(rename = "target-price", alias = "targetPrice", alias = "target_price")]
    pub target_price: f64,

    #[serde(rename = "stop-loss", alias = "stopLoss", alias = "stop_loss")]
    pub stop_loss: f64,

    pub confidence: f64,

    pub strength: f64,

    #[serde(default, alias = "riskLevel")]
    pub risk: RiskLevel,

    #[serde(default)]
    pub indicators: Indicators,
}

impl WorkItem for Signal {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Read access to the fields the scoring policy looks at
///
/// Implemented by [`Signal`]; callers with their own payload types can
/// implement it to reuse [`crate::validation::ScoringPolicy`].
pub trait TradeSignal {
    fn direction(&self) -> Direction;
    fn confidence(&self) -> f64;
    fn strength(&self) -> f64;
    fn risk(&self) -> RiskLevel;
    fn price(&self) -> f64;
    fn target_price(&self) -> f64;
    fn stop_loss(&self) -> f64;
    fn indicators(&self) -> Indicators;

    /// Expected return over downside risk, `None` when undefined
    fn risk_reward_ratio(&self) -> Option<f64> {
        let price = self.price();
        let expected_return = (self.target_price() - price).abs() / price;
        let downside_risk = (self.stop_loss() - price).abs() / price;
        if downside_risk == 0.0 || !downside_risk.is_finite() {
            return None;
        }
        let ratio = expected_return / downside_risk;
        ratio.is_finite().then_some(ratio)
    }
}

impl TradeSignal for Signal {
    fn direction(&self) -> Direction {
        self.direction
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }

    fn strength(&self) -> f64 {
        self.strength
    }

    fn risk(&self) -> RiskLevel {
        self.risk
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn target_price(&self) -> f64 {
        self.target_price
    }

    fn stop_loss(&self) -> f64 {
        self.stop_loss
    }

    fn indicators(&self) -> Indicators {
        self.indicators
    }
}

/// Errors loading a signal file
#[derive(Debug, Error)]
pub enum SignalLoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("No signals found in {0}")]
    Empty(PathBuf),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SignalFile {
    List(Vec<Signal>),
    Wrapped { signals: Vec<Signal> },
}

/// Load signals from a YAML or JSON file
///
/// Accepts either a bare list or a document with a top-level `signals` key.
pub fn load_signals<P: AsRef<Path>>(path: P) -> Result<Vec<Signal>, SignalLoadError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "load_signals: called");

    let content = fs::read_to_string(path).map_err(|source| SignalLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let file: SignalFile = serde_yaml::from_str(&content).map_err(|source| SignalLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let signals = match file {
        SignalFile::List(signals) => signals,
        SignalFile::Wrapped { signals } => signals,
    };

    if signals.is_empty() {
        debug!(path = %path.display(), "load_signals: file has no signals");
        return Err(SignalLoadError::Empty(path.to_path_buf()));
    }

    debug!(count = signals.len(), "load_signals: loaded");
    Ok(signals)
}
