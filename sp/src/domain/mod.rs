//! Domain types for signalpool
//!
//! Work items are anything implementing [`WorkItem`]. The concrete item the
//! CLI schedules is a trading [`Signal`]; each scheduled item yields exactly
//! one [`Outcome`].

mod outcome;
mod risk;
mod signal;

pub use outcome::{Outcome, PROCESSING_FAILED};
pub use risk::{Direction, RiskLevel};
pub use signal::{Indicators, Signal, SignalLoadError, TradeSignal, load_signals};

/// A unit of work the pool can schedule
///
/// The id is used to restore input ordering after parallel completion, so it
/// should be stable for the lifetime of one scheduling call.
pub trait WorkItem: Send + Sync {
    fn id(&self) -> &str;
}
