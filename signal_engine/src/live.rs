//! Evaluation of whether "today" constitutes a fresh crossover.
//!
//! The stored series ends at yesterday's close; a live quote stands in for
//! today's. The crossover test reuses the strict rule from
//! [`crate::crossover`], with yesterday's MA on both sides of the
//! comparison since today's MA does not exist yet.

use crate::{
    backtest::{BucketStats, BucketTable},
    crossover::{Direction, direction_of},
    regime::Regime,
};

/// Outcome of a live evaluation.
///
/// Every variant is a normal terminal outcome of the request, not an error;
/// the interaction loop reports it and continues.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TodayAssessment {
    /// The current regime label is Unknown; sentiment cannot be determined.
    IndeterminateRegime,
    /// The quote did not cross the stored moving average.
    NoCrossover,
    /// A fresh crossover with historical precedent in the matching bucket.
    Precedent {
        /// Regime the precedent is conditioned on.
        regime: Regime,
        /// Direction of today's crossover.
        direction: Direction,
        /// Historical mean forward return and sample count for the bucket.
        stats: BucketStats,
        /// Forward-return horizon the mean was computed over, in days.
        horizon_days: usize,
    },
    /// A fresh crossover, but the matching bucket has no historical entry.
    NoPrecedent {
        /// Regime the lookup was conditioned on.
        regime: Regime,
        /// Direction of today's crossover.
        direction: Direction,
    },
}

impl TodayAssessment {
    /// Human-readable report sentence, given the MA window that was used.
    pub fn describe(&self, ma_window: usize) -> String {
        match self {
            TodayAssessment::IndeterminateRegime => {
                "Cannot determine current market sentiment due to insufficient data.".to_string()
            }
            TodayAssessment::NoCrossover => "No crossover detected today.".to_string(),
            TodayAssessment::Precedent {
                regime,
                direction,
                stats,
                horizon_days,
            } => format!(
                "Based on historical data, after a crossover {direction} the {ma_window}-day SMA \
                 in a {regime} market, the stock has moved an average of {:.2}% over the next \
                 {horizon_days} days.",
                stats.mean_pct
            ),
            TodayAssessment::NoPrecedent { regime, direction } => format!(
                "No historical data available for crossover {direction} in a {regime} market."
            ),
        }
    }
}

/// Decide what "today" means for the instrument.
///
/// Order matters and mirrors the request flow: an indeterminate regime is
/// reported before any crossover test; only a detected crossover triggers a
/// bucket lookup, and a missing bucket is reported distinctly from a bucket
/// whose mean is zero.
pub fn evaluate_today(
    last_close: f64,
    last_ma: Option<f64>,
    live_quote: f64,
    current_regime: Regime,
    buckets: &BucketTable,
    horizon_days: usize,
) -> TodayAssessment {
    if current_regime == Regime::Unknown {
        return TodayAssessment::IndeterminateRegime;
    }
    let Some(ma) = last_ma else {
        return TodayAssessment::NoCrossover;
    };
    match direction_of(last_close, ma, live_quote, ma) {
        None => TodayAssessment::NoCrossover,
        Some(direction) => match buckets.get(current_regime, direction) {
            Some(stats) => TodayAssessment::Precedent {
                regime: current_regime,
                direction,
                stats,
                horizon_days,
            },
            None => TodayAssessment::NoPrecedent {
                regime: current_regime,
                direction,
            },
        },
    }
}
