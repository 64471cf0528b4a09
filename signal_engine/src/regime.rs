//! Market regime classification from a reference index moving average.
//!
//! The regime at each point is the percentage change of the reference MA
//! over a lookback window, tested against a symmetric threshold. Points
//! where either operand is undefined get an explicit [`Regime::Unknown`]
//! label instead of an out-of-band missing marker.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::indicators::MaLine;

/// Market-wide trend classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Regime {
    /// Reference MA rose more than the threshold over the lookback.
    Bullish,
    /// Reference MA fell more than the threshold over the lookback.
    Bearish,
    /// Change within ±threshold, bounds inclusive.
    Sideways,
    /// Insufficient history to classify.
    Unknown,
}

impl Regime {
    /// Whether this label carries a usable classification.
    pub fn is_known(&self) -> bool {
        !matches!(self, Regime::Unknown)
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // lowercase adjectives, as used in report sentences
        match self {
            Regime::Bullish => write!(f, "bullish"),
            Regime::Bearish => write!(f, "bearish"),
            Regime::Sideways => write!(f, "sideways"),
            Regime::Unknown => write!(f, "unknown"),
        }
    }
}

/// Label every point of a reference MA line.
///
/// At index `i`, pct = (ma[i] - ma[i-lookback]) / ma[i-lookback]. Bullish if
/// pct > threshold, Bearish if pct < -threshold, Sideways when the change
/// sits inside the closed interval [-threshold, threshold] (the boundary
/// itself classifies Sideways), and Unknown whenever either operand is
/// undefined or `i < lookback`. Total: exactly one label per point.
pub fn classify(reference_ma: &MaLine, lookback: usize, threshold: f64) -> Vec<Regime> {
    (0..reference_ma.len())
        .map(|i| {
            if i < lookback {
                return Regime::Unknown;
            }
            match (reference_ma[i], reference_ma[i - lookback]) {
                (Some(now), Some(then)) => {
                    let pct = (now - then) / then;
                    if pct > threshold {
                        Regime::Bullish
                    } else if pct < -threshold {
                        Regime::Bearish
                    } else {
                        Regime::Sideways
                    }
                }
                _ => Regime::Unknown,
            }
        })
        .collect()
}

/// Index regime labels by their trading date.
///
/// The labels were computed on the *reference* series, whose calendar can
/// differ from the instrument's (index holidays). Joining by date rather
/// than position keeps the two aligned; dates missing from the map simply
/// have no label.
pub fn label_by_date(dates: &[NaiveDate], labels: &[Regime]) -> IndexMap<NaiveDate, Regime> {
    dates.iter().copied().zip(labels.iter().copied()).collect()
}
