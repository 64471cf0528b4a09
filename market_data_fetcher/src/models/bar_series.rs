//! A collection of daily bars for a specific symbol.

use chrono::NaiveDate;

use crate::models::bar::Bar;

/// A complete daily time series for a single symbol.
///
/// The series is owned by whoever fetched it and read-only to everything
/// downstream; analysis code derives what it needs without mutating the
/// bars. Closing prices are accessible by position and by offset from the
/// most recent bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "RELIANCE.NS", "^NSEI").
    pub symbol: String,
    /// The OHLCV bars, strictly ascending by date.
    pub bars: Vec<Bar>,
}

impl BarSeries {
    /// Number of bars in the series.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series holds no bars at all.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing price at position `i` (0-indexed from the start).
    pub fn close_at(&self, i: usize) -> Option<f64> {
        self.bars.get(i).map(|b| b.close)
    }

    /// Closing price `offset` bars back from the end (`0` = most recent).
    pub fn close_from_end(&self, offset: usize) -> Option<f64> {
        let i = self.bars.len().checked_sub(offset + 1)?;
        self.close_at(i)
    }

    /// The most recent bar, if any.
    pub fn last_bar(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// All closing prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// All trading dates in order, aligned 1:1 with [`closes`](Self::closes).
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }
}
