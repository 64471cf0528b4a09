//! Immutable snapshot view of a close series used by every analysis step.

use chrono::NaiveDate;
use market_data_fetcher::models::bar_series::BarSeries;

/// Dates and closing prices extracted once from a fetched [`BarSeries`].
///
/// All derived structures (MA lines, regime labels, crossover events,
/// buckets) are recomputed on demand from this snapshot; nothing mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseSeries {
    dates: Vec<NaiveDate>,
    closes: Vec<f64>,
}

impl CloseSeries {
    /// Extract the date/close columns from a fetched series.
    pub fn from_bars(series: &BarSeries) -> Self {
        Self {
            dates: series.dates(),
            closes: series.closes(),
        }
    }

    /// Build a snapshot directly from aligned columns.
    ///
    /// Callers must pass columns of equal length in ascending date order.
    pub fn from_columns(dates: Vec<NaiveDate>, closes: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), closes.len());
        Self { dates, closes }
    }

    /// Number of trading days in the snapshot.
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// Whether the snapshot holds no data.
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Closing prices in date order.
    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    /// Trading dates aligned 1:1 with [`closes`](Self::closes).
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Trading date at position `i`.
    pub fn date_at(&self, i: usize) -> Option<NaiveDate> {
        self.dates.get(i).copied()
    }

    /// The most recent stored close, if any.
    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    /// The trailing `n` (date, close) points, for display collaborators.
    pub fn trailing(&self, n: usize) -> Vec<(NaiveDate, f64)> {
        let start = self.len().saturating_sub(n);
        self.dates[start..]
            .iter()
            .copied()
            .zip(self.closes[start..].iter().copied())
            .collect()
    }
}
