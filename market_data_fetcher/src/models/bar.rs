//! Canonical in-memory representation of a daily time-series bar (OHLCV).
//!
//! This struct is the standard output of all [`DataProvider`](crate::providers::DataProvider)
//! implementations, regardless of vendor.

use chrono::NaiveDate;

/// A single daily OHLCV bar for a given trading date.
///
/// Bars are immutable once fetched and ordered strictly by date ascending,
/// one per trading day. Gaps in the vendor's calendar pass through
/// unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// The trading date for this bar.
    pub date: NaiveDate,

    /// Opening price.
    pub open: f64,

    /// Highest price during the session.
    pub high: f64,

    /// Lowest price during the session.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Volume traded during the session.
    pub volume: f64,
}
