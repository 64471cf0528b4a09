//! The latest traded price for a symbol.

use chrono::{DateTime, Utc};

/// A point-in-time quote, fetched on demand for live evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// The quoted symbol.
    pub symbol: String,
    /// Last traded price.
    pub price: f64,
    /// When the vendor reported the price (UTC).
    pub as_of: DateTime<Utc>,
}
