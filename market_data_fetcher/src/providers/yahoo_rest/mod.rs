//! Yahoo Finance chart API provider.
//!
//! Unauthenticated REST endpoint: `GET {base}/v8/finance/chart/{symbol}`.
//! Daily history uses `range={n}d&interval=1d`; the live quote reuses the
//! same endpoint with `range=1d&interval=1m` and reads the regular-market
//! price from the chart metadata.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::YahooProvider;
