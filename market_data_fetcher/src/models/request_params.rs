use serde::{Deserialize, Serialize};

/// Universal parameters for requesting daily history from any provider.
///
/// Vendor-agnostic: each [`DataProvider`](crate::providers::DataProvider)
/// implementation translates these into its own query format and applies its
/// own validation rules.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryRequestParams {
    /// Symbol to request (e.g., "RELIANCE.NS", "^NSEI").
    pub symbol: String,

    /// Trailing calendar window, in days, counted back from today.
    ///
    /// Providers return the daily bars that fall inside this window; the
    /// number of *trading* days returned is smaller (weekends, holidays).
    pub range_days: u32,
}
