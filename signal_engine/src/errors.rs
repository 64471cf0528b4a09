//! Unified error type for analysis requests.
//!
//! Only genuinely erroneous conditions live here. "No crossover today" and
//! "regime indeterminate" are expected terminal outcomes of a request and
//! are modeled as [`crate::live::TodayAssessment`] variants instead.

use thiserror::Error;

/// The unified error type for the `signal_engine` crate.
///
/// Both variants are locally recoverable: the interaction loop reports the
/// message and continues with the next request.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Upstream fetch returned empty or no data; the request is aborted.
    #[error("No data available: {0}")]
    DataUnavailable(String),

    /// A parameter is out of range for the available history, or a request
    /// token was not recognized. Rejected before any computation runs.
    #[error("{0}")]
    InvalidParameter(String),
}
