//! Typed handling of the two recognized Indian equity markets.
//!
//! Instrument symbols carry their market as a suffix (`RELIANCE.NS`,
//! `TATAMOTORS.BO`). Parsing the suffix up front gives callers a typed
//! [`Market`] instead of ad-hoc `ends_with` checks, and rejects anything
//! else before a single request is made.

use std::fmt;

use thiserror::Error;

/// The symbol does not carry a recognized market suffix.
#[derive(Debug, Error)]
#[error("unrecognized symbol '{0}': use .NS for NSE stocks or .BO for BSE stocks (e.g., RELIANCE.NS)")]
pub struct UnknownMarketError(pub String);

/// Exchange a symbol trades on, derived from its suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Market {
    /// National Stock Exchange (`.NS` suffix).
    Nse,
    /// Bombay Stock Exchange (`.BO` suffix).
    Bse,
}

impl Market {
    /// Parse the market from a full symbol's suffix.
    ///
    /// The comparison is case-sensitive on the suffix; symbols are expected
    /// uppercased by the interaction layer before this call.
    pub fn from_symbol(symbol: &str) -> Result<Self, UnknownMarketError> {
        if symbol.ends_with(".NS") {
            Ok(Self::Nse)
        } else if symbol.ends_with(".BO") {
            Ok(Self::Bse)
        } else {
            Err(UnknownMarketError(symbol.to_string()))
        }
    }

    /// The symbol suffix for this market.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Nse => ".NS",
            Self::Bse => ".BO",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nse => write!(f, "NSE"),
            Self::Bse => write!(f, "BSE"),
        }
    }
}
