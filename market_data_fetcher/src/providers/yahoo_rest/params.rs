use crate::{models::request_params::HistoryRequestParams, providers::errors::ProviderError};

/// Bar interval understood by the chart endpoint.
#[derive(Clone, Copy, Debug, Default)]
pub enum Interval {
    /// One bar per trading day.
    #[default]
    Day,
    /// One bar per minute (used only for the live quote request).
    Minute,
}

impl Interval {
    pub fn as_query_value(self) -> &'static str {
        match self {
            Interval::Day => "1d",
            Interval::Minute => "1m",
        }
    }
}

/// Validate universal params against this provider's rules.
pub fn validate_range(params: &HistoryRequestParams) -> Result<(), ProviderError> {
    if params.range_days == 0 {
        return Err(ProviderError::Validation(
            "range_days must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Query pairs for a daily-history chart request.
pub fn history_query(params: &HistoryRequestParams) -> Vec<(String, String)> {
    vec![
        ("range".to_string(), format!("{}d", params.range_days)),
        (
            "interval".to_string(),
            Interval::Day.as_query_value().to_string(),
        ),
    ]
}

/// Query pairs for a live-quote chart request (today's minute bars).
pub fn quote_query() -> Vec<(String, String)> {
    vec![
        ("range".to_string(), "1d".to_string()),
        (
            "interval".to_string(),
            Interval::Minute.as_query_value().to_string(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_range_rejected() {
        let params = HistoryRequestParams {
            symbol: "RELIANCE.NS".into(),
            range_days: 0,
        };
        assert!(matches!(
            validate_range(&params),
            Err(ProviderError::Validation(_))
        ));
    }

    #[test]
    fn history_query_encodes_range_and_interval() {
        let params = HistoryRequestParams {
            symbol: "RELIANCE.NS".into(),
            range_days: 100,
        };
        let q = history_query(&params);
        assert!(q.contains(&("range".to_string(), "100d".to_string())));
        assert!(q.contains(&("interval".to_string(), "1d".to_string())));
    }
}
