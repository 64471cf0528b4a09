use serde::Deserialize;

/// Top-level envelope of the chart endpoint.
#[derive(Deserialize, Debug)]
pub struct ChartEnvelope {
    pub chart: ChartPayload,
}

#[derive(Deserialize, Debug)]
pub struct ChartPayload {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ApiError>,
}

/// Vendor-reported error inside an HTTP 200 envelope.
#[derive(Deserialize, Debug)]
pub struct ApiError {
    pub code: String,
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct ChartResult {
    pub meta: ChartMeta,
    /// Epoch seconds, one entry per bar. Absent when the range is empty.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Deserialize, Debug)]
pub struct ChartMeta {
    pub symbol: String,
    #[serde(rename = "regularMarketPrice")]
    pub regular_market_price: Option<f64>,
    #[serde(rename = "regularMarketTime")]
    pub regular_market_time: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct Indicators {
    pub quote: Vec<QuoteColumns>,
}

/// Columnar OHLCV arrays aligned with `timestamp`; entries are null when the
/// vendor has no data for that slot.
#[derive(Deserialize, Debug)]
pub struct QuoteColumns {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}
