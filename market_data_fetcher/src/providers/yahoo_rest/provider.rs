use async_trait::async_trait;
use chrono::{DateTime, Utc};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use shared_utils::env::get_env_var_or;

use crate::{
    models::{
        bar::Bar, bar_series::BarSeries, quote::Quote, request_params::HistoryRequestParams,
    },
    providers::{
        DataProvider,
        errors::ProviderError,
        yahoo_rest::{
            params::{history_query, quote_query, validate_range},
            response::{ChartEnvelope, ChartResult},
        },
    },
};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Environment variable that overrides the chart endpoint base URL.
///
/// Pointing this at a local stub server lets integration tests exercise the
/// full request path without the real vendor.
pub const BASE_URL_ENV: &str = "YAHOO_BASE_URL";

// The chart endpoint rejects clients without a browser-ish user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) market_data_fetcher/0.1";

pub struct YahooProvider {
    client: Client,
    base_url: String,
    limiter: DefaultDirectRateLimiter,
}

impl YahooProvider {
    /// Creates a new Yahoo chart provider.
    ///
    /// No credentials are required. Requests are throttled to stay under the
    /// vendor's unauthenticated rate limit.
    pub fn new() -> Result<Self, ProviderError> {
        let base_url = get_env_var_or(BASE_URL_ENV, DEFAULT_BASE_URL);
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url,
            limiter: RateLimiter::direct(Quota::per_second(nonzero!(2u32))),
        })
    }

    async fn fetch_chart(
        &self,
        symbol: &str,
        query: &[(String, String)],
    ) -> Result<ChartResult, ProviderError> {
        self.limiter.until_ready().await;

        let url = format!("{}/v8/finance/chart/{symbol}", self.base_url);
        let response = self.client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            let error_msg = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(ProviderError::Api(error_msg));
        }

        let envelope = response.json::<ChartEnvelope>().await?;

        if let Some(err) = envelope.chart.error {
            return Err(ProviderError::Api(format!(
                "{}: {}",
                err.code, err.description
            )));
        }

        envelope
            .chart
            .result
            .into_iter()
            .flatten()
            .next()
            .ok_or_else(|| ProviderError::NoData(format!("no chart result for {symbol}")))
    }
}

#[async_trait]
impl DataProvider for YahooProvider {
    async fn fetch_history(&self, params: HistoryRequestParams) -> Result<BarSeries, ProviderError> {
        validate_range(&params)?;

        let chart = self
            .fetch_chart(&params.symbol, &history_query(&params))
            .await?;
        let columns = chart.indicators.quote.into_iter().next().ok_or_else(|| {
            ProviderError::NoData(format!("no quote columns for {}", params.symbol))
        })?;

        let mut bars = Vec::with_capacity(chart.timestamp.len());
        for (i, ts) in chart.timestamp.iter().enumerate() {
            // Null-padded rows carry no bar; the calendar keeps whatever the
            // vendor returns, so skipped rows simply don't appear.
            let ohlcv = (
                columns.open.get(i).copied().flatten(),
                columns.high.get(i).copied().flatten(),
                columns.low.get(i).copied().flatten(),
                columns.close.get(i).copied().flatten(),
                columns.volume.get(i).copied().flatten(),
            );
            let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = ohlcv else {
                continue;
            };
            let Some(date) = DateTime::from_timestamp(*ts, 0).map(|dt| dt.date_naive()) else {
                continue;
            };
            bars.push(Bar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        if bars.is_empty() {
            return Err(ProviderError::NoData(format!(
                "no historical data available for {}",
                params.symbol
            )));
        }

        Ok(BarSeries {
            symbol: params.symbol,
            bars,
        })
    }

    async fn latest_quote(&self, symbol: &str) -> Result<Quote, ProviderError> {
        let chart = self.fetch_chart(symbol, &quote_query()).await?;

        // Prefer the metadata price; fall back to the last non-null minute close.
        let fallback = chart
            .indicators
            .quote
            .first()
            .and_then(|q| q.close.iter().rev().find_map(|c| *c));
        let price = chart
            .meta
            .regular_market_price
            .or(fallback)
            .ok_or_else(|| ProviderError::NoData(format!("no current price for {symbol}")))?;

        let as_of = chart
            .meta
            .regular_market_time
            .and_then(|t| DateTime::from_timestamp(t, 0))
            .unwrap_or_else(Utc::now);

        Ok(Quote {
            symbol: symbol.to_string(),
            price,
            as_of,
        })
    }
}
