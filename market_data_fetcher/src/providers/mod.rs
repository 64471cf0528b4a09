//! Provider abstraction for market data sources.
//!
//! This module defines the [`DataProvider`] trait, a unified interface for
//! fetching daily bar history and a live quote from any market data vendor.
//! Concrete implementations (such as [`yahoo_rest::YahooProvider`]) handle
//! vendor-specific endpoints, response shapes, and validation.
//!
//! The trait is async and object-safe, so callers can hold a
//! `Box<dyn DataProvider>` and select the vendor at runtime.

pub mod errors;
pub mod yahoo_rest;

use async_trait::async_trait;

use crate::{
    models::{bar_series::BarSeries, quote::Quote, request_params::HistoryRequestParams},
    providers::errors::ProviderError,
};

/// A source of daily bar history and live quotes.
#[async_trait]
pub trait DataProvider {
    /// Fetch daily OHLCV history for one symbol.
    async fn fetch_history(&self, params: HistoryRequestParams) -> Result<BarSeries, ProviderError>;

    /// Fetch the latest traded price for one symbol.
    async fn latest_quote(&self, symbol: &str) -> Result<Quote, ProviderError>;
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::bar::Bar;

    struct CannedProvider;

    #[async_trait]
    impl DataProvider for CannedProvider {
        async fn fetch_history(
            &self,
            params: HistoryRequestParams,
        ) -> Result<BarSeries, ProviderError> {
            Ok(BarSeries {
                symbol: params.symbol,
                bars: vec![Bar {
                    date: chrono::NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
                    open: 10.0,
                    high: 11.0,
                    low: 9.0,
                    close: 10.5,
                    volume: 100.0,
                }],
            })
        }

        async fn latest_quote(&self, symbol: &str) -> Result<Quote, ProviderError> {
            Ok(Quote {
                symbol: symbol.to_string(),
                price: 10.75,
                as_of: Utc::now(),
            })
        }
    }

    #[tokio::test]
    async fn trait_is_object_safe() {
        let provider: Box<dyn DataProvider> = Box::new(CannedProvider);
        let series = provider
            .fetch_history(HistoryRequestParams {
                symbol: "RELIANCE.NS".into(),
                range_days: 100,
            })
            .await
            .unwrap();
        assert_eq!(series.symbol, "RELIANCE.NS");
        assert_eq!(series.len(), 1);

        let quote = provider.latest_quote("RELIANCE.NS").await.unwrap();
        assert_eq!(quote.price, 10.75);
    }
}
