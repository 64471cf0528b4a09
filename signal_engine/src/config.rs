//! Session configuration: parsing, validation, and defaults.
//!
//! A TOML file can override any of the defaults below; omitted keys keep
//! their default value. Validation runs at load time so a bad parameter is
//! rejected before any data is fetched or computed.
//!
//! ```toml
//! history_days = 100
//! reference_symbol = "^NSEI"
//!
//! [regime]
//! ma_window = 50
//! lookback = 5
//! threshold = 0.005
//!
//! [backtest]
//! horizon_days = 5
//! ```

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use toml::from_str;

/// Parameters of the regime classifier's reference moving average.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegimeConfig {
    /// SMA window applied to the reference index, in trading days.
    pub ma_window: usize,
    /// Lookback distance for the percentage-change test, in points.
    pub lookback: usize,
    /// Symmetric classification threshold on the percentage change.
    pub threshold: f64,
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self {
            ma_window: 50,
            lookback: 5,
            threshold: 0.005,
        }
    }
}

/// Parameters of the historical backtest.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BacktestConfig {
    /// Forward-return horizon, in trading days.
    pub horizon_days: usize,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self { horizon_days: 5 }
    }
}

/// Full session configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Trailing calendar window fetched for both series, in days.
    pub history_days: u32,
    /// Market-breadth reference index driving the regime labels.
    pub reference_symbol: String,
    /// Regime classifier parameters.
    pub regime: RegimeConfig,
    /// Backtest parameters.
    pub backtest: BacktestConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_days: 100,
            reference_symbol: "^NSEI".to_string(),
            regime: RegimeConfig::default(),
            backtest: BacktestConfig::default(),
        }
    }
}

/// Reject parameter combinations that would only fail later, mid-request.
pub fn validate_config(cfg: &EngineConfig) -> anyhow::Result<()> {
    if cfg.history_days == 0 {
        bail!("history_days must be at least 1");
    }
    if cfg.reference_symbol.trim().is_empty() {
        bail!("reference_symbol cannot be empty");
    }
    if cfg.regime.ma_window == 0 {
        bail!("regime.ma_window must be at least 1");
    }
    if cfg.regime.lookback == 0 {
        bail!("regime.lookback must be at least 1");
    }
    if !(cfg.regime.threshold > 0.0) {
        bail!("regime.threshold must be positive");
    }
    if cfg.backtest.horizon_days == 0 {
        bail!("backtest.horizon_days must be at least 1");
    }
    Ok(())
}

/// Parse and validate a configuration from a TOML string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<EngineConfig> {
    let cfg: EngineConfig = from_str(toml_str).context("failed to parse config TOML")?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Read a configuration TOML file from disk, parse, and validate it.
pub fn load_config_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<EngineConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}
