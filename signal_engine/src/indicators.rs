//! Moving-average engines over a closing-price series.
//!
//! All three engines return a line of the same length as their input,
//! aligned point-for-point. SMA and LWMA are undefined for the first
//! `window - 1` points; EMA is seeded at the first sample and defined
//! everywhere (the adjust=false smoothing convention), so callers must not
//! assume it shares the warm-up gap.

use crate::errors::AnalysisError;

/// A moving-average line aligned 1:1 with the closes it came from.
///
/// `None` marks points with insufficient history.
pub type MaLine = Vec<Option<f64>>;

/// Which moving-average engine to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaKind {
    /// Simple moving average.
    Sma,
    /// Linearly weighted moving average (weights favor recent samples).
    Lwma,
    /// Exponential moving average, seeded at the first sample.
    Ema,
}

impl MaKind {
    /// Short display label ("SMA", "LWMA", "EMA").
    pub const fn label(&self) -> &'static str {
        match self {
            MaKind::Sma => "SMA",
            MaKind::Lwma => "LWMA",
            MaKind::Ema => "EMA",
        }
    }

    /// Run this engine over `closes` with the given window.
    pub fn compute(&self, closes: &[f64], window: usize) -> Result<MaLine, AnalysisError> {
        match self {
            MaKind::Sma => sma(closes, window),
            MaKind::Lwma => lwma(closes, window),
            MaKind::Ema => ema(closes, window),
        }
    }
}

/// EMA smoothing factor α = 2 / (window + 1).
pub fn smoothing_factor(window: usize) -> f64 {
    2.0 / (window as f64 + 1.0)
}

fn ensure_window(window: usize) -> Result<(), AnalysisError> {
    if window == 0 {
        return Err(AnalysisError::InvalidParameter(
            "window must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Simple moving average.
///
/// Undefined for the first `window - 1` points. A window longer than the
/// series yields an all-undefined line rather than an error, so the engine
/// stays composable; interaction layers reject oversized windows up front.
pub fn sma(closes: &[f64], window: usize) -> Result<MaLine, AnalysisError> {
    ensure_window(window)?;
    let mut line: MaLine = vec![None; closes.len()];
    if window > closes.len() {
        return Ok(line);
    }

    let mut sum: f64 = closes[..window].iter().sum();
    line[window - 1] = Some(sum / window as f64);
    for i in window..closes.len() {
        sum += closes[i] - closes[i - window];
        line[i] = Some(sum / window as f64);
    }
    Ok(line)
}

/// Linearly weighted moving average.
///
/// Weight `k + 1` on the `k`-th sample of each window, so the most recent
/// sample counts most. Same undefined prefix as [`sma`].
pub fn lwma(closes: &[f64], window: usize) -> Result<MaLine, AnalysisError> {
    ensure_window(window)?;
    let mut line: MaLine = vec![None; closes.len()];
    if window > closes.len() {
        return Ok(line);
    }

    let denom = (window * (window + 1) / 2) as f64;
    for i in (window - 1)..closes.len() {
        let start = i + 1 - window;
        let num: f64 = closes[start..=i]
            .iter()
            .enumerate()
            .map(|(k, c)| c * (k + 1) as f64)
            .sum();
        line[i] = Some(num / denom);
    }
    Ok(line)
}

/// Exponential moving average, adjust=false convention.
///
/// `EMA[0] = closes[0]`, then `EMA[i] = closes[i]·α + EMA[i-1]·(1-α)` with
/// α = 2/(window+1). Defined at every point; no warm-up gap.
pub fn ema(closes: &[f64], window: usize) -> Result<MaLine, AnalysisError> {
    ensure_window(window)?;
    let alpha = smoothing_factor(window);

    let mut line = Vec::with_capacity(closes.len());
    let mut prev: Option<f64> = None;
    for &close in closes {
        let value = match prev {
            Some(p) => close * alpha + p * (1.0 - alpha),
            None => close,
        };
        prev = Some(value);
        line.push(Some(value));
    }
    Ok(line)
}
