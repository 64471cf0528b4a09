//! Analysis request variants and their uniform report.
//!
//! Each variant is a pure strategy over the instrument snapshot and the
//! live quote, selected by an enumerated request type rather than raw menu
//! characters. Every variant produces the same report shape: a formula
//! description, a Buy/Sell/Hold token, and the plotted series for chart
//! collaborators.

use chrono::NaiveDate;

use crate::{
    errors::AnalysisError,
    indicators::{self, MaKind, MaLine, smoothing_factor},
    series::CloseSeries,
};

/// Fixed trailing window, in points, for plotted series.
pub const DISPLAY_WINDOW: usize = 30;

/// The recommendation token of an analysis report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recommendation {
    /// Price action favors entering.
    Buy,
    /// Price action favors exiting.
    Sell,
    /// No clear ordering between the compared averages.
    Hold,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recommendation::Buy => write!(f, "Buy"),
            Recommendation::Sell => write!(f, "Sell"),
            Recommendation::Hold => write!(f, "Hold"),
        }
    }
}

/// One named moving-average line, restricted to the display window.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedLine {
    /// Display label, e.g. "SMA (20-day)".
    pub label: String,
    /// Trailing (date, value) points; `None` inside the warm-up prefix.
    pub points: Vec<(NaiveDate, Option<f64>)>,
}

/// Chart payload: the trailing closes plus one or more named MA lines.
///
/// Rendering is a collaborator concern; the engine only restricts the data
/// to the last [`DISPLAY_WINDOW`] points.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotSeries {
    /// Trailing (date, close) points of the instrument.
    pub closes: Vec<(NaiveDate, f64)>,
    /// The moving-average lines over the same trailing window.
    pub lines: Vec<NamedLine>,
}

/// Uniform result of one analysis request.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisReport {
    /// Human-readable description of the computation performed.
    pub formula: String,
    /// The Buy/Sell/Hold token.
    pub recommendation: Recommendation,
    /// Aligned series for chart-consuming collaborators.
    pub plot: PlotSeries,
}

/// Reference SMA window for the crossover-prediction flow.
///
/// Deliberately restricted to the two supported choices instead of a free
/// integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictionWindow {
    /// 10-day SMA.
    Ten,
    /// 50-day SMA.
    Fifty,
}

impl PredictionWindow {
    /// The window length in trading days.
    pub const fn days(&self) -> usize {
        match self {
            PredictionWindow::Ten => 10,
            PredictionWindow::Fifty => 50,
        }
    }
}

/// An enumerated analysis request over the instrument series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaStrategy {
    /// A single moving average of the chosen kind and window.
    SingleMa {
        /// Which engine to run.
        kind: MaKind,
        /// Window length in trading days.
        window: usize,
    },
    /// 5-day vs 20-day SMA comparison.
    DualSma,
    /// 5/10/20-day SMA ordering.
    TripleSma,
    /// 4/9/18/20-day SMA ordering.
    QuadSma,
    /// 10-day vs 50-day SMA comparison.
    SmaComparison,
}

impl MaStrategy {
    /// The largest window this variant needs; requests against shorter
    /// histories are rejected before any computation.
    pub fn required_history(&self) -> usize {
        match self {
            MaStrategy::SingleMa { window, .. } => *window,
            MaStrategy::DualSma | MaStrategy::TripleSma | MaStrategy::QuadSma => 20,
            MaStrategy::SmaComparison => 50,
        }
    }

    /// Run the strategy against the stored series and the live quote.
    pub fn run(&self, series: &CloseSeries, quote: f64) -> Result<AnalysisReport, AnalysisError> {
        if series.is_empty() {
            return Err(AnalysisError::DataUnavailable(
                "no historical data available for this symbol".to_string(),
            ));
        }
        let required = self.required_history();
        if required > series.len() {
            return Err(AnalysisError::InvalidParameter(format!(
                "Period ({required}) exceeds available data ({} days). Try a smaller period.",
                series.len()
            )));
        }

        match self {
            MaStrategy::SingleMa { kind, window } => single_ma(series, quote, *kind, *window),
            MaStrategy::DualSma => dual_sma(series),
            MaStrategy::TripleSma => triple_sma(series),
            MaStrategy::QuadSma => quad_sma(series),
            MaStrategy::SmaComparison => sma_comparison(series),
        }
    }
}

fn last_value(line: &MaLine) -> Result<f64, AnalysisError> {
    line.last().copied().flatten().ok_or_else(|| {
        AnalysisError::DataUnavailable("moving average undefined at the last stored bar".to_string())
    })
}

fn sma_line(series: &CloseSeries, window: usize) -> Result<(String, MaLine), AnalysisError> {
    let line = indicators::sma(series.closes(), window)?;
    Ok((format!("SMA({window})"), line))
}

fn plot(series: &CloseSeries, lines: Vec<(String, MaLine)>) -> PlotSeries {
    let closes = series.trailing(DISPLAY_WINDOW);
    let dates = series.dates();
    let start = dates.len().saturating_sub(DISPLAY_WINDOW);
    let lines = lines
        .into_iter()
        .map(|(label, line)| NamedLine {
            label,
            points: dates[start..]
                .iter()
                .copied()
                .zip(line[start..].iter().copied())
                .collect(),
        })
        .collect();
    PlotSeries { closes, lines }
}

fn single_ma(
    series: &CloseSeries,
    quote: f64,
    kind: MaKind,
    window: usize,
) -> Result<AnalysisReport, AnalysisError> {
    let line = kind.compute(series.closes(), window)?;
    let last_ma = last_value(&line)?;

    let formula = match kind {
        MaKind::Sma => format!("SMA({window}) = (Sum of last {window} closing prices) / {window}"),
        MaKind::Lwma => format!(
            "LWMA({window}) = (P1*1 + P2*2 + ... + P{window}*{window}) / (1 + 2 + ... + {window})"
        ),
        MaKind::Ema => {
            let alpha = smoothing_factor(window);
            format!(
                "EMA({window}) = (Close * {alpha:.3}) + (Previous EMA * {:.3})",
                1.0 - alpha
            )
        }
    };

    let recommendation = if quote > last_ma {
        Recommendation::Buy
    } else {
        Recommendation::Sell
    };

    let label = format!("{} ({window}-day)", kind.label());
    Ok(AnalysisReport {
        formula,
        recommendation,
        plot: plot(series, vec![(label, line)]),
    })
}

fn dual_sma(series: &CloseSeries) -> Result<AnalysisReport, AnalysisError> {
    let (label5, ma5) = sma_line(series, 5)?;
    let (label20, ma20) = sma_line(series, 20)?;
    let (last5, last20) = (last_value(&ma5)?, last_value(&ma20)?);

    let recommendation = if last5 > last20 {
        Recommendation::Buy
    } else if last5 < last20 {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    };

    Ok(AnalysisReport {
        formula: "Two Averages: SMA(5) and SMA(20) compared for crossovers".to_string(),
        recommendation,
        plot: plot(series, vec![(label5, ma5), (label20, ma20)]),
    })
}

fn triple_sma(series: &CloseSeries) -> Result<AnalysisReport, AnalysisError> {
    let (label5, ma5) = sma_line(series, 5)?;
    let (label10, ma10) = sma_line(series, 10)?;
    let (label20, ma20) = sma_line(series, 20)?;
    let (last5, last10, last20) = (last_value(&ma5)?, last_value(&ma10)?, last_value(&ma20)?);

    let recommendation = if last5 > last10 && last10 > last20 {
        Recommendation::Buy
    } else if last5 < last10 && last10 < last20 {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    };

    Ok(AnalysisReport {
        formula: "Triple Crossover: SMA(5), SMA(10), SMA(20) order determines trend".to_string(),
        recommendation,
        plot: plot(series, vec![(label5, ma5), (label10, ma10), (label20, ma20)]),
    })
}

fn quad_sma(series: &CloseSeries) -> Result<AnalysisReport, AnalysisError> {
    let (label4, ma4) = sma_line(series, 4)?;
    let (label9, ma9) = sma_line(series, 9)?;
    let (label18, ma18) = sma_line(series, 18)?;
    let (label20, ma20) = sma_line(series, 20)?;
    let last4 = last_value(&ma4)?;
    let last9 = last_value(&ma9)?;
    let last18 = last_value(&ma18)?;
    let last20 = last_value(&ma20)?;

    let recommendation = if last4 > last9 && last9 > last18 && last18 > last20 {
        Recommendation::Buy
    } else if last4 < last9 && last9 < last18 && last18 < last20 {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    };

    Ok(AnalysisReport {
        formula: "4-9-18-20 MA: SMA(4), SMA(9), SMA(18), SMA(20) order analysis".to_string(),
        recommendation,
        plot: plot(
            series,
            vec![(label4, ma4), (label9, ma9), (label18, ma18), (label20, ma20)],
        ),
    })
}

fn sma_comparison(series: &CloseSeries) -> Result<AnalysisReport, AnalysisError> {
    let (label10, ma10) = sma_line(series, 10)?;
    let (label50, ma50) = sma_line(series, 50)?;
    let (last10, last50) = (last_value(&ma10)?, last_value(&ma50)?);

    let recommendation = if last10 > last50 {
        Recommendation::Buy
    } else {
        Recommendation::Sell
    };

    Ok(AnalysisReport {
        formula: "10-day and 50-day SMA Comparison: If 10-day SMA > 50-day SMA, bullish; \
                  else bearish"
            .to_string(),
        recommendation,
        plot: plot(series, vec![(label10, ma10), (label50, ma50)]),
    })
}
