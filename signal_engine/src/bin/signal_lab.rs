use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use market_data_fetcher::{
    models::request_params::HistoryRequestParams,
    providers::{DataProvider, yahoo_rest::YahooProvider},
};
use shared_utils::market::Market;
use signal_engine::{
    backtest::{aggregate, forward_returns},
    config::{EngineConfig, load_config_path},
    crossover::detect_crossovers,
    errors::AnalysisError,
    indicators::{self, MaKind},
    live::evaluate_today,
    regime::{self, Regime},
    series::CloseSeries,
    strategy::{MaStrategy, PredictionWindow},
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Regime-conditioned moving-average crossover analysis")]
struct Cli {
    /// Instrument symbol with market suffix (e.g. RELIANCE.NS, TATAMOTORS.BO)
    symbol: String,

    /// Path to a session config file (TOML); defaults apply when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Override the configured history window, in calendar days
    #[arg(long)]
    days: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let symbol = cli.symbol.to_uppercase();
    let market = match Market::from_symbol(&symbol) {
        Ok(m) => m,
        Err(err) => {
            println!("{err}");
            return Ok(());
        }
    };

    let mut config = match &cli.config {
        Some(path) => load_config_path(path)?,
        None => EngineConfig::default(),
    };
    if let Some(days) = cli.days {
        config.history_days = days;
    }
    signal_engine::config::validate_config(&config)?;

    let rt = tokio::runtime::Runtime::new().context("start async runtime")?;
    let provider = YahooProvider::new().context("create data provider")?;

    println!("Welcome to the Stock Prediction Platform (Indian Stocks Only)");
    info!(%symbol, %market, history_days = config.history_days, "starting session");

    // Both series are fetched once and held read-only for the session.
    let hist = match rt.block_on(provider.fetch_history(HistoryRequestParams {
        symbol: symbol.clone(),
        range_days: config.history_days,
    })) {
        Ok(series) => series,
        Err(err) => {
            println!("Error fetching historical data: {err}");
            return Ok(());
        }
    };

    let reference = match rt.block_on(provider.fetch_history(HistoryRequestParams {
        symbol: config.reference_symbol.clone(),
        range_days: config.history_days,
    })) {
        Ok(series) => series,
        Err(err) => {
            println!(
                "Error fetching {} data. Cannot proceed with sentiment analysis: {err}",
                config.reference_symbol
            );
            return Ok(());
        }
    };

    let series = CloseSeries::from_bars(&hist);
    let reference = CloseSeries::from_bars(&reference);

    // Regime labels are derived from the reference index once per session.
    let reference_ma = indicators::sma(reference.closes(), config.regime.ma_window)?;
    let labels = regime::classify(&reference_ma, config.regime.lookback, config.regime.threshold);
    let current_regime = labels.last().copied().unwrap_or(Regime::Unknown);
    let labels_by_date = regime::label_by_date(reference.dates(), &labels);
    info!(
        bars = series.len(),
        reference_bars = reference.len(),
        %current_regime,
        "session data loaded"
    );

    let stdin = io::stdin();
    let mut input = stdin.lock().lines();

    loop {
        print_menu();
        let Some(choice) = prompt(&mut input, "Enter your choice: ")? else {
            break;
        };
        let choice = choice.to_lowercase();

        if choice == "q" {
            println!("Exiting the platform. Goodbye!");
            break;
        }

        let quote = match rt.block_on(provider.latest_quote(&symbol)) {
            Ok(quote) => quote,
            Err(err) => {
                println!("Error fetching current price: {err}");
                continue;
            }
        };
        println!("\nCurrent Price of {symbol}: ₹{:.2}", quote.price);

        let outcome = match choice.as_str() {
            "a" => run_single(&mut input, &series, quote.price, MaKind::Sma),
            "b" => run_single(&mut input, &series, quote.price, MaKind::Lwma),
            "c" => run_single(&mut input, &series, quote.price, MaKind::Ema),
            "d" => run_strategy(&series, quote.price, MaStrategy::DualSma),
            "e" => run_strategy(&series, quote.price, MaStrategy::TripleSma),
            "f" => run_strategy(&series, quote.price, MaStrategy::QuadSma),
            "g" => run_strategy(&series, quote.price, MaStrategy::SmaComparison),
            "h" => run_prediction(
                &mut input,
                &series,
                &labels_by_date,
                current_regime,
                &config,
                quote.price,
            ),
            _ => {
                println!("Invalid choice. Please select a valid option.");
                continue;
            }
        };

        // Every analysis failure is local to the request; the session goes on.
        if let Err(err) = outcome {
            println!("{err}");
        }
    }

    Ok(())
}

fn print_menu() {
    println!("\nSelect Moving Average Type:");
    println!("a: Simple Moving Average (SMA)");
    println!("b: Linearly Weighted Moving Average (LWMA)");
    println!("c: Exponentially Smoothed Moving Average (EMA)");
    println!("d: Two Averages (5-day and 20-day SMA)");
    println!("e: Triple Crossover Moving Average");
    println!("f: 4-9-18-20 Day Moving Average");
    println!("g: 10-day and 50-day SMA Comparison");
    println!("h: Predict movement after MA crossover");
    println!("q: Quit");
}

/// Print a prompt and read one trimmed line; `None` on end of input.
fn prompt(
    input: &mut impl Iterator<Item = io::Result<String>>,
    message: &str,
) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    match input.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn run_single(
    input: &mut impl Iterator<Item = io::Result<String>>,
    series: &CloseSeries,
    quote: f64,
    kind: MaKind,
) -> Result<()> {
    let answer = prompt(
        input,
        &format!("Enter the period (in days) for {}: ", kind.label()),
    )?;
    let Some(answer) = answer else {
        return Ok(());
    };
    let window: usize = answer.parse().map_err(|_| {
        AnalysisError::InvalidParameter(format!("'{answer}' is not a valid period"))
    })?;

    run_strategy(series, quote, MaStrategy::SingleMa { kind, window })
}

fn run_strategy(series: &CloseSeries, quote: f64, strategy: MaStrategy) -> Result<()> {
    let report = strategy.run(series, quote)?;
    debug!(
        points = report.plot.closes.len(),
        lines = report.plot.lines.len(),
        "plot series prepared for chart collaborators"
    );
    println!("\nMathematical Formula: {}", report.formula);
    println!("Recommendation: {}", report.recommendation);
    Ok(())
}

fn run_prediction(
    input: &mut impl Iterator<Item = io::Result<String>>,
    series: &CloseSeries,
    labels_by_date: &indexmap::IndexMap<chrono::NaiveDate, Regime>,
    current_regime: Regime,
    config: &EngineConfig,
    quote: f64,
) -> Result<()> {
    println!("Select MA for crossover prediction:");
    println!("1: 10-day SMA");
    println!("2: 50-day SMA");
    let answer = prompt(input, "Enter 1 or 2: ")?;
    let window = match answer.as_deref() {
        Some("1") => PredictionWindow::Ten,
        Some("2") => PredictionWindow::Fifty,
        Some(other) => {
            return Err(AnalysisError::InvalidParameter(format!(
                "'{other}' is not a valid choice"
            ))
            .into());
        }
        None => return Ok(()),
    };
    let days = window.days();
    if days > series.len() {
        return Err(AnalysisError::InvalidParameter(format!(
            "Period ({days}) exceeds available data ({} days). Try a smaller period.",
            series.len()
        ))
        .into());
    }

    let ma = indicators::sma(series.closes(), days)?;
    let events = detect_crossovers(series.closes(), &ma);
    let returns = forward_returns(series.closes(), config.backtest.horizon_days);
    let buckets = aggregate(&events, series.dates(), labels_by_date, &returns);
    info!(
        events = events.len(),
        buckets = buckets.iter().count(),
        window = days,
        "historical crossovers aggregated"
    );

    let last_close = series
        .last_close()
        .ok_or_else(|| AnalysisError::DataUnavailable("empty series".to_string()))?;
    let last_ma = ma.last().copied().flatten();

    let assessment = evaluate_today(
        last_close,
        last_ma,
        quote,
        current_regime,
        &buckets,
        config.backtest.horizon_days,
    );
    println!("{}", assessment.describe(days));
    Ok(())
}
