//! End-to-end scenario tests: indicators → regime → crossovers → backtest →
//! live evaluation, over hand-built series with known outcomes.

use chrono::NaiveDate;
use signal_engine::{
    backtest::{aggregate, forward_returns},
    crossover::{Direction, detect_crossovers},
    indicators::sma,
    live::{TodayAssessment, evaluate_today},
    regime::{Regime, classify, label_by_date},
    series::CloseSeries,
};

fn dates(n: usize) -> Vec<NaiveDate> {
    (0..n)
        .map(|i| NaiveDate::from_ymd_opt(2025, 6, 1).unwrap() + chrono::Duration::days(i as i64))
        .collect()
}

/// Instrument closes crafted so SMA(3) produces exactly two Above events,
/// one of which loses its forward return to the horizon tail.
const INSTRUMENT: [f64; 10] = [10.0, 10.0, 10.0, 7.0, 13.0, 10.0, 10.0, 7.0, 13.0, 13.0];

const HORIZON: usize = 2;
const LOOKBACK: usize = 3;

fn bullish_reference(n: usize) -> (Vec<NaiveDate>, Vec<Regime>) {
    // Reference index rising ~0.4% per day: every label beyond the lookback
    // prefix is Bullish at threshold 0.005.
    let closes: Vec<f64> = (0..n).map(|i| 100.0 * 1.004f64.powi(i as i32)).collect();
    let ma = sma(&closes, 1).unwrap();
    let labels = classify(&ma, LOOKBACK, 0.005);
    (dates(n), labels)
}

#[test]
fn backtest_pipeline_produces_the_expected_bucket() {
    let series = CloseSeries::from_columns(dates(INSTRUMENT.len()), INSTRUMENT.to_vec());
    let ma = sma(series.closes(), 3).unwrap();

    let events = detect_crossovers(series.closes(), &ma);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].index, 4);
    assert_eq!(events[0].direction, Direction::Above);
    assert_eq!(events[1].index, 8);
    assert_eq!(events[1].direction, Direction::Above);

    let (ref_dates, ref_labels) = bullish_reference(INSTRUMENT.len());
    let labels = label_by_date(&ref_dates, &ref_labels);

    let returns = forward_returns(series.closes(), HORIZON);
    // the second event sits inside the horizon tail and must be discarded
    assert!(returns[8].is_none());

    let buckets = aggregate(&events, series.dates(), &labels, &returns);

    let stats = buckets.get(Regime::Bullish, Direction::Above).unwrap();
    assert_eq!(stats.samples, 1);
    let expected = (INSTRUMENT[6] / INSTRUMENT[4] - 1.0) * 100.0;
    assert_eq!(stats.mean_pct.to_bits(), expected.to_bits());

    // nothing else ever fired
    assert_eq!(buckets.iter().count(), 1);
    assert_eq!(buckets.get(Regime::Bearish, Direction::Below), None);
}

#[test]
fn live_evaluation_reads_the_aggregated_bucket() {
    let series = CloseSeries::from_columns(dates(INSTRUMENT.len()), INSTRUMENT.to_vec());
    let ma = sma(series.closes(), 3).unwrap();
    let events = detect_crossovers(series.closes(), &ma);
    let (ref_dates, ref_labels) = bullish_reference(INSTRUMENT.len());
    let labels = label_by_date(&ref_dates, &ref_labels);
    let returns = forward_returns(series.closes(), HORIZON);
    let buckets = aggregate(&events, series.dates(), &labels, &returns);
    let current_regime = *ref_labels.last().unwrap();
    assert_eq!(current_regime, Regime::Bullish);

    // yesterday 95 below a stored MA of 100, live quote 105 above it
    let assessment = evaluate_today(95.0, Some(100.0), 105.0, current_regime, &buckets, HORIZON);
    match assessment {
        TodayAssessment::Precedent { regime, direction, stats, horizon_days } => {
            assert_eq!(regime, Regime::Bullish);
            assert_eq!(direction, Direction::Above);
            assert_eq!(horizon_days, HORIZON);
            let expected = (INSTRUMENT[6] / INSTRUMENT[4] - 1.0) * 100.0;
            assert_eq!(stats.mean_pct.to_bits(), expected.to_bits());
        }
        other => panic!("expected Precedent, got {other:?}"),
    }

    // the mirrored move has no historical bucket: absence, not a zero mean
    let assessment = evaluate_today(105.0, Some(100.0), 95.0, current_regime, &buckets, HORIZON);
    assert_eq!(
        assessment,
        TodayAssessment::NoPrecedent {
            regime: Regime::Bullish,
            direction: Direction::Below,
        }
    );

    // flat day: no crossover at all
    let assessment = evaluate_today(105.0, Some(100.0), 106.0, current_regime, &buckets, HORIZON);
    assert_eq!(assessment, TodayAssessment::NoCrossover);
}

#[test]
fn indeterminate_regime_gates_the_whole_evaluation() {
    let series = CloseSeries::from_columns(dates(INSTRUMENT.len()), INSTRUMENT.to_vec());
    let ma = sma(series.closes(), 3).unwrap();
    let events = detect_crossovers(series.closes(), &ma);

    // a reference history too short to classify anything
    let short_labels = classify(&sma(&[100.0, 100.0], 1).unwrap(), LOOKBACK, 0.005);
    assert!(short_labels.iter().all(|l| *l == Regime::Unknown));
    let labels = label_by_date(&dates(2), &short_labels);

    let returns = forward_returns(series.closes(), HORIZON);
    let buckets = aggregate(&events, series.dates(), &labels, &returns);
    assert!(buckets.is_empty());

    let current = *short_labels.last().unwrap();
    let assessment = evaluate_today(95.0, Some(100.0), 105.0, current, &buckets, HORIZON);
    assert_eq!(assessment, TodayAssessment::IndeterminateRegime);
}

#[test]
fn regime_scenario_one_percent_rise_per_five_points() {
    // rising 1% every 5 points at the default lookback and threshold
    let step = 1.01f64.powf(0.2);
    let ma: Vec<Option<f64>> = (0..40).map(|i| Some(100.0 * step.powi(i))).collect();
    let labels = classify(&ma, 5, 0.005);
    assert!(labels[..5].iter().all(|l| *l == Regime::Unknown));
    assert!(labels[5..].iter().all(|l| *l == Regime::Bullish));
}
