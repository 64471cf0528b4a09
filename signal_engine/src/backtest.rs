//! Historical backtest: mean forward return per (regime, direction) bucket.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::{
    crossover::{CrossoverEvent, Direction},
    regime::Regime,
};

/// Percentage change from each close to the close `horizon` trading days
/// later: `(close[i+horizon] / close[i] - 1) * 100`.
///
/// Undefined (`None`) for the last `horizon` points.
pub fn forward_returns(closes: &[f64], horizon: usize) -> Vec<Option<f64>> {
    (0..closes.len())
        .map(|i| {
            closes
                .get(i + horizon)
                .map(|later| (later / closes[i] - 1.0) * 100.0)
        })
        .collect()
}

/// Aggregated outcome of one (regime, direction) bucket.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BucketStats {
    /// Arithmetic mean forward return, in percent.
    pub mean_pct: f64,
    /// How many qualifying crossover events the mean is built from.
    pub samples: usize,
}

/// Mean forward return per (regime, crossover-direction) bucket.
///
/// An explicit finite map over the cross product of the three known regimes
/// and the two directions. A bucket with zero qualifying events is absent
/// (`None`) — distinct from a bucket whose mean happens to be 0.0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BucketTable {
    cells: [[Option<BucketStats>; 2]; 3],
}

const REGIME_SLOTS: [Regime; 3] = [Regime::Bullish, Regime::Bearish, Regime::Sideways];
const DIRECTION_SLOTS: [Direction; 2] = [Direction::Above, Direction::Below];

fn regime_slot(regime: Regime) -> Option<usize> {
    match regime {
        Regime::Bullish => Some(0),
        Regime::Bearish => Some(1),
        Regime::Sideways => Some(2),
        Regime::Unknown => None,
    }
}

fn direction_slot(direction: Direction) -> usize {
    match direction {
        Direction::Above => 0,
        Direction::Below => 1,
    }
}

impl BucketTable {
    /// Look up a bucket. `None` means no qualifying event ever landed there;
    /// [`Regime::Unknown`] has no bucket and always yields `None`.
    pub fn get(&self, regime: Regime, direction: Direction) -> Option<BucketStats> {
        self.cells[regime_slot(regime)?][direction_slot(direction)]
    }

    /// Iterate the populated buckets in fixed (regime, direction) order.
    pub fn iter(&self) -> impl Iterator<Item = (Regime, Direction, BucketStats)> + '_ {
        REGIME_SLOTS.iter().flat_map(move |&regime| {
            DIRECTION_SLOTS.iter().filter_map(move |&direction| {
                self.get(regime, direction)
                    .map(|stats| (regime, direction, stats))
            })
        })
    }

    /// Whether no bucket is populated at all.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Join crossover events with regime labels and forward returns.
///
/// The regime is resolved by the event's trading *date* against the
/// reference calendar. Events with a missing or Unknown label, or an
/// undefined forward return, are discarded. Each surviving event
/// contributes to exactly one bucket; bucket value is the arithmetic mean.
/// Deterministic: identical inputs produce byte-identical means.
pub fn aggregate(
    events: &[CrossoverEvent],
    dates: &[NaiveDate],
    labels: &IndexMap<NaiveDate, Regime>,
    returns: &[Option<f64>],
) -> BucketTable {
    let mut sums = [[(0.0_f64, 0_usize); 2]; 3];

    for event in events {
        let Some(date) = dates.get(event.index) else {
            continue;
        };
        let Some(&regime) = labels.get(date) else {
            continue;
        };
        let Some(r) = regime_slot(regime) else {
            continue;
        };
        let Some(Some(fwd)) = returns.get(event.index).copied() else {
            continue;
        };
        let (sum, count) = &mut sums[r][direction_slot(event.direction)];
        *sum += fwd;
        *count += 1;
    }

    let mut table = BucketTable::default();
    for (r, row) in sums.iter().enumerate() {
        for (d, &(sum, count)) in row.iter().enumerate() {
            if count > 0 {
                table.cells[r][d] = Some(BucketStats {
                    mean_pct: sum / count as f64,
                    samples: count,
                });
            }
        }
    }
    tracing::debug!(
        events = events.len(),
        buckets = table.iter().count(),
        "aggregated crossover events"
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossover::CrossoverEvent;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn forward_returns_undefined_for_tail() {
        let closes = [100.0, 110.0, 121.0];
        let returns = forward_returns(&closes, 1);
        assert_eq!(returns[0], Some(10.0));
        assert!((returns[1].unwrap() - 10.0).abs() < 1e-12);
        assert_eq!(returns[2], None);
    }

    #[test]
    fn aggregate_groups_by_regime_and_direction() {
        let dates: Vec<NaiveDate> = (1..=8).map(day).collect();
        let labels: IndexMap<NaiveDate, Regime> = [
            (day(2), Regime::Bullish),
            (day(3), Regime::Bullish),
            (day(4), Regime::Bearish),
            (day(5), Regime::Unknown),
        ]
        .into_iter()
        .collect();
        let events = vec![
            CrossoverEvent { index: 1, direction: Direction::Above },
            CrossoverEvent { index: 2, direction: Direction::Above },
            CrossoverEvent { index: 3, direction: Direction::Below },
            CrossoverEvent { index: 4, direction: Direction::Above }, // Unknown label
            CrossoverEvent { index: 5, direction: Direction::Above }, // no label
        ];
        let returns = vec![
            Some(1.0),
            Some(2.0),
            Some(4.0),
            Some(-1.0),
            Some(8.0),
            Some(16.0),
            None,
            None,
        ];

        let table = aggregate(&events, &dates, &labels, &returns);

        let bullish_above = table.get(Regime::Bullish, Direction::Above).unwrap();
        assert_eq!(bullish_above.samples, 2);
        assert_eq!(bullish_above.mean_pct, 3.0); // mean(2.0, 4.0)

        let bearish_below = table.get(Regime::Bearish, Direction::Below).unwrap();
        assert_eq!(bearish_below.samples, 1);
        assert_eq!(bearish_below.mean_pct, -1.0);

        // Unknown and unlabeled events contributed nowhere.
        assert_eq!(table.iter().count(), 2);
    }

    #[test]
    fn undefined_forward_return_discards_event() {
        let dates = vec![day(1), day(2)];
        let labels: IndexMap<NaiveDate, Regime> =
            [(day(2), Regime::Sideways)].into_iter().collect();
        let events = vec![CrossoverEvent { index: 1, direction: Direction::Below }];
        let returns = vec![Some(1.0), None];

        let table = aggregate(&events, &dates, &labels, &returns);
        assert!(table.is_empty());
    }

    #[test]
    fn empty_bucket_is_absent_not_zero() {
        let dates = vec![day(1), day(2)];
        let labels: IndexMap<NaiveDate, Regime> =
            [(day(2), Regime::Bullish)].into_iter().collect();
        // one Bullish/Above event whose forward return is exactly zero
        let events = vec![CrossoverEvent { index: 1, direction: Direction::Above }];
        let returns = vec![Some(0.0), Some(0.0)];

        let table = aggregate(&events, &dates, &labels, &returns);

        let zero_mean = table.get(Regime::Bullish, Direction::Above).unwrap();
        assert_eq!(zero_mean.mean_pct, 0.0);
        // the (Bearish, Below) bucket never saw an event: absent, not 0.0
        assert_eq!(table.get(Regime::Bearish, Direction::Below), None);
    }

    #[test]
    fn unknown_regime_has_no_bucket() {
        let table = BucketTable::default();
        assert_eq!(table.get(Regime::Unknown, Direction::Above), None);
    }

    #[test]
    fn aggregation_is_deterministic() {
        let dates: Vec<NaiveDate> = (1..=6).map(day).collect();
        let labels: IndexMap<NaiveDate, Regime> = dates
            .iter()
            .map(|&d| (d, Regime::Sideways))
            .collect();
        let events = vec![
            CrossoverEvent { index: 1, direction: Direction::Above },
            CrossoverEvent { index: 3, direction: Direction::Above },
        ];
        let returns = vec![Some(0.3), Some(0.1), Some(0.7), Some(0.2), None, None];

        let a = aggregate(&events, &dates, &labels, &returns);
        let b = aggregate(&events, &dates, &labels, &returns);
        let mean_a = a.get(Regime::Sideways, Direction::Above).unwrap().mean_pct;
        let mean_b = b.get(Regime::Sideways, Direction::Above).unwrap().mean_pct;
        assert_eq!(mean_a.to_bits(), mean_b.to_bits());
    }
}
