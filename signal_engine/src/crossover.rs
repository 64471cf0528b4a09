//! Detection of price/moving-average crossovers.

use crate::indicators::MaLine;

/// Side of the moving-average line a crossover lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Price moved from below the MA to above it.
    Above,
    /// Price moved from above the MA to below it.
    Below,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Above => write!(f, "above"),
            Direction::Below => write!(f, "below"),
        }
    }
}

/// A crossover at one point of a series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrossoverEvent {
    /// Position in the series the crossover completed at.
    pub index: usize,
    /// Which side the price crossed to.
    pub direction: Direction,
}

/// The strict-inequality crossover rule, shared with the live evaluator.
///
/// Above iff the price was strictly below its MA and is now strictly above;
/// Below is the mirror image. Touching the line on either side produces no
/// crossover, so the two directions are mutually exclusive by construction.
pub fn direction_of(
    prev_close: f64,
    prev_ma: f64,
    now_close: f64,
    now_ma: f64,
) -> Option<Direction> {
    if prev_close < prev_ma && now_close > now_ma {
        Some(Direction::Above)
    } else if prev_close > prev_ma && now_close < now_ma {
        Some(Direction::Below)
    } else {
        None
    }
}

/// Flag every point where the price crossed its moving-average line.
///
/// Points where the MA is undefined on either side of the comparison
/// produce no event. At most one event per index.
pub fn detect_crossovers(closes: &[f64], ma: &MaLine) -> Vec<CrossoverEvent> {
    let len = closes.len().min(ma.len());
    let mut events = Vec::new();
    for i in 1..len {
        let (Some(prev_ma), Some(now_ma)) = (ma[i - 1], ma[i]) else {
            continue;
        };
        if let Some(direction) = direction_of(closes[i - 1], prev_ma, closes[i], now_ma) {
            events.push(CrossoverEvent { index: i, direction });
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crossing_above_and_below() {
        let closes = [95.0, 105.0, 95.0];
        let ma: MaLine = vec![Some(100.0), Some(100.0), Some(100.0)];
        let events = detect_crossovers(&closes, &ma);
        assert_eq!(
            events,
            vec![
                CrossoverEvent { index: 1, direction: Direction::Above },
                CrossoverEvent { index: 2, direction: Direction::Below },
            ]
        );
    }

    #[test]
    fn touching_the_line_is_not_a_crossover() {
        // equality on either side fails the strict test
        assert_eq!(direction_of(100.0, 100.0, 105.0, 100.0), None);
        assert_eq!(direction_of(95.0, 100.0, 100.0, 100.0), None);
        assert_eq!(direction_of(95.0, 100.0, 99.0, 100.0), None);
    }

    #[test]
    fn undefined_ma_suppresses_events() {
        let closes = [95.0, 105.0, 95.0];
        let ma: MaLine = vec![None, Some(100.0), Some(100.0)];
        let events = detect_crossovers(&closes, &ma);
        // index 1 needs ma[0]; only index 2 can fire
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].index, 2);
    }

    #[test]
    fn live_rule_scenario() {
        // yesterday close 95 < MA 100, today quote 105 > MA 100
        assert_eq!(
            direction_of(95.0, 100.0, 105.0, 100.0),
            Some(Direction::Above)
        );
    }
}
