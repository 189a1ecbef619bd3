//! Relative Strength Index (RSI) indicator.

use crate::services::signals::rolling::{last_two, lift, shift, wilder, zip_with, Line};
use crate::services::signals::{reversal_vote, Reading, Signal};
use crate::types::{IndicatorGroup, Series};

/// Wilder RSI of `closes`.
///
/// Gains and losses are smoothed with `alpha = 1 / period`, seeded with the
/// first price change; the first value appears once `period` changes have
/// been seen. Where the average loss is zero the ratio is undefined and
/// `zero_loss` is reported instead (100 for the indicator panel, 50 for the
/// weighted score's neutral fill).
pub fn rsi_series(closes: &[f64], period: usize, zero_loss: f64) -> Line {
    let closes = lift(closes);
    let change = zip_with(&closes, &shift(&closes, 1), |c, p| c - p);
    let gains: Line = change.iter().map(|c| c.map(|c| c.max(0.0))).collect();
    let losses: Line = change.iter().map(|c| c.map(|c| (-c).max(0.0))).collect();

    let avg_gain = wilder(&gains, period);
    let avg_loss = wilder(&losses, period);

    avg_gain
        .iter()
        .zip(avg_loss.iter())
        .map(|(gain, loss)| match (gain, loss) {
            (Some(_), Some(loss)) if *loss == 0.0 => Some(zero_loss),
            (Some(gain), Some(loss)) => Some(100.0 - 100.0 / (1.0 + gain / loss)),
            _ => None,
        })
        .collect()
}

/// RSI (Relative Strength Index) indicator.
///
/// Measures momentum by comparing the magnitude of recent gains to recent losses.
/// Values range from 0-100:
/// - Below 30 and turning up: buy
/// - Above 70 and turning down: sell
pub struct Rsi {
    period: usize,
}

impl Default for Rsi {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Signal for Rsi {
    fn id(&self) -> &str {
        "RSI"
    }

    fn group(&self) -> IndicatorGroup {
        IndicatorGroup::Oscillators
    }

    fn min_periods(&self) -> usize {
        self.period + 2
    }

    fn evaluate(&self, series: &Series) -> Reading {
        let line = rsi_series(&series.closes(), self.period, 100.0);
        let Some((prev, last)) = last_two(&line) else {
            return Reading::absent();
        };

        Reading::vote(Some(reversal_vote(prev, last, 30.0, 70.0)))
            .with("last", Some(last))
            .with("prev", Some(prev))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::rolling::last;
    use crate::services::signals::test_support::{
        decline_then_bounce, downtrend, flat, rally_then_dip, uptrend,
    };
    use crate::types::Vote;

    #[test]
    fn test_rsi_first_value_position() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + (i % 3) as f64).collect();
        let line = rsi_series(&closes, 14, 100.0);
        assert!(line[..14].iter().all(|v| v.is_none()));
        assert!(line[14].is_some());
    }

    #[test]
    fn test_rsi_min_periods() {
        let rsi = Rsi::default();
        assert_eq!(rsi.min_periods(), 16);
        assert_eq!(rsi.evaluate(&uptrend(15)).vote, None);
        assert!(rsi.evaluate(&uptrend(16)).vote.is_some());
    }

    #[test]
    fn test_rsi_all_gains_reads_zero_loss_value() {
        let closes: Vec<f64> = (1..=30).map(|i| i as f64).collect();
        assert_eq!(last(&rsi_series(&closes, 14, 100.0)), Some(100.0));
        assert_eq!(last(&rsi_series(&closes, 14, 50.0)), Some(50.0));
    }

    #[test]
    fn test_rsi_all_losses_is_zero() {
        let closes: Vec<f64> = (1..=30).map(|i| 100.0 - i as f64).collect();
        assert_eq!(last(&rsi_series(&closes, 14, 100.0)), Some(0.0));
    }

    #[test]
    fn test_rsi_value_range() {
        let closes: Vec<f64> = (0..100)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        for value in rsi_series(&closes, 14, 100.0).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&value), "RSI out of range: {}", value);
        }
    }

    #[test]
    fn test_rsi_uptrend_does_not_sell_while_rising() {
        let reading = Rsi::default().evaluate(&uptrend(50));
        assert_eq!(reading.vote, Some(Vote::Neutral));
        assert!(reading.raw["last"] > 70.0);
    }

    #[test]
    fn test_rsi_downtrend_low_value() {
        let reading = Rsi::default().evaluate(&downtrend(50));
        assert!(reading.raw["last"] < 30.0);
    }

    #[test]
    fn test_rsi_oversold_turning_up_buys() {
        let reading = Rsi::default().evaluate(&decline_then_bounce(40, 1));
        assert!(reading.raw["last"] < 30.0, "RSI {}", reading.raw["last"]);
        assert_eq!(reading.vote, Some(Vote::Buy));
    }

    #[test]
    fn test_rsi_overbought_turning_down_sells() {
        let reading = Rsi::default().evaluate(&rally_then_dip(40, 1));
        assert!(reading.raw["last"] > 70.0, "RSI {}", reading.raw["last"]);
        assert_eq!(reading.vote, Some(Vote::Sell));
    }

    #[test]
    fn test_rsi_flat_is_neutral() {
        assert_eq!(Rsi::default().evaluate(&flat(30)).vote, Some(Vote::Neutral));
    }
}
