//! MACD (Moving Average Convergence Divergence) indicator.

use crate::services::signals::rolling::{ema, last, lift, zip_with, Line};
use crate::services::signals::{Reading, Signal};
use crate::types::{IndicatorGroup, Series, Vote};

/// MACD line and signal line for the standard 12/26/9 configuration.
pub fn macd_series(closes: &[f64]) -> (Line, Line) {
    Macd::default().series(closes)
}

/// MACD indicator.
///
/// Shows the relationship between two EMAs:
/// - MACD Line = EMA(12) - EMA(26)
/// - Signal Line = EMA(9) of MACD Line
///
/// Votes buy while the MACD line is above the signal line and sell
/// otherwise. There is no neutral state.
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
}

impl Default for Macd {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

impl Macd {
    /// Both EMAs are seeded with the first close; the signal line starts
    /// at the first defined MACD value.
    pub fn series(&self, closes: &[f64]) -> (Line, Line) {
        let closes = lift(closes);
        let fast = ema(&closes, self.fast_period);
        let slow = ema(&closes, self.slow_period);
        let line = zip_with(&fast, &slow, |f, s| f - s);
        let signal = ema(&line, self.signal_period);
        (line, signal)
    }
}

impl Signal for Macd {
    fn id(&self) -> &str {
        "MACD"
    }

    fn group(&self) -> IndicatorGroup {
        IndicatorGroup::Oscillators
    }

    fn min_periods(&self) -> usize {
        self.slow_period + self.signal_period - 1
    }

    fn evaluate(&self, series: &Series) -> Reading {
        let (line, signal) = self.series(&series.closes());
        let (Some(line), Some(signal)) = (last(&line), last(&signal)) else {
            return Reading::absent();
        };

        let vote = if line > signal { Vote::Buy } else { Vote::Sell };
        Reading::vote(Some(vote))
            .with("line", Some(line))
            .with("signal", Some(signal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::test_support::{downtrend, flat, uptrend};

    #[test]
    fn test_macd_first_values() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let (line, signal) = macd_series(&closes);
        assert!(line[24].is_none());
        assert!(line[25].is_some());
        assert!(signal[32].is_none());
        assert!(signal[33].is_some());
    }

    #[test]
    fn test_macd_min_periods() {
        let macd = Macd::default();
        assert_eq!(macd.min_periods(), 34);
        assert_eq!(macd.evaluate(&uptrend(33)).vote, None);
        assert!(macd.evaluate(&uptrend(34)).vote.is_some());
    }

    #[test]
    fn test_macd_uptrend_buys() {
        let reading = Macd::default().evaluate(&uptrend(60));
        assert!(reading.raw["line"] > 0.0);
        assert_eq!(reading.vote, Some(Vote::Buy));
    }

    #[test]
    fn test_macd_downtrend_sells() {
        let reading = Macd::default().evaluate(&downtrend(60));
        assert!(reading.raw["line"] < 0.0);
        assert_eq!(reading.vote, Some(Vote::Sell));
    }

    #[test]
    fn test_macd_never_neutral() {
        // Equal lines on a flat series still resolve to a sell.
        assert_eq!(Macd::default().evaluate(&flat(60)).vote, Some(Vote::Sell));
    }
}
