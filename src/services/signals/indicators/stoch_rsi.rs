//! Stochastic RSI indicator.

use super::rsi::rsi_series;
use super::stochastic::range_position;
use crate::services::signals::rolling::{last, rolling_max, rolling_mean, rolling_min, Line};
use crate::services::signals::{stochastic_vote, Reading, Signal};
use crate::types::{IndicatorGroup, Series};

/// RSI fed through the stochastic formula, smoothed into %K and %D (0-100).
pub struct StochRsi {
    rsi_period: usize,
    stoch_period: usize,
    k_smooth: usize,
    d_smooth: usize,
}

impl Default for StochRsi {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            stoch_period: 14,
            k_smooth: 3,
            d_smooth: 3,
        }
    }
}

impl StochRsi {
    /// %K and %D lines.
    pub fn series(&self, closes: &[f64]) -> (Line, Line) {
        let rsi = rsi_series(closes, self.rsi_period, 100.0);
        let lowest = rolling_min(&rsi, self.stoch_period);
        let highest = rolling_max(&rsi, self.stoch_period);
        let raw = range_position(&rsi, &lowest, &highest);
        let k = rolling_mean(&raw, self.k_smooth);
        let d = rolling_mean(&k, self.d_smooth);
        (k, d)
    }
}

impl Signal for StochRsi {
    fn id(&self) -> &str {
        "StochRSI"
    }

    fn group(&self) -> IndicatorGroup {
        IndicatorGroup::Oscillators
    }

    fn min_periods(&self) -> usize {
        // RSI warm-up, then each rolling stage adds its window minus one.
        self.rsi_period + self.stoch_period + self.k_smooth + self.d_smooth - 2
    }

    fn evaluate(&self, series: &Series) -> Reading {
        let (k, d) = self.series(&series.closes());
        let (Some(k), Some(d)) = (last(&k), last(&d)) else {
            return Reading::absent();
        };

        Reading::vote(Some(stochastic_vote(k, d)))
            .with("k", Some(k))
            .with("d", Some(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::test_support::{flat, from_closes};

    fn zigzag(count: usize) -> Series {
        let closes: Vec<f64> = (0..count)
            .map(|i| 100.0 + (i as f64 * 0.9).sin() * 4.0 + i as f64 * 0.05)
            .collect();
        from_closes(&closes, 0.5)
    }

    #[test]
    fn test_stoch_rsi_min_periods() {
        let stoch_rsi = StochRsi::default();
        assert_eq!(stoch_rsi.min_periods(), 32);
        assert_eq!(stoch_rsi.evaluate(&zigzag(31)).vote, None);
        assert!(stoch_rsi.evaluate(&zigzag(32)).vote.is_some());
    }

    #[test]
    fn test_stoch_rsi_range() {
        let (k, d) = StochRsi::default().series(&zigzag(120).closes());
        for value in k.iter().chain(d.iter()).flatten() {
            assert!((0.0..=100.0 + 1e-9).contains(value), "out of range: {}", value);
        }
    }

    #[test]
    fn test_stoch_rsi_flat_rsi_is_absent() {
        assert_eq!(StochRsi::default().evaluate(&flat(60)).vote, None);
    }
}
