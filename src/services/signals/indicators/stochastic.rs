//! Stochastic Oscillator indicator.

use crate::services::signals::rolling::{
    last, lift, rolling_max, rolling_mean, rolling_min, zip_with, Line,
};
use crate::services::signals::{stochastic_vote, Reading, Signal};
use crate::types::{IndicatorGroup, Series};

/// Position of `value` inside its `[lowest, highest]` range, scaled to 0-100.
///
/// Undefined where the range is empty.
pub fn range_position(value: &[Option<f64>], lowest: &[Option<f64>], highest: &[Option<f64>]) -> Line {
    let above_low = zip_with(value, lowest, |v, l| v - l);
    let range = zip_with(highest, lowest, |h, l| h - l);
    zip_with(&above_low, &range, |a, r| 100.0 * a / r)
}

/// %K and %D lines.
pub fn stochastic_series(series: &Series, k_period: usize, d_period: usize) -> (Line, Line) {
    let closes = lift(&series.closes());
    let lowest = rolling_min(&lift(&series.lows()), k_period);
    let highest = rolling_max(&lift(&series.highs()), k_period);
    let k = range_position(&closes, &lowest, &highest);
    let d = rolling_mean(&k, d_period);
    (k, d)
}

/// Stochastic Oscillator.
///
/// Compares closing price to price range over a period:
/// %K = (Current Close - Lowest Low) / (Highest High - Lowest Low) * 100
///
/// Votes:
/// - %K and %D below 20 with %K above %D: buy
/// - %K and %D above 80 with %K below %D: sell
pub struct Stochastic {
    k_period: usize,
    d_period: usize,
}

impl Default for Stochastic {
    fn default() -> Self {
        Self {
            k_period: 14,
            d_period: 3,
        }
    }
}

impl Signal for Stochastic {
    fn id(&self) -> &str {
        "Stoch"
    }

    fn group(&self) -> IndicatorGroup {
        IndicatorGroup::Oscillators
    }

    fn min_periods(&self) -> usize {
        self.k_period + self.d_period - 1
    }

    fn evaluate(&self, series: &Series) -> Reading {
        let (k, d) = stochastic_series(series, self.k_period, self.d_period);
        let (Some(k), Some(d)) = (last(&k), last(&d)) else {
            return Reading::absent();
        };

        Reading::vote(Some(stochastic_vote(k, d)))
            .with("k", Some(k))
            .with("d", Some(d))
    }
}
