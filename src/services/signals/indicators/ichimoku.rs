//! Ichimoku baseline (Kijun-sen).

use crate::services::signals::rolling::{last, lift, rolling_max, rolling_min, zip_with, Line};
use crate::services::signals::{Reading, Signal};
use crate::types::{IndicatorGroup, Series, Vote};

/// Midpoint of the highest high and lowest low over `period` bars.
pub fn baseline_series(series: &Series, period: usize) -> Line {
    let highest = rolling_max(&lift(&series.highs()), period);
    let lowest = rolling_min(&lift(&series.lows()), period);
    zip_with(&highest, &lowest, |h, l| (h + l) / 2.0)
}

/// Kijun baseline vote.
///
/// The close must clear the baseline by a small relative margin before it
/// counts as above or below it.
pub struct Ichimoku {
    period: usize,
}

impl Default for Ichimoku {
    fn default() -> Self {
        Self { period: 26 }
    }
}

impl Ichimoku {
    fn epsilon(close: f64) -> f64 {
        (1e-6 * close.abs()).max(1e-8)
    }
}

impl Signal for Ichimoku {
    fn id(&self) -> &str {
        "Ichimoku"
    }

    fn group(&self) -> IndicatorGroup {
        IndicatorGroup::MovingAverages
    }

    fn min_periods(&self) -> usize {
        self.period
    }

    fn evaluate(&self, series: &Series) -> Reading {
        let Some(bar) = series.last() else {
            return Reading::absent();
        };
        let Some(base) = last(&baseline_series(series, self.period)) else {
            return Reading::absent();
        };
        if !bar.close.is_finite() {
            return Reading::absent();
        }

        let eps = Self::epsilon(bar.close);
        let vote = if bar.close > base + eps {
            Vote::Buy
        } else if bar.close < base - eps {
            Vote::Sell
        } else {
            Vote::Neutral
        };

        Reading::vote(Some(vote)).with("base", Some(base))
    }
}
