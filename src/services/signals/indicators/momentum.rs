//! Momentum (rate of change) indicator.

use crate::services::signals::rolling::{last_two, lift, shift, zip_with, Line};
use crate::services::signals::{Reading, Signal};
use crate::types::{IndicatorGroup, Series, Vote};

/// Percent change over `period` bars.
pub fn rate_of_change(closes: &[f64], period: usize) -> Line {
    let closes = lift(closes);
    zip_with(&closes, &shift(&closes, period), |c, p| 100.0 * (c - p) / p)
}

/// Momentum: ROC(10) scaled to percent.
///
/// Votes buy while positive and rising, sell while negative and falling.
pub struct Momentum {
    period: usize,
}

impl Default for Momentum {
    fn default() -> Self {
        Self { period: 10 }
    }
}

impl Signal for Momentum {
    fn id(&self) -> &str {
        "Momentum"
    }

    fn group(&self) -> IndicatorGroup {
        IndicatorGroup::Oscillators
    }

    fn min_periods(&self) -> usize {
        self.period + 2
    }

    fn evaluate(&self, series: &Series) -> Reading {
        let line = rate_of_change(&series.closes(), self.period);
        let Some((prev, last)) = last_two(&line) else {
            return Reading::absent();
        };

        let vote = if last > 0.0 && last > prev {
            Vote::Buy
        } else if last < 0.0 && last < prev {
            Vote::Sell
        } else {
            Vote::Neutral
        };

        Reading::vote(Some(vote))
            .with("last", Some(last))
            .with("prev", Some(prev))
    }
}
