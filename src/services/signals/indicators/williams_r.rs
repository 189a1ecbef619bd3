//! Williams %R indicator.

use crate::services::signals::rolling::{last_two, lift, rolling_max, rolling_min, zip_with, Line};
use crate::services::signals::{reversal_vote, Reading, Signal};
use crate::types::{IndicatorGroup, Series};

/// %R = -100 * (highest high - close) / (highest high - lowest low), in [-100, 0].
pub fn williams_r_series(series: &Series, period: usize) -> Line {
    let highest = rolling_max(&lift(&series.highs()), period);
    let lowest = rolling_min(&lift(&series.lows()), period);
    let below_high = zip_with(&highest, &lift(&series.closes()), |h, c| h - c);
    let range = zip_with(&highest, &lowest, |h, l| h - l);
    zip_with(&below_high, &range, |b, r| -100.0 * b / r)
}

/// Williams %R (14).
///
/// Votes buy below -80 when turning up and sell above -20 when turning down.
pub struct WilliamsR {
    period: usize,
}

impl Default for WilliamsR {
    fn default() -> Self {
        Self { period: 14 }
    }
}

impl Signal for WilliamsR {
    fn id(&self) -> &str {
        "WilliamsR"
    }

    fn group(&self) -> IndicatorGroup {
        IndicatorGroup::Oscillators
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn evaluate(&self, series: &Series) -> Reading {
        let line = williams_r_series(series, self.period);
        let Some((prev, last)) = last_two(&line) else {
            return Reading::absent();
        };

        Reading::vote(Some(reversal_vote(prev, last, -80.0, -20.0)))
            .with("last", Some(last))
            .with("prev", Some(prev))
    }
}
