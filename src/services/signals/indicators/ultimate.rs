//! Ultimate Oscillator indicator.

use crate::services::signals::rolling::{last, rolling_sum, zip_with, Line};
use crate::services::signals::{Reading, Signal};
use crate::types::{IndicatorGroup, Series, Vote};

/// Larry Williams' Ultimate Oscillator (7/14/28).
///
/// Buying pressure `close - min(low, prev close)` over true range
/// `max(high, prev close) - min(low, prev close)`, averaged across three
/// windows weighted 4/2/1. The first bar uses its own high and low.
pub struct UltimateOscillator {
    short: usize,
    medium: usize,
    long: usize,
}

impl Default for UltimateOscillator {
    fn default() -> Self {
        Self {
            short: 7,
            medium: 14,
            long: 28,
        }
    }
}

impl UltimateOscillator {
    pub fn series(&self, series: &Series) -> Line {
        let bars = series.bars();
        let mut pressure: Line = Vec::with_capacity(bars.len());
        let mut range: Line = Vec::with_capacity(bars.len());

        for (i, bar) in bars.iter().enumerate() {
            let (floor, ceiling) = match i.checked_sub(1).map(|p| bars[p].close) {
                Some(prev_close) => (bar.low.min(prev_close), bar.high.max(prev_close)),
                None => (bar.low, bar.high),
            };
            let bp = bar.close - floor;
            let tr = ceiling - floor;
            pressure.push(bp.is_finite().then_some(bp));
            range.push(tr.is_finite().then_some(tr));
        }

        let average = |period: usize| {
            zip_with(
                &rolling_sum(&pressure, period),
                &rolling_sum(&range, period),
                |bp, tr| bp / tr,
            )
        };
        let short = average(self.short);
        let medium = average(self.medium);
        let long = average(self.long);

        let weighted = zip_with(&short, &medium, |s, m| 4.0 * s + 2.0 * m);
        zip_with(&weighted, &long, |w, l| 100.0 * (w + l) / 7.0)
    }
}

impl Signal for UltimateOscillator {
    fn id(&self) -> &str {
        "Ultimate"
    }

    fn group(&self) -> IndicatorGroup {
        IndicatorGroup::Oscillators
    }

    fn min_periods(&self) -> usize {
        self.long
    }

    fn evaluate(&self, series: &Series) -> Reading {
        let Some(value) = last(&self.series(series)) else {
            return Reading::absent();
        };

        let vote = if value > 70.0 {
            Vote::Buy
        } else if value < 30.0 {
            Vote::Sell
        } else {
            Vote::Neutral
        };

        Reading::vote(Some(vote)).with("value", Some(value))
    }
}
