//! Awesome Oscillator (AO) indicator.

use crate::services::signals::rolling::{last_two, lift, rolling_mean, zip_with, Line};
use crate::services::signals::{Reading, Signal};
use crate::types::{IndicatorGroup, Series, Vote};

/// SMA(median price, fast) - SMA(median price, slow).
pub fn awesome_series(series: &Series, fast: usize, slow: usize) -> Line {
    let median: Vec<f64> = series.bars().iter().map(|b| b.median_price()).collect();
    let median = lift(&median);
    zip_with(
        &rolling_mean(&median, fast),
        &rolling_mean(&median, slow),
        |f, s| f - s,
    )
}

fn awesome_vote(prev: f64, last: f64) -> Vote {
    if prev <= 0.0 && last > 0.0 {
        Vote::Buy
    } else if prev >= 0.0 && last < 0.0 {
        Vote::Sell
    } else if last > prev && last > 0.0 {
        Vote::Buy
    } else if last < prev && last < 0.0 {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

/// Awesome Oscillator, 5/34 median-price momentum.
///
/// Votes on zero-line crosses, otherwise on rising positive or falling
/// negative readings.
pub struct AwesomeOscillator {
    fast: usize,
    slow: usize,
}

impl Default for AwesomeOscillator {
    fn default() -> Self {
        Self { fast: 5, slow: 34 }
    }
}

impl Signal for AwesomeOscillator {
    fn id(&self) -> &str {
        "AO"
    }

    fn group(&self) -> IndicatorGroup {
        IndicatorGroup::Oscillators
    }

    fn min_periods(&self) -> usize {
        self.slow + 1
    }

    fn evaluate(&self, series: &Series) -> Reading {
        let line = awesome_series(series, self.fast, self.slow);
        let Some((prev, last)) = last_two(&line) else {
            return Reading::absent();
        };

        Reading::vote(Some(awesome_vote(prev, last)))
            .with("last", Some(last))
            .with("prev", Some(prev))
    }
}
