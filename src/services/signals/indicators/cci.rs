//! Commodity Channel Index (CCI) indicator.

use crate::services::signals::rolling::{
    last_two, lift, rolling_mean, rolling_mean_abs_dev, zip_with, Line,
};
use crate::services::signals::{reversal_vote, Reading, Signal};
use crate::types::{IndicatorGroup, Series};

/// CCI = (TP - SMA(TP)) / (0.015 * mean deviation of TP).
pub fn cci_series(series: &Series, period: usize) -> Line {
    let typical: Vec<f64> = series.bars().iter().map(|b| b.typical_price()).collect();
    let typical = lift(&typical);
    let sma = rolling_mean(&typical, period);
    let mean_dev = rolling_mean_abs_dev(&typical, period);
    let distance = zip_with(&typical, &sma, |tp, m| tp - m);
    zip_with(&distance, &mean_dev, |d, md| d / (0.015 * md))
}

/// CCI (Commodity Channel Index) indicator.
///
/// Measures the current price level relative to an average price level:
/// CCI = (TP - SMA) / (0.015 * Mean Deviation)
/// where TP = Typical Price = (High + Low + Close) / 3
///
/// Votes:
/// - Below -100 and rising: buy
/// - Above +100 and falling: sell
pub struct Cci {
    period: usize,
}

impl Default for Cci {
    fn default() -> Self {
        Self { period: 20 }
    }
}

impl Signal for Cci {
    fn id(&self) -> &str {
        "CCI"
    }

    fn group(&self) -> IndicatorGroup {
        IndicatorGroup::Oscillators
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn evaluate(&self, series: &Series) -> Reading {
        let Some((prev, last)) = last_two(&cci_series(series, self.period)) else {
            return Reading::absent();
        };

        Reading::vote(Some(reversal_vote(prev, last, -100.0, 100.0)))
            .with("last", Some(last))
            .with("prev", Some(prev))
    }
}
