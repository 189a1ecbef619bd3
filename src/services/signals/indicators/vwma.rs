//! Volume-Weighted Moving Average (VWMA) indicator.

use crate::services::signals::rolling::{last, lift, rolling_sum, zip_with, Line};
use crate::services::signals::{price_vote, Reading, Signal};
use crate::types::{IndicatorGroup, Series};

/// Σ(close·volume) / Σ(volume) over `period` bars.
///
/// `None` when the series carries no volume at all; a window with any
/// missing volume is undefined.
pub fn vwma_series(series: &Series, period: usize) -> Option<Line> {
    let volumes = series.volumes()?;
    let closes = lift(&series.closes());
    let weighted = zip_with(&closes, &volumes, |c, v| c * v);
    let numerator = rolling_sum(&weighted, period);
    let denominator = rolling_sum(&volumes, period);
    Some(zip_with(&numerator, &denominator, |n, d| n / d))
}

/// VWMA indicator, votes by close position relative to the average.
pub struct Vwma {
    period: usize,
}

impl Default for Vwma {
    fn default() -> Self {
        Self { period: 20 }
    }
}

impl Signal for Vwma {
    fn id(&self) -> &str {
        "VWMA20"
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
        let Some(line) = vwma_series(series, self.period) else {
            return Reading::absent();
        };
        let vwma = last(&line);

        Reading::vote(price_vote(bar.close, vwma)).with("value", vwma)
    }
}
