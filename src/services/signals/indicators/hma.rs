//! Hull Moving Average (HMA) indicator.

use crate::services::signals::rolling::{last, lift, rolling_wma, zip_with, Line};
use crate::services::signals::{price_vote, Reading, Signal};
use crate::types::{IndicatorGroup, Series};

/// `WMA(2·WMA(close, n/2) − WMA(close, n), √n)` with floored window sizes.
pub fn hma_series(closes: &[f64], period: usize) -> Line {
    let closes = lift(closes);
    let half = rolling_wma(&closes, (period / 2).max(1));
    let full = rolling_wma(&closes, period);
    let raw = zip_with(&half, &full, |h, f| 2.0 * h - f);
    rolling_wma(&raw, sqrt_period(period))
}

fn sqrt_period(period: usize) -> usize {
    ((period as f64).sqrt().floor() as usize).max(1)
}

/// HMA indicator, votes by close position relative to the average.
pub struct Hma {
    period: usize,
}

impl Default for Hma {
    fn default() -> Self {
        Self { period: 9 }
    }
}

impl Signal for Hma {
    fn id(&self) -> &str {
        "HMA9"
    }

    fn group(&self) -> IndicatorGroup {
        IndicatorGroup::MovingAverages
    }

    fn min_periods(&self) -> usize {
        self.period + sqrt_period(self.period) - 1
    }

    fn evaluate(&self, series: &Series) -> Reading {
        let Some(bar) = series.last() else {
            return Reading::absent();
        };
        let hma = last(&hma_series(&series.closes(), self.period));

        Reading::vote(price_vote(bar.close, hma)).with("value", hma)
    }
}
