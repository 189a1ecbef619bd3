//! Exponential Moving Average (EMA) indicator.

use crate::services::signals::rolling::{ema, last, lift, Line};
use crate::services::signals::{price_vote, Reading, Signal};
use crate::types::{IndicatorGroup, Series};

/// EMA of closes, `alpha = 2 / (period + 1)`, defined from the `period`-th bar.
pub fn ema_series(closes: &[f64], period: usize) -> Line {
    ema(&lift(closes), period)
}

/// EMA (Exponential Moving Average) indicator.
///
/// Like SMA but gives more weight to recent prices. Votes by close position
/// relative to the EMA.
pub struct Ema {
    id: String,
    period: usize,
}

impl Ema {
    pub fn new(period: usize) -> Self {
        Self {
            id: format!("EMA{}", period),
            period,
        }
    }
}

impl Signal for Ema {
    fn id(&self) -> &str {
        &self.id
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
        let ema = last(&ema_series(&series.closes(), self.period));

        Reading::vote(price_vote(bar.close, ema)).with("value", ema)
    }
}
