//! Bulls/Bears Power indicator.

use crate::services::signals::rolling::{ema, finite, last_two, lift};
use crate::services::signals::{Reading, Signal};
use crate::types::{IndicatorGroup, Series, Vote};

/// Elder's Bulls and Bears Power around EMA(13).
///
/// `bull = high - EMA`, `bear = low - EMA`. In an uptrend (close above a
/// rising EMA) a negative bear power that is above the prior bar's
/// `low - EMA` votes buy; the mirror image votes sell.
pub struct BullsBears {
    period: usize,
}

impl Default for BullsBears {
    fn default() -> Self {
        Self { period: 13 }
    }
}

impl Signal for BullsBears {
    fn id(&self) -> &str {
        "BullsBears"
    }

    fn group(&self) -> IndicatorGroup {
        IndicatorGroup::Oscillators
    }

    fn min_periods(&self) -> usize {
        self.period + 1
    }

    fn evaluate(&self, series: &Series) -> Reading {
        let bars = series.bars();
        let line = ema(&lift(&series.closes()), self.period);
        let (Some((ema_prev, ema_last)), [.., prev_bar, last_bar]) = (last_two(&line), bars)
        else {
            return Reading::absent();
        };

        // A non-finite high or low on either bar leaves the reading absent.
        let (Some(bull), Some(bear), Some(prev_bull), Some(prev_bear)) = (
            finite(last_bar.high - ema_last),
            finite(last_bar.low - ema_last),
            finite(prev_bar.high - ema_prev),
            finite(prev_bar.low - ema_prev),
        ) else {
            return Reading::absent();
        };

        let uptrend = last_bar.close > ema_last && ema_last > ema_prev;
        let downtrend = last_bar.close < ema_last && ema_last < ema_prev;

        let vote = if uptrend && bear < 0.0 && bear > prev_bear {
            Vote::Buy
        } else if downtrend && bull > 0.0 && bull < prev_bull {
            Vote::Sell
        } else {
            Vote::Neutral
        };

        Reading::vote(Some(vote))
            .with("bull", Some(bull))
            .with("bear", Some(bear))
            .with("ema", Some(ema_last))
    }
}
