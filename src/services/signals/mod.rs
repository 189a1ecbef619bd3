//! Technical rating engine.
//!
//! Indicator computations, per-indicator vote rules, group aggregation and
//! the alternate weighted-score recipe. Everything here is a pure function
//! of a [`Series`].

pub mod aggregator;
pub mod engine;
pub mod indicators;
pub mod rolling;
pub mod weighted;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregator::{aggregate, Scores};
pub use engine::{label, rate, RatingEngine};
pub use weighted::weighted_score;

use crate::types::{IndicatorGroup, RawValues, Series, Vote};

/// Trait for implementing technical indicators.
pub trait Signal: Send + Sync {
    /// Key under which the vote is reported (e.g. `"SMA20"`, `"RSI"`).
    fn id(&self) -> &str;

    /// Group this indicator votes in.
    fn group(&self) -> IndicatorGroup;

    /// Minimum number of bars before the indicator can vote.
    fn min_periods(&self) -> usize;

    /// Evaluate the indicator at the last bar.
    fn evaluate(&self, series: &Series) -> Reading;
}

/// Vote and raw values of one indicator at the last bar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reading {
    /// `None` when the indicator could not vote.
    pub vote: Option<Vote>,
    pub raw: RawValues,
}

impl Reading {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn vote(vote: Option<Vote>) -> Self {
        Self {
            vote,
            raw: RawValues::new(),
        }
    }

    /// Attach a raw value; undefined values are left out.
    pub fn with(mut self, name: &'static str, value: Option<f64>) -> Self {
        if let Some(v) = value {
            self.raw.insert(name, v);
        }
        self
    }
}

/// Close-versus-line vote used by the moving-average family.
pub(crate) fn price_vote(close: f64, line_value: Option<f64>) -> Option<Vote> {
    let value = line_value?;
    close
        .is_finite()
        .then(|| Vote::from_comparison(close, value))
}

/// Threshold-and-direction rule shared by RSI, CCI, Williams %R and momentum.
///
/// Buys when the value is below `buy_below` and rising, sells when above
/// `sell_above` and falling.
pub(crate) fn reversal_vote(prev: f64, last: f64, buy_below: f64, sell_above: f64) -> Vote {
    if last < buy_below && last > prev {
        Vote::Buy
    } else if last > sell_above && last < prev {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}

/// %K/%D rule shared by the stochastic oscillators.
pub(crate) fn stochastic_vote(k: f64, d: f64) -> Vote {
    if k < 20.0 && d < 20.0 && k > d {
        Vote::Buy
    } else if k > 80.0 && d > 80.0 && k < d {
        Vote::Sell
    } else {
        Vote::Neutral
    }
}
