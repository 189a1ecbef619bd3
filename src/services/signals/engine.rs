//! Indicator panel evaluation.

use super::aggregator::aggregate;
use super::indicators::all_indicators;
use super::Signal;
use crate::types::{GroupScope, IndicatorTrace, Rating, RatingResult, Series, VoteSet};

/// Runs the full indicator panel over a series.
pub struct RatingEngine {
    indicators: Vec<Box<dyn Signal>>,
}

impl Default for RatingEngine {
    fn default() -> Self {
        Self::new(all_indicators())
    }
}

impl RatingEngine {
    pub fn new(indicators: Vec<Box<dyn Signal>>) -> Self {
        Self { indicators }
    }

    /// Vote of every indicator at the last bar, plus the raw values behind them.
    ///
    /// Indicators without enough history are recorded as absent.
    pub fn votes(&self, series: &Series) -> (VoteSet, IndicatorTrace) {
        let mut votes = VoteSet::default();
        let mut trace = IndicatorTrace::new();

        for indicator in &self.indicators {
            let group = votes.group_mut(indicator.group());
            if series.len() < indicator.min_periods() {
                group.insert(indicator.id(), None);
                continue;
            }

            let reading = indicator.evaluate(series);
            group.insert(indicator.id(), reading.vote);
            if !reading.raw.is_empty() {
                trace.insert(indicator.id().to_string(), reading.raw);
            }
        }

        (votes, trace)
    }

    /// Score and rate a series. `trace` attaches raw values without
    /// affecting the scores.
    pub fn rate(&self, series: &Series, scope: GroupScope, trace: bool) -> RatingResult {
        if series.is_empty() {
            return RatingResult::neutral();
        }

        let (votes, raw) = self.votes(series);
        let scores = aggregate(&votes, scope);
        let rounded = scores.rounded();

        RatingResult {
            ma_score: rounded.ma_score,
            osc_score: rounded.osc_score,
            score: rounded.overall,
            rating: scores.rating(),
            votes,
            raw: trace.then_some(raw),
        }
    }
}

/// Rate a series with the standard indicator panel.
pub fn rate(series: &Series, scope: GroupScope, trace: bool) -> RatingResult {
    RatingEngine::default().rate(series, scope, trace)
}

/// Rating label for a score from either scoring path.
pub fn label(score: f64) -> Rating {
    Rating::from_score(score)
}
