//! Simple Moving Average (SMA) indicator.

use crate::services::signals::rolling::{last, lift, rolling_mean, Line};
use crate::services::signals::{price_vote, Reading, Signal};
use crate::types::{IndicatorGroup, Series};

/// Rolling mean of closes.
pub fn sma_series(closes: &[f64], period: usize) -> Line {
    rolling_mean(&lift(closes), period)
}

/// SMA (Simple Moving Average) indicator.
///
/// Votes by price position relative to the average:
/// - Close above SMA = buy
/// - Close below SMA = sell
pub struct Sma {
    id: String,
    period: usize,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            id: format!("SMA{}", period),
            period,
        }
    }
}

impl Signal for Sma {
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
        let sma = last(&sma_series(&series.closes(), self.period));

        Reading::vote(price_vote(bar.close, sma)).with("value", sma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::signals::test_support::{downtrend, flat, uptrend};
    use crate::types::Vote;

    #[test]
    fn test_sma_id() {
        assert_eq!(Sma::new(20).id(), "SMA20");
        assert_eq!(Sma::new(200).id(), "SMA200");
    }

    #[test]
    fn test_sma_series() {
        let result = sma_series(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
        assert_eq!(result, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_sma_insufficient_data() {
        let sma = Sma::new(20);
        assert_eq!(sma.evaluate(&uptrend(19)).vote, None);
        assert!(sma.evaluate(&uptrend(20)).vote.is_some());
    }

    #[test]
    fn test_sma_votes_with_trend() {
        let sma = Sma::new(10);
        assert_eq!(sma.evaluate(&uptrend(30)).vote, Some(Vote::Buy));
        assert_eq!(sma.evaluate(&downtrend(30)).vote, Some(Vote::Sell));
        assert_eq!(sma.evaluate(&flat(30)).vote, Some(Vote::Neutral));
    }

    #[test]
    fn test_sma_reports_value() {
        let reading = Sma::new(10).evaluate(&flat(30));
        assert_eq!(reading.raw.get("value"), Some(&100.0));
    }
}
