//! Technical indicator implementations.

pub mod adx;
pub mod awesome;
pub mod bulls_bears;
pub mod cci;
pub mod ema;
pub mod hma;
pub mod ichimoku;
pub mod macd;
pub mod momentum;
pub mod rsi;
pub mod sma;
pub mod stoch_rsi;
pub mod stochastic;
pub mod ultimate;
pub mod vwma;
pub mod williams_r;

pub use adx::Adx;
pub use awesome::AwesomeOscillator;
pub use bulls_bears::BullsBears;
pub use cci::Cci;
pub use ema::Ema;
pub use hma::Hma;
pub use ichimoku::Ichimoku;
pub use macd::Macd;
pub use momentum::Momentum;
pub use rsi::Rsi;
pub use sma::Sma;
pub use stoch_rsi::StochRsi;
pub use stochastic::Stochastic;
pub use ultimate::UltimateOscillator;
pub use vwma::Vwma;
pub use williams_r::WilliamsR;

use super::Signal;

/// Periods of the SMA/EMA pairs in the moving-average panel.
pub const MA_PERIODS: [usize; 6] = [10, 20, 30, 50, 100, 200];

/// Get all available indicators, moving averages first.
pub fn all_indicators() -> Vec<Box<dyn Signal>> {
    let mut indicators: Vec<Box<dyn Signal>> = Vec::new();

    // Moving averages
    for period in MA_PERIODS {
        indicators.push(Box::new(Sma::new(period)));
        indicators.push(Box::new(Ema::new(period)));
    }
    indicators.push(Box::new(Ichimoku::default()));
    indicators.push(Box::new(Vwma::default()));
    indicators.push(Box::new(Hma::default()));

    // Oscillators
    indicators.push(Box::new(Rsi::default()));
    indicators.push(Box::new(Stochastic::default()));
    indicators.push(Box::new(Cci::default()));
    indicators.push(Box::new(Adx::default()));
    indicators.push(Box::new(AwesomeOscillator::default()));
    indicators.push(Box::new(Momentum::default()));
    indicators.push(Box::new(Macd::default()));
    indicators.push(Box::new(StochRsi::default()));
    indicators.push(Box::new(WilliamsR::default()));
    indicators.push(Box::new(BullsBears::default()));
    indicators.push(Box::new(UltimateOscillator::default()));

    indicators
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IndicatorGroup;
    use std::collections::HashSet;

    #[test]
    fn test_all_indicators_ids_are_unique() {
        let indicators = all_indicators();
        let ids: HashSet<&str> = indicators.iter().map(|i| i.id()).collect();
        assert_eq!(ids.len(), indicators.len());
    }

    #[test]
    fn test_all_indicators_group_sizes() {
        let indicators = all_indicators();
        let mas = indicators
            .iter()
            .filter(|i| i.group() == IndicatorGroup::MovingAverages)
            .count();
        let oscillators = indicators
            .iter()
            .filter(|i| i.group() == IndicatorGroup::Oscillators)
            .count();
        assert_eq!(mas, 15);
        assert_eq!(oscillators, 11);
    }

    #[test]
    fn test_all_indicators_have_min_periods() {
        for indicator in all_indicators() {
            assert!(indicator.min_periods() > 0, "{} has no warm-up", indicator.id());
        }
    }
}
