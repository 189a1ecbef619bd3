use super::MarketDataProvider;
use crate::error::Result;
use crate::types::{Series, Timeframe};
use dashmap::DashMap;
use futures_util::future::{BoxFuture, FutureExt};

/// Bars held in process memory, keyed by symbol and timeframe.
#[derive(Default)]
pub struct MemoryProvider {
    series: DashMap<(String, Timeframe), Series>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the bars for a symbol/timeframe pair.
    pub fn insert(&self, symbol: &str, timeframe: Timeframe, series: Series) {
        self.series
            .insert((symbol.trim().to_uppercase(), timeframe), series);
    }
}

impl MarketDataProvider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch_bars<'a>(
        &'a self,
        symbol: &'a str,
        timeframe: Timeframe,
        count: usize,
    ) -> BoxFuture<'a, Result<Series>> {
        let key = (symbol.trim().to_uppercase(), timeframe);
        let series = self
            .series
            .get(&key)
            .map(|s| s.tail(count))
            .unwrap_or_default();
        futures_util::future::ready(Ok(series)).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_provider_returns_tail() {
        let provider = MemoryProvider::new();
        let closes: Vec<f64> = (0..10).map(|i| i as f64).collect();
        provider.insert("btcusdt", Timeframe::H1, Series::from_closes(&closes));

        let series = tokio_test::block_on(provider.fetch("BTCUSDT", "h1", 3)).unwrap();
        assert_eq!(series.closes(), vec![7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_memory_provider_unknown_is_empty() {
        let provider = MemoryProvider::new();
        provider.insert("ETHUSDT", Timeframe::M5, Series::from_closes(&[1.0, 2.0]));

        let missing = tokio_test::block_on(provider.fetch("BTCUSDT", "M5", 10)).unwrap();
        assert!(missing.is_empty());
        let bad_tf = tokio_test::block_on(provider.fetch("ETHUSDT", "W1", 10)).unwrap();
        assert!(bad_tf.is_empty());
    }
}
