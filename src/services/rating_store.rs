//! Rating store: fetches bars, runs the engine and caches results.

use crate::error::Result;
use crate::services::signals::{weighted_score, RatingEngine};
use crate::services::Cache;
use crate::sources::MarketDataProvider;
use crate::types::{GroupScope, RatingResult, Series, Timeframe, WeightedRating};
use futures_util::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Results of a batch request, keyed by symbol then timeframe.
pub type Batch<T> = BTreeMap<String, BTreeMap<Timeframe, T>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PanelKey {
    symbol: String,
    timeframe: Timeframe,
    count: usize,
    scope: GroupScope,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WeightedKey {
    symbol: String,
    timeframe: Timeframe,
    count: usize,
}

/// Computes ratings for (symbol, timeframe) pairs.
pub struct RatingStore {
    provider: Arc<dyn MarketDataProvider>,
    engine: RatingEngine,
    panel_cache: Cache<PanelKey, RatingResult>,
    weighted_cache: Cache<WeightedKey, WeightedRating>,
}

impl RatingStore {
    /// Create a new rating store. A zero `cache_ttl` disables caching.
    pub fn new(provider: Arc<dyn MarketDataProvider>, cache_ttl: Duration) -> Arc<Self> {
        Arc::new(Self {
            provider,
            engine: RatingEngine::default(),
            panel_cache: Cache::new(cache_ttl),
            weighted_cache: Cache::new(cache_ttl),
        })
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Most recent closed bars for a pair.
    pub async fn bars(&self, symbol: &str, timeframe: Timeframe, count: usize) -> Result<Series> {
        let symbol = normalize_symbol(symbol);
        self.provider.fetch_bars(&symbol, timeframe, count).await
    }

    /// Indicator-panel rating. Trace requests skip the cache.
    pub async fn panel_rating(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
        scope: GroupScope,
        trace: bool,
    ) -> Result<RatingResult> {
        let key = PanelKey {
            symbol: normalize_symbol(symbol),
            timeframe,
            count,
            scope,
        };

        if !trace {
            if let Some(cached) = self.panel_cache.get(&key) {
                return Ok(cached);
            }
        }

        let series = self.provider.fetch_bars(&key.symbol, timeframe, count).await?;
        debug!(
            "Rating {} {} ({}) over {} bars",
            key.symbol,
            timeframe,
            scope.as_str(),
            series.len()
        );
        let result = self.engine.rate(&series, scope, trace);

        if !trace {
            self.panel_cache.set(key, result.clone());
        }
        Ok(result)
    }

    /// Weighted-score rating. Trace requests skip the cache.
    pub async fn weighted_rating(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
        trace: bool,
    ) -> Result<WeightedRating> {
        let key = WeightedKey {
            symbol: normalize_symbol(symbol),
            timeframe,
            count,
        };

        if !trace {
            if let Some(cached) = self.weighted_cache.get(&key) {
                return Ok(cached);
            }
        }

        let series = self.provider.fetch_bars(&key.symbol, timeframe, count).await?;
        let closes = series.closes();
        debug!(
            "Weighted score for {} {} over {} closes",
            key.symbol,
            timeframe,
            closes.len()
        );
        let result = WeightedRating::new(weighted_score(&closes, trace), closes.len());

        if !trace {
            self.weighted_cache.set(key, result.clone());
        }
        Ok(result)
    }

    /// Panel ratings for every symbol/timeframe pair, fetched concurrently.
    ///
    /// A pair whose fetch fails is logged and rated as an empty series.
    pub async fn panel_batch(
        &self,
        symbols: &[String],
        timeframes: &[Timeframe],
        count: usize,
        scope: GroupScope,
        trace: bool,
    ) -> Batch<RatingResult> {
        let tasks = pairs(symbols, timeframes).map(|(symbol, tf)| async move {
            let result = self
                .panel_rating(&symbol, tf, count, scope, trace)
                .await
                .unwrap_or_else(|e| {
                    warn!("Rating {} {} failed: {}", symbol, tf, e);
                    RatingResult::neutral()
                });
            (symbol, tf, result)
        });

        collect(symbols, join_all(tasks).await)
    }

    /// Weighted ratings for every symbol/timeframe pair, fetched concurrently.
    pub async fn weighted_batch(
        &self,
        symbols: &[String],
        timeframes: &[Timeframe],
        count: usize,
        trace: bool,
    ) -> Batch<WeightedRating> {
        let tasks = pairs(symbols, timeframes).map(|(symbol, tf)| async move {
            let result = self
                .weighted_rating(&symbol, tf, count, trace)
                .await
                .unwrap_or_else(|e| {
                    warn!("Weighted rating {} {} failed: {}", symbol, tf, e);
                    WeightedRating::new(weighted_score(&[], trace), 0)
                });
            (symbol, tf, result)
        });

        collect(symbols, join_all(tasks).await)
    }

    /// Bars for every symbol/timeframe pair; failed fetches come back empty.
    pub async fn bars_batch(
        &self,
        symbols: &[String],
        timeframes: &[Timeframe],
        count: usize,
    ) -> Batch<Series> {
        let tasks = pairs(symbols, timeframes).map(|(symbol, tf)| async move {
            let series = self.bars(&symbol, tf, count).await.unwrap_or_else(|e| {
                warn!("Fetching {} {} failed: {}", symbol, tf, e);
                Series::empty()
            });
            (symbol, tf, series)
        });

        collect(symbols, join_all(tasks).await)
    }

    /// Drop expired cache entries.
    pub fn cleanup(&self) {
        self.panel_cache.cleanup();
        self.weighted_cache.cleanup();
    }
}

/// Trimmed, upper-cased symbol.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

fn pairs<'a>(
    symbols: &'a [String],
    timeframes: &'a [Timeframe],
) -> impl Iterator<Item = (String, Timeframe)> + 'a {
    symbols.iter().flat_map(move |symbol| {
        timeframes
            .iter()
            .map(move |tf| (normalize_symbol(symbol), *tf))
    })
}

/// Every requested symbol gets an entry, even with no valid timeframes.
fn collect<T>(symbols: &[String], results: Vec<(String, Timeframe, T)>) -> Batch<T> {
    let mut batch: Batch<T> = symbols
        .iter()
        .map(|s| (normalize_symbol(s), BTreeMap::new()))
        .collect();
    for (symbol, tf, value) in results {
        batch.entry(symbol).or_default().insert(tf, value);
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::MemoryProvider;
    use crate::types::{Bar, Rating};

    fn rising(count: usize) -> Series {
        Series::new(
            (0..count)
                .map(|i| {
                    let c = 100.0 + i as f64;
                    Bar::new(i as i64 * 60_000, c, c + 1.0, c - 1.0, c).with_volume(10.0)
                })
                .collect(),
        )
    }

    fn store(ttl: Duration) -> (Arc<MemoryProvider>, Arc<RatingStore>) {
        let provider = Arc::new(MemoryProvider::new());
        provider.insert("BTCUSDT", Timeframe::H1, rising(300));
        provider.insert("BTCUSDT", Timeframe::M5, rising(50));
        let store = RatingStore::new(provider.clone(), ttl);
        (provider, store)
    }

    #[tokio::test]
    async fn test_panel_rating_normalizes_symbol() {
        let (_, store) = store(Duration::from_secs(30));
        let result = store
            .panel_rating(" btcusdt ", Timeframe::H1, 300, GroupScope::All, false)
            .await
            .unwrap();
        assert!(result.ma_score > 0.8);
        assert!(result.raw.is_none());
    }

    #[tokio::test]
    async fn test_panel_rating_is_cached() {
        let (provider, store) = store(Duration::from_secs(30));
        let first = store
            .panel_rating("BTCUSDT", Timeframe::H1, 300, GroupScope::All, false)
            .await
            .unwrap();

        // New bars are not seen until the entry expires.
        provider.insert("BTCUSDT", Timeframe::H1, Series::empty());
        let second = store
            .panel_rating("BTCUSDT", Timeframe::H1, 300, GroupScope::All, false)
            .await
            .unwrap();
        assert_eq!(first, second);

        let traced = store
            .panel_rating("BTCUSDT", Timeframe::H1, 300, GroupScope::All, true)
            .await
            .unwrap();
        assert_eq!(traced.rating, Rating::Neutral);
        assert_eq!(traced.score, 0.0);
    }

    #[tokio::test]
    async fn test_weighted_rating_reports_bars_used() {
        let (_, store) = store(Duration::ZERO);
        let long = store
            .weighted_rating("BTCUSDT", Timeframe::H1, 250, false)
            .await
            .unwrap();
        assert_eq!(long.bars_used, 250);
        assert!(long.components.above_sma200);

        let short = store
            .weighted_rating("BTCUSDT", Timeframe::M5, 300, false)
            .await
            .unwrap();
        assert_eq!(short.bars_used, 50);
        assert_eq!(short.score, 0.0);
        assert_eq!(short.components.rsi14, 50.0);
    }

    #[tokio::test]
    async fn test_panel_batch_covers_all_pairs() {
        let (_, store) = store(Duration::ZERO);
        let symbols = vec!["btcusdt".to_string(), "ETHUSDT".to_string()];
        let batch = store
            .panel_batch(&symbols, &[Timeframe::H1, Timeframe::M5], 300, GroupScope::All, false)
            .await;

        assert_eq!(batch.len(), 2);
        assert_eq!(batch["BTCUSDT"].len(), 2);
        assert_eq!(batch["ETHUSDT"][&Timeframe::H1], RatingResult::neutral());
    }

    #[tokio::test]
    async fn test_batch_without_timeframes_keeps_symbols() {
        let (_, store) = store(Duration::ZERO);
        let batch = store
            .weighted_batch(&["btcusdt".to_string()], &[], 300, false)
            .await;
        assert_eq!(batch.len(), 1);
        assert!(batch["BTCUSDT"].is_empty());
    }

    #[tokio::test]
    async fn test_bars_batch() {
        let (_, store) = store(Duration::ZERO);
        let batch = store
            .bars_batch(&["BTCUSDT".to_string()], &[Timeframe::M5], 10)
            .await;
        assert_eq!(batch["BTCUSDT"][&Timeframe::M5].len(), 10);
    }
}
