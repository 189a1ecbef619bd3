//! Market data providers.

pub mod binance;
pub mod memory;

pub use binance::BinanceClient;
pub use memory::MemoryProvider;

use crate::error::Result;
use crate::types::{Series, Timeframe};
use futures_util::future::{BoxFuture, FutureExt};

/// Source of closed OHLCV bars.
pub trait MarketDataProvider: Send + Sync {
    /// Short name for logs and the health endpoint.
    fn name(&self) -> &str;

    /// Up to `count` most recent closed bars, oldest first.
    ///
    /// An unknown symbol yields an empty series rather than an error.
    fn fetch_bars<'a>(
        &'a self,
        symbol: &'a str,
        timeframe: Timeframe,
        count: usize,
    ) -> BoxFuture<'a, Result<Series>>;

    /// Like [`fetch_bars`](Self::fetch_bars) with a timeframe identifier;
    /// unknown identifiers yield an empty series.
    fn fetch<'a>(
        &'a self,
        symbol: &'a str,
        timeframe: &str,
        count: usize,
    ) -> BoxFuture<'a, Result<Series>> {
        match Timeframe::from_str(timeframe) {
            Some(tf) => self.fetch_bars(symbol, tf, count),
            None => futures_util::future::ready(Ok(Series::empty())).boxed(),
        }
    }
}
