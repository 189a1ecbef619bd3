use super::MarketDataProvider;
use crate::error::{AppError, Result};
use crate::types::{Bar, Series, Timeframe};
use futures_util::future::{BoxFuture, FutureExt};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, warn};

/// Largest `limit` the klines endpoint accepts.
const MAX_KLINES: usize = 1000;

/// Most closed bars one request can return: the still-forming candle takes
/// one slot of [`MAX_KLINES`].
const MAX_CLOSED_BARS: usize = MAX_KLINES - 1;

/// Binance REST klines client.
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl BinanceClient {
    /// Create a new Binance client.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .user_agent(concat!("pulse/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    async fn fetch_klines(&self, symbol: &str, timeframe: Timeframe, count: usize) -> Result<Series> {
        let symbol = symbol.trim().to_uppercase();
        let count = count.min(MAX_CLOSED_BARS);
        let limit = request_limit(count).to_string();
        let url = format!("{}/klines", self.base_url);

        let mut request = self.client.get(&url).query(&[
            ("symbol", symbol.as_str()),
            ("interval", timeframe.binance_interval()),
            ("limit", limit.as_str()),
        ]);
        if let Some(ref key) = self.api_key {
            request = request.header("X-MBX-APIKEY", key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::BAD_REQUEST {
            warn!("Binance rejected {} {}: treating as unknown symbol", symbol, timeframe);
            return Ok(Series::empty());
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(200).collect();
            warn!("Binance API returned {}: {}", status, snippet);
            return Err(AppError::ExternalApi(format!("Binance API error: {}", status)));
        }

        let rows: Vec<Vec<Value>> = response.json().await?;
        let now = chrono::Utc::now().timestamp_millis();
        let series = parse_klines(&rows, now, count);

        debug!(
            "Fetched {} closed {} bars for {} from Binance",
            series.len(),
            timeframe,
            symbol
        );
        Ok(series)
    }
}

impl MarketDataProvider for BinanceClient {
    fn name(&self) -> &str {
        "binance"
    }

    fn fetch_bars<'a>(
        &'a self,
        symbol: &'a str,
        timeframe: Timeframe,
        count: usize,
    ) -> BoxFuture<'a, Result<Series>> {
        self.fetch_klines(symbol, timeframe, count).boxed()
    }
}

/// Klines to request for `count` closed bars. One extra covers the candle
/// that is still forming.
fn request_limit(count: usize) -> usize {
    count.min(MAX_CLOSED_BARS) + 1
}

/// Closed bars from raw kline rows, keeping the last `count`.
///
/// Rows are `[open_time, open, high, low, close, volume, close_time, ...]`
/// with prices as strings. A bar whose close time is after `now_ms` is still
/// forming and is dropped, as are malformed rows.
pub fn parse_klines(rows: &[Vec<Value>], now_ms: i64, count: usize) -> Series {
    let bars: Vec<Bar> = rows
        .iter()
        .filter_map(|row| parse_row(row))
        .filter(|(_, close_time)| *close_time <= now_ms)
        .map(|(bar, _)| bar)
        .collect();

    Series::new(bars).tail(count)
}

fn parse_row(row: &[Value]) -> Option<(Bar, i64)> {
    let number = |i: usize| -> Option<f64> {
        match row.get(i)? {
            Value::String(s) => s.parse().ok(),
            other => other.as_f64(),
        }
    };

    let open_time = row.first()?.as_i64()?;
    let close_time = row.get(6)?.as_i64()?;
    let mut bar = Bar::new(open_time, number(1)?, number(2)?, number(3)?, number(4)?);
    bar.volume = number(5);
    Some((bar, close_time))
}
