use crate::types::Timeframe;
use std::env;

const DEFAULT_BINANCE_API_URL: &str = "https://api.binance.com/api/v3";

/// Where bars come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataSource {
    #[default]
    Binance,
    /// Process-local bars, filled by the embedding application or tests.
    Memory,
}

impl DataSource {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "binance" => Some(Self::Binance),
            "memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Market data backend.
    pub data_source: DataSource,
    /// Binance REST base URL.
    pub binance_api_url: String,
    /// Binance API key (optional, public endpoints work without).
    pub binance_api_key: Option<String>,
    /// Bars requested when a request does not say.
    pub default_bar_count: usize,
    /// Upper bound on bars per request.
    pub max_bar_count: usize,
    /// Rating cache lifetime in seconds (0 disables caching).
    pub rating_cache_ttl_secs: u64,
    /// Timeframes used when a request does not name any.
    pub default_timeframes: Vec<Timeframe>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            data_source: DataSource::default(),
            binance_api_url: DEFAULT_BINANCE_API_URL.to_string(),
            binance_api_key: None,
            default_bar_count: 300,
            max_bar_count: 1000,
            rating_cache_ttl_secs: 30,
            default_timeframes: Timeframe::ALL.to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let default_timeframes = env::var("DEFAULT_TIMEFRAMES")
            .ok()
            .map(|csv| Timeframe::parse_list(&csv))
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.default_timeframes);

        let max_bar_count = parse_var("MAX_BAR_COUNT")
            .filter(|n: &usize| *n > 0)
            .unwrap_or(defaults.max_bar_count);

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT").unwrap_or(defaults.port),
            data_source: env::var("DATA_SOURCE")
                .ok()
                .and_then(|s| DataSource::from_str(&s))
                .unwrap_or(defaults.data_source),
            binance_api_url: env::var("BINANCE_API_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.binance_api_url),
            binance_api_key: env::var("BINANCE_API_KEY").ok().filter(|s| !s.is_empty()),
            default_bar_count: parse_var("DEFAULT_BAR_COUNT")
                .unwrap_or(defaults.default_bar_count)
                .clamp(1, max_bar_count),
            max_bar_count,
            rating_cache_ttl_secs: parse_var("RATING_CACHE_TTL_SECS")
                .unwrap_or(defaults.rating_cache_ttl_secs),
            default_timeframes,
        }
    }

    /// Requested bar count, defaulted and clamped to `[1, max_bar_count]`.
    pub fn bar_count(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_bar_count)
            .clamp(1, self.max_bar_count)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
