//! Pulse - technical rating server for OHLC market data.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use axum::Router;
use config::{Config, DataSource};
use services::RatingStore;
use sources::{BinanceClient, MarketDataProvider, MemoryProvider};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub rating_store: Arc<RatingStore>,
}

impl AppState {
    /// Build state around an explicit provider.
    pub fn new(config: Config, provider: Arc<dyn MarketDataProvider>) -> Self {
        let ttl = Duration::from_secs(config.rating_cache_ttl_secs);
        Self {
            rating_store: RatingStore::new(provider, ttl),
            config: Arc::new(config),
        }
    }

    /// Build state with the provider named by the configuration.
    pub fn from_config(config: Config) -> Self {
        let provider: Arc<dyn MarketDataProvider> = match config.data_source {
            DataSource::Binance => Arc::new(BinanceClient::new(
                config.binance_api_url.clone(),
                config.binance_api_key.clone(),
            )),
            DataSource::Memory => Arc::new(MemoryProvider::new()),
        };
        Self::new(config, provider)
    }
}

/// Full HTTP application: API routes, open CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
