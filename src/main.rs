use pulse::config::Config;
use pulse::AppState;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CACHE_SWEEP_SECS: u64 = 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulse=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!(
        "Starting Pulse server on {}:{} ({:?} data, cache {}s)",
        config.host, config.port, config.data_source, config.rating_cache_ttl_secs
    );

    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState::from_config(config);

    // Periodically drop expired ratings
    let rating_store = state.rating_store.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(CACHE_SWEEP_SECS));
        loop {
            interval.tick().await;
            rating_store.cleanup();
        }
    });

    let app = pulse::app(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Pulse server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
