pub mod candles;
pub mod health;
pub mod ratings;

use crate::services::normalize_symbol;
use crate::types::Timeframe;
use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/ratings", ratings::router())
        .nest("/candles", candles::router())
}

/// Symbols from a comma-separated list, trimmed and upper-cased, blanks dropped.
pub(crate) fn parse_symbols(csv: Option<&str>) -> Vec<String> {
    csv.unwrap_or_default()
        .split(',')
        .map(normalize_symbol)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Timeframes from a comma-separated list, unknown names dropped. The
/// configured defaults apply only when the list is missing or blank.
pub(crate) fn parse_timeframes(csv: Option<&str>, defaults: &[Timeframe]) -> Vec<Timeframe> {
    match csv.map(str::trim).filter(|s| !s.is_empty()) {
        Some(csv) => Timeframe::parse_list(csv),
        None => defaults.to_vec(),
    }
}
