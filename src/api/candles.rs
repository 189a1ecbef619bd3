//! Candle (bar) API endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{parse_symbols, parse_timeframes};
use crate::error::{AppError, Result};
use crate::services::{normalize_symbol, Batch};
use crate::types::{Series, Timeframe};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CandlesQuery {
    pub symbols_csv: Option<String>,
    pub tfs_csv: Option<String>,
    pub count: Option<usize>,
}

/// Bars of one symbol across timeframes.
#[derive(Serialize)]
pub struct SymbolCandles {
    pub symbol: String,
    pub timeframes: BTreeMap<Timeframe, Series>,
}

/// Create the candles router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/all", get(get_all_candles))
        .route("/:symbol/:tf", get(get_candles))
}

/// Bars for one symbol. `tf` may be a timeframe or `all`.
async fn get_candles(
    State(state): State<AppState>,
    Path((symbol, tf)): Path<(String, String)>,
    Query(query): Query<CandlesQuery>,
) -> Result<Json<serde_json::Value>> {
    let symbol = normalize_symbol(&symbol);
    let count = state.config.bar_count(query.count);

    if tf.eq_ignore_ascii_case("all") {
        let timeframes =
            parse_timeframes(query.tfs_csv.as_deref(), &state.config.default_timeframes);
        let mut batch = state
            .rating_store
            .bars_batch(std::slice::from_ref(&symbol), &timeframes, count)
            .await;
        let response = SymbolCandles {
            timeframes: batch.remove(&symbol).unwrap_or_default(),
            symbol,
        };
        return Ok(Json(serde_json::to_value(response)?));
    }

    let series = match Timeframe::from_str(&tf) {
        Some(timeframe) => state.rating_store.bars(&symbol, timeframe, count).await?,
        None => Series::empty(),
    };
    Ok(Json(serde_json::to_value(series)?))
}

/// Bars for several symbols across timeframes.
async fn get_all_candles(
    State(state): State<AppState>,
    Query(query): Query<CandlesQuery>,
) -> Result<Json<Batch<Series>>> {
    let symbols = parse_symbols(query.symbols_csv.as_deref());
    if symbols.is_empty() {
        return Err(AppError::BadRequest("symbols_csv is required".to_string()));
    }
    let timeframes = parse_timeframes(query.tfs_csv.as_deref(), &state.config.default_timeframes);
    let count = state.config.bar_count(query.count);

    let batch = state
        .rating_store
        .bars_batch(&symbols, &timeframes, count)
        .await;
    Ok(Json(batch))
}
