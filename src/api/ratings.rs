//! Rating API endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{parse_symbols, parse_timeframes};
use crate::error::{AppError, Result};
use crate::services::Batch;
use crate::types::{GroupScope, RatingResult, Timeframe, WeightedRating};
use crate::AppState;

/// Query parameters for batch rating endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct BatchQuery {
    /// Comma-separated symbols, e.g. `BTCUSDT,ETHUSDT`.
    pub symbols_csv: Option<String>,
    /// Comma-separated timeframes; defaults to the configured list.
    pub tfs_csv: Option<String>,
    pub count: Option<usize>,
    /// `MAs`, `Oscillators` or `All`.
    pub group: Option<String>,
    #[serde(default)]
    pub trace: bool,
}

/// Query parameters for a single rating.
#[derive(Debug, Default, Deserialize)]
pub struct RatingQuery {
    pub count: Option<usize>,
    pub group: Option<String>,
    #[serde(default)]
    pub trace: bool,
}

/// Envelope of the panel batch endpoint.
#[derive(Serialize)]
pub struct PanelBatchResponse {
    pub success: &'static str,
    pub data: Batch<RatingResult>,
}

/// Create the ratings router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/all", get(get_weighted_batch))
        .route("/tv", get(get_panel_batch))
        .route("/:symbol/:tf", get(get_rating))
}

fn group_scope(group: Option<&str>) -> GroupScope {
    group.map(GroupScope::parse).unwrap_or_default()
}

/// Weighted scores for every requested symbol and timeframe.
async fn get_weighted_batch(
    State(state): State<AppState>,
    Query(query): Query<BatchQuery>,
) -> Result<Json<Batch<WeightedRating>>> {
    let symbols = parse_symbols(query.symbols_csv.as_deref());
    if symbols.is_empty() {
        return Err(AppError::BadRequest("symbols_csv is required".to_string()));
    }
    let timeframes = parse_timeframes(query.tfs_csv.as_deref(), &state.config.default_timeframes);
    let count = state.config.bar_count(query.count);

    let batch = state
        .rating_store
        .weighted_batch(&symbols, &timeframes, count, query.trace)
        .await;
    Ok(Json(batch))
}

/// Indicator-panel ratings for every requested symbol and timeframe.
async fn get_panel_batch(
    State(state): State<AppState>,
    Query(query): Query<BatchQuery>,
) -> Result<Json<PanelBatchResponse>> {
    let symbols = parse_symbols(query.symbols_csv.as_deref());
    if symbols.is_empty() {
        return Err(AppError::BadRequest("symbols_csv is required".to_string()));
    }
    let timeframes = parse_timeframes(query.tfs_csv.as_deref(), &state.config.default_timeframes);
    let count = state.config.bar_count(query.count);
    let scope = group_scope(query.group.as_deref());

    let data = state
        .rating_store
        .panel_batch(&symbols, &timeframes, count, scope, query.trace)
        .await;
    Ok(Json(PanelBatchResponse {
        success: "true",
        data,
    }))
}

/// Indicator-panel rating for one symbol and timeframe.
///
/// An unknown timeframe rates as an empty series.
async fn get_rating(
    State(state): State<AppState>,
    Path((symbol, tf)): Path<(String, String)>,
    Query(query): Query<RatingQuery>,
) -> Result<Json<RatingResult>> {
    let Some(timeframe) = Timeframe::from_str(&tf) else {
        return Ok(Json(RatingResult::neutral()));
    };
    let count = state.config.bar_count(query.count);
    let scope = group_scope(query.group.as_deref());

    let result = state
        .rating_store
        .panel_rating(&symbol, timeframe, count, scope, query.trace)
        .await?;
    Ok(Json(result))
}
