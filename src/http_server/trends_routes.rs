//! Trends HTTP Routes
//!
//! `GET /api/trends` and `GET /api/trends/{country}`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::cors::preflight_handler;
use super::errors::{method_not_allowed_handler, ApiError};
use crate::trends::{
    detail_response, list_response, SortPolicy, TrendDetailResponse, TrendListResponse,
    TrendStore, TrendsError,
};

/// Trends state shared across handlers
pub struct TrendsState {
    pub store: Arc<dyn TrendStore>,
    pub sort_policy: SortPolicy,
}

impl TrendsState {
    pub fn new(store: Arc<dyn TrendStore>, sort_policy: SortPolicy) -> Self {
        Self { store, sort_policy }
    }
}

/// Create trends routes
pub fn trends_routes(state: Arc<TrendsState>) -> Router {
    Router::new()
        .route(
            "/api/trends",
            get(list_trends_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed_handler),
        )
        .route(
            "/api/trends/:country",
            get(country_trend_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed_handler),
        )
        .with_state(state)
}

/// All countries, ordered by the configured policy
async fn list_trends_handler(
    State(state): State<Arc<TrendsState>>,
) -> Result<Json<TrendListResponse>, ApiError> {
    let records = state.store.list_all().await?;
    tracing::info!(
        countries = records.len(),
        sort = state.sort_policy.as_str(),
        "serving trends"
    );

    Ok(Json(list_response(records, state.sort_policy)))
}

/// One country; the code is matched case-insensitively
async fn country_trend_handler(
    State(state): State<Arc<TrendsState>>,
    Path(country): Path<String>,
) -> Result<Json<TrendDetailResponse>, ApiError> {
    let code = country.trim().to_uppercase();

    match state.store.find_by_country(&code).await? {
        Some(record) => {
            tracing::info!(country = %code, keywords = record.keywords.len(), "serving country trends");
            Ok(Json(detail_response(record)))
        }
        None => Err(TrendsError::NotFound(code).into()),
    }
}
