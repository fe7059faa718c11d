use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use tracing::info;

use lodgis_core::{SearchCriteria, SearchResults};

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/stays/search", post(search_overnight))
        .route("/v1/stays/day-use", post(search_day_use))
}

async fn search_overnight(
    State(state): State<AppState>,
    Json(criteria): Json<SearchCriteria>,
) -> Result<Json<SearchResults>, AppError> {
    let results = state.search.search_overnight(&criteria).await?;
    info!(
        total = results.total,
        page = results.page,
        "overnight search served"
    );
    Ok(Json(results))
}

async fn search_day_use(
    State(state): State<AppState>,
    Json(criteria): Json<SearchCriteria>,
) -> Result<Json<SearchResults>, AppError> {
    let results = state.search.search_day_use(&criteria).await?;
    info!(total = results.total, "day-use search served");
    Ok(Json(results))
}
