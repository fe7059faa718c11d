use axum::{
    extract::{Json, Path, Query, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lodgis_core::AvailabilityReport;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/rooms/{room_id}/availability", get(check_availability))
        .route("/v1/rooms/{room_id}/availability/reduce", post(reduce))
        .route("/v1/rooms/{room_id}/availability/release", post(release))
}

#[derive(Debug, Deserialize)]
struct CheckQuery {
    check_in: Option<String>,
    check_out: Option<String>,
    rooms: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct MutateRequest {
    check_in: Option<String>,
    check_out: Option<String>,
    count: i32,
}

#[derive(Debug, Serialize)]
struct MutateResponse {
    success: bool,
    affected_nights: u32,
}

async fn check_availability(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Query(query): Query<CheckQuery>,
) -> Result<Json<AvailabilityReport>, AppError> {
    let window = state
        .validator
        .validate_overnight(query.check_in.as_deref(), query.check_out.as_deref())?;
    let report = state
        .availability
        .check(room_id, &window, query.rooms.unwrap_or(1))
        .await?;
    Ok(Json(report))
}

async fn reduce(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Json(req): Json<MutateRequest>,
) -> Result<Json<MutateResponse>, AppError> {
    let window = state
        .validator
        .validate_overnight(req.check_in.as_deref(), req.check_out.as_deref())?;
    let receipt = state
        .availability
        .reduce(room_id, &window, req.count)
        .await?;
    Ok(Json(MutateResponse {
        success: true,
        affected_nights: receipt.affected_nights,
    }))
}

async fn release(
    State(state): State<AppState>,
    Path(room_id): Path<Uuid>,
    Json(req): Json<MutateRequest>,
) -> Result<Json<MutateResponse>, AppError> {
    let window = state
        .validator
        .validate_overnight(req.check_in.as_deref(), req.check_out.as_deref())?;
    let receipt = state
        .availability
        .increase(room_id, &window, req.count)
        .await?;
    Ok(Json(MutateResponse {
        success: true,
        affected_nights: receipt.affected_nights,
    }))
}
