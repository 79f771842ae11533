use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{CreateOrderRequest, StageResponse, StatusUpdateRequest},
    repo_types::Order,
    services,
};
use crate::{auth::extractors::AuthUser, error::AppError, state::AppState};

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/:id", get(get_order).delete(delete_order))
        .route("/orders/:id/stage", get(get_stage))
        .route("/orders/:id/status", put(update_status))
}

#[instrument(skip(state))]
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, AppError> {
    services::list(&state).await.map(Json)
}

#[instrument(skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Order>, AppError> {
    services::get(&state, id).await.map(Json)
}

#[instrument(skip(state, body))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = services::create(&state, body.status, body.estimated_delivery).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[instrument(skip(state, user, body))]
pub async fn update_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<StatusUpdateRequest>,
) -> Result<Json<Order>, AppError> {
    info!(order_id = id, by = %user.sub, role = %user.role, status = %body.status, "status update requested");
    services::update_status(&state, id, &body.status).await.map(Json)
}

#[instrument(skip(state))]
pub async fn get_stage(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StageResponse>, AppError> {
    let stage = services::current_stage(&state, id).await?;
    Ok(Json(StageResponse { order_id: id, stage }))
}

#[instrument(skip(state))]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    services::delete(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
