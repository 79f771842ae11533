use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{dto::CreateDriverRequest, repo_types::Driver};
use crate::{error::AppError, state::AppState};

pub fn driver_routes() -> Router<AppState> {
    Router::new()
        .route("/drivers", get(list_drivers).post(create_driver))
        .route("/drivers/test", get(api_working))
}

#[instrument(skip(state))]
pub async fn list_drivers(State(state): State<AppState>) -> Result<Json<Vec<Driver>>, AppError> {
    Ok(Json(state.drivers.list().await?))
}

#[instrument(skip(state, body))]
pub async fn create_driver(
    State(state): State<AppState>,
    Json(body): Json<CreateDriverRequest>,
) -> Result<(StatusCode, Json<Driver>), AppError> {
    if body.driver_name.trim().is_empty() {
        return Err(AppError::BadRequest("driverName is required".into()));
    }
    let driver = state.drivers.create(body.into()).await?;
    info!(driver_id = driver.driver_id, name = %driver.driver_name, "driver created");
    Ok((StatusCode::CREATED, Json(driver)))
}

/// Unauthenticated liveness probe.
pub async fn api_working() -> &'static str {
    "API is working!"
}
