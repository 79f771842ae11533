use tracing::{debug, info, warn};

use crate::{
    error::AppError,
    orders::repo_types::{NewOrder, Order, DEFAULT_STATUS},
    state::AppState,
};

fn not_found(order_id: i64) -> AppError {
    warn!(order_id, "order not found");
    AppError::NotFound("Order not found".into())
}

pub async fn list(state: &AppState) -> Result<Vec<Order>, AppError> {
    Ok(state.orders.list().await?)
}

pub async fn get(state: &AppState, order_id: i64) -> Result<Order, AppError> {
    state.orders.find(order_id).await?.ok_or_else(|| not_found(order_id))
}

pub async fn create(
    state: &AppState,
    status: Option<String>,
    estimated_delivery: Option<String>,
) -> Result<Order, AppError> {
    let status = match status {
        Some(s) if s.trim().is_empty() => {
            return Err(AppError::BadRequest("status must not be empty".into()))
        }
        Some(s) => s,
        None => DEFAULT_STATUS.to_string(),
    };
    let order = state
        .orders
        .create(NewOrder {
            status,
            estimated_delivery,
        })
        .await?;
    info!(order_id = order.id, status = %order.status, "order created");
    Ok(order)
}

/// Overwrite an order's status. Any non-empty status may replace any other.
pub async fn update_status(
    state: &AppState,
    order_id: i64,
    new_status: &str,
) -> Result<Order, AppError> {
    if new_status.trim().is_empty() {
        return Err(AppError::BadRequest("status must not be empty".into()));
    }

    let mut order = get(state, order_id).await?;

    // Drivers are only looked at for the log line; nothing gets assigned.
    let drivers = state.drivers.list().await?;
    debug!(order_id, available_drivers = drivers.len(), "drivers available");

    let previous = std::mem::replace(&mut order.status, new_status.to_string());
    let saved = state.orders.save(&order).await?;
    info!(order_id, from = %previous, to = %saved.status, "order status updated");
    Ok(saved)
}

/// Current lifecycle stage of an order.
pub async fn current_stage(state: &AppState, order_id: i64) -> Result<String, AppError> {
    get(state, order_id).await.map(|o| o.status)
}

pub async fn delete(state: &AppState, order_id: i64) -> Result<(), AppError> {
    if !state.orders.delete(order_id).await? {
        return Err(not_found(order_id));
    }
    info!(order_id, "order deleted");
    Ok(())
}
