use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_STATUS: &str = "PENDING";

/// Order record. `status` is free text with no transition graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub status: String,
    pub estimated_delivery: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub status: String,
    pub estimated_delivery: Option<String>,
}
