use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Driver record. Independent of orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub driver_id: i64,
    pub driver_name: String,
    pub vehicle: Option<String>,
    pub location: Option<String>, // free text
}

#[derive(Debug, Clone)]
pub struct NewDriver {
    pub driver_name: String,
    pub vehicle: Option<String>,
    pub location: Option<String>,
}
