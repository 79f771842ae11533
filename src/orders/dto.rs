use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub status: Option<String>, // defaults to PENDING
    #[serde(default)]
    pub estimated_delivery: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageResponse {
    pub order_id: i64,
    pub stage: String,
}
