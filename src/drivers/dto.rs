use serde::Deserialize;

use crate::drivers::repo_types::NewDriver;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    pub driver_name: String,
    #[serde(default)]
    pub vehicle: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl From<CreateDriverRequest> for NewDriver {
    fn from(r: CreateDriverRequest) -> Self {
        Self {
            driver_name: r.driver_name.trim().to_string(),
            vehicle: r.vehicle,
            location: r.location,
        }
    }
}
