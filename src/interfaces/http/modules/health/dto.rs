use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthDto {
    /// "ok" when every component is healthy, "degraded" otherwise
    pub status: String,
    /// "up" or "down"
    pub database: String,
    pub uptime_seconds: u64,
    pub version: String,
}
