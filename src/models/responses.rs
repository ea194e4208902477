use serde::{Deserialize, Serialize};
use crate::models::domain::{Group, GroupingStats, UnplacedGuest};

/// Grouping result for one schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingResponse {
    #[serde(rename = "scheduleId")]
    pub schedule_id: Option<String>,
    pub groups: Vec<Group>,
    #[serde(rename = "unplacedGuests")]
    pub unplaced_guests: Vec<UnplacedGuest>,
    /// Only present on freshly generated results
    pub stats: Option<GroupingStats>,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Clear groupings response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearGroupingsResponse {
    pub success: bool,
    #[serde(rename = "groupsRemoved")]
    pub groups_removed: u64,
}
