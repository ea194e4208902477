use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{Golfer, GuestRequest, PreferenceEdge};

/// Request to generate and store groupings for a schedule
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GenerateGroupingsRequest {
    /// Overrides the configured group capacity for this run
    #[validate(range(min = 1))]
    #[serde(default)]
    pub capacity: Option<usize>,
}

/// Stateless grouping request; nothing is read from or written to storage
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PreviewGroupingsRequest {
    #[validate(length(min = 1))]
    pub golfers: Vec<Golfer>,
    #[serde(default)]
    pub preferences: Vec<PreferenceEdge>,
    #[serde(default)]
    pub guests: Vec<GuestRequest>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub capacity: Option<usize>,
}
