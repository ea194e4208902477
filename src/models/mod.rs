// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Golfer, TeeTimePreference, PreferenceEdge, GuestRequest, UnplacedGuest, Group, GroupingStats, GroupingResult};
pub use requests::{GenerateGroupingsRequest, PreviewGroupingsRequest};
pub use responses::{GroupingResponse, HealthResponse, ErrorResponse, ClearGroupingsResponse};
