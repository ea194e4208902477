//! Teesheet - weekly tee-group assignment for club golf events
//!
//! This library provides the grouping engine used to split the golfers who
//! confirmed for a game date into tee groups. Partner preferences drive the
//! partition, tee-time preferences drive the tee order, and every run is
//! deterministic for a given roster.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{GroupingEngine, GroupingError, EngineSettings, AffinityTable, preference_weight};
pub use crate::models::{Golfer, TeeTimePreference, PreferenceEdge, GuestRequest, Group, GroupingResult, GroupingStats};
