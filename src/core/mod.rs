// Core algorithm exports
pub mod affinity;
pub mod engine;
pub mod former;
pub mod guests;
pub mod optimizer;
pub mod scoring;

pub use affinity::{AffinityTable, preference_weight};
pub use engine::{GroupingEngine, GroupingError, EngineSettings, validate_roster};
pub use former::form_groups;
pub use guests::attach_guests;
pub use optimizer::{optimize, OptimizeOutcome};
pub use scoring::{assign_tee_order, harmony_score, Earliness};
