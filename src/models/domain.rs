use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Directional tee-time preference stored on a golfer's profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeeTimePreference {
    #[default]
    None,
    Early,
    Late,
}

impl TeeTimePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeeTimePreference::None => "none",
            TeeTimePreference::Early => "early",
            TeeTimePreference::Late => "late",
        }
    }
}

impl fmt::Display for TeeTimePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TeeTimePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" => Ok(TeeTimePreference::None),
            "early" => Ok(TeeTimePreference::Early),
            "late" => Ok(TeeTimePreference::Late),
            other => Err(format!("unknown tee time preference: {}", other)),
        }
    }
}

/// A confirmed attendee for one game date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Golfer {
    #[serde(rename = "profileId")]
    pub profile_id: String,
    #[serde(rename = "teeTimePreference", default)]
    pub tee_time_preference: TeeTimePreference,
}

impl Golfer {
    pub fn new(profile_id: impl Into<String>, tee_time_preference: TeeTimePreference) -> Self {
        Self {
            profile_id: profile_id.into(),
            tee_time_preference,
        }
    }
}

/// Ranked playing-partner preference (rank 1 is the strongest)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceEdge {
    #[serde(rename = "fromProfileId")]
    pub from_profile_id: String,
    #[serde(rename = "toProfileId")]
    pub to_profile_id: String,
    pub rank: u8,
}

impl PreferenceEdge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, rank: u8) -> Self {
        Self {
            from_profile_id: from.into(),
            to_profile_id: to.into(),
            rank,
        }
    }
}

/// Approved guest request tied to a hosting member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRequest {
    #[serde(rename = "guestRequestId")]
    pub guest_request_id: String,
    #[serde(rename = "hostProfileId")]
    pub host_profile_id: String,
}

impl GuestRequest {
    pub fn new(guest_request_id: impl Into<String>, host_profile_id: impl Into<String>) -> Self {
        Self {
            guest_request_id: guest_request_id.into(),
            host_profile_id: host_profile_id.into(),
        }
    }
}

/// Guest whose host is not among the confirmed golfers
pub type UnplacedGuest = GuestRequest;

/// One tee group of the finished assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(rename = "groupNumber")]
    pub group_number: u32,
    #[serde(rename = "teeOrder")]
    pub tee_order: u32,
    pub members: Vec<String>,
    #[serde(default)]
    pub guests: Vec<String>,
    #[serde(rename = "harmonyScore")]
    pub harmony_score: f64,
}

impl Group {
    pub fn contains(&self, profile_id: &str) -> bool {
        self.members.iter().any(|m| m == profile_id)
    }
}

/// Audit figures for one engine run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupingStats {
    #[serde(rename = "golferCount")]
    pub golfer_count: usize,
    #[serde(rename = "groupCount")]
    pub group_count: usize,
    pub capacity: usize,
    #[serde(rename = "initialAffinity")]
    pub initial_affinity: u64,
    #[serde(rename = "finalAffinity")]
    pub final_affinity: u64,
    #[serde(rename = "swapsApplied")]
    pub swaps_applied: usize,
    #[serde(rename = "iterationCap")]
    pub iteration_cap: usize,
    pub converged: bool,
}

/// Complete output of the grouping engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingResult {
    /// Groups ordered by tee order
    pub groups: Vec<Group>,
    #[serde(rename = "unplacedGuests", default)]
    pub unplaced_guests: Vec<UnplacedGuest>,
    #[serde(default)]
    pub stats: GroupingStats,
}

impl GroupingResult {
    /// Find the group a member plays in
    pub fn group_of(&self, profile_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.contains(profile_id))
    }
}
