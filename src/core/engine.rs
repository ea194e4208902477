use std::collections::HashSet;
use thiserror::Error;
use crate::core::{
    affinity::AffinityTable,
    former::form_groups,
    guests::attach_guests,
    optimizer::optimize,
    scoring::{assign_tee_order, harmony_score, Earliness},
};
use crate::models::{Golfer, Group, GroupingResult, GroupingStats, GuestRequest, PreferenceEdge, TeeTimePreference};

/// Default members per tee group
pub const DEFAULT_CAPACITY: usize = 4;
/// Default optimizer swaps allowed per golfer
pub const DEFAULT_ITERATION_FACTOR: usize = 10;

/// Input problems that stop a grouping run before anything is produced
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GroupingError {
    #[error("No confirmed golfers to group")]
    EmptyRoster,

    #[error("Group capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    #[error("Duplicate golfer in roster: {0}")]
    DuplicateGolfer(String),
}

/// Tunables for one engine instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub capacity: usize,
    pub iteration_factor: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            iteration_factor: DEFAULT_ITERATION_FACTOR,
        }
    }
}

/// Tee-group assignment engine
///
/// # Pipeline Stages
/// 1. Affinity table from ranked partner preferences
/// 2. Greedy group formation
/// 3. Swap-based local search
/// 4. Tee order and harmony scoring
/// 5. Guest attachment
///
/// The engine is a pure function of its inputs: input ordering does not
/// matter and identical inputs always produce identical results.
#[derive(Debug, Clone)]
pub struct GroupingEngine {
    settings: EngineSettings,
}

impl GroupingEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn with_default_settings() -> Self {
        Self {
            settings: EngineSettings::default(),
        }
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Group golfers using the configured capacity
    pub fn generate(
        &self,
        golfers: &[Golfer],
        preferences: &[PreferenceEdge],
        guests: &[GuestRequest],
    ) -> Result<GroupingResult, GroupingError> {
        self.generate_with_capacity(golfers, preferences, guests, self.settings.capacity)
    }

    /// Group golfers with an explicit capacity for this run
    pub fn generate_with_capacity(
        &self,
        golfers: &[Golfer],
        preferences: &[PreferenceEdge],
        guests: &[GuestRequest],
        capacity: usize,
    ) -> Result<GroupingResult, GroupingError> {
        validate_roster(golfers, capacity)?;

        // Stage 1: affinity model
        let table = AffinityTable::build(golfers, preferences);
        if table.is_flat() {
            tracing::debug!(
                "No partner preferences among {} golfers, groups follow profile id order",
                table.len()
            );
        }

        // Stage 2: greedy seeding
        let mut partition = form_groups(&table, capacity);
        let initial_affinity = table.partition_affinity(&partition);

        // Stage 3: local search
        let iteration_cap = self.settings.iteration_factor.saturating_mul(table.len());
        let outcome = optimize(&table, &mut partition, iteration_cap);
        let final_affinity = table.partition_affinity(&partition);

        if !outcome.converged {
            tracing::debug!(
                "Optimizer stopped at iteration cap {} before converging",
                iteration_cap
            );
        }

        // Stage 4: tee order and harmony
        let mut preference_by_index = vec![TeeTimePreference::None; table.len()];
        for golfer in golfers {
            if let Some(index) = table.index_of(&golfer.profile_id) {
                preference_by_index[index] = golfer.tee_time_preference;
            }
        }

        let earliness: Vec<(u32, Earliness)> = partition
            .iter()
            .enumerate()
            .map(|(i, members)| {
                let e = Earliness::from_preferences(members.iter().map(|&m| &preference_by_index[m]));
                (i as u32 + 1, e)
            })
            .collect();

        let mut groups: Vec<Group> = assign_tee_order(&earliness)
            .into_iter()
            .map(|(group_number, tee_order)| {
                let index = group_number as usize - 1;
                let members = &partition[index];
                tracing::debug!(
                    "Group {} earliness {:.2} tees off {}",
                    group_number,
                    earliness[index].1.value(),
                    tee_order
                );
                let mut member_ids: Vec<String> =
                    members.iter().map(|&m| table.id(m).to_string()).collect();
                member_ids.sort();

                Group {
                    group_number,
                    tee_order,
                    members: member_ids,
                    guests: Vec::new(),
                    harmony_score: harmony_score(&table, members),
                }
            })
            .collect();

        // Stage 5: guests
        let unplaced_guests = attach_guests(&mut groups, guests);

        let stats = GroupingStats {
            golfer_count: table.len(),
            group_count: groups.len(),
            capacity,
            initial_affinity,
            final_affinity,
            swaps_applied: outcome.swaps_applied,
            iteration_cap,
            converged: outcome.converged,
        };

        tracing::info!(
            "Grouped {} golfers into {} groups (affinity {} -> {}, {} swaps, {} unplaced guests)",
            stats.golfer_count,
            stats.group_count,
            initial_affinity,
            final_affinity,
            stats.swaps_applied,
            unplaced_guests.len()
        );

        Ok(GroupingResult {
            groups,
            unplaced_guests,
            stats,
        })
    }
}

impl Default for GroupingEngine {
    fn default() -> Self {
        Self::with_default_settings()
    }
}

/// Reject rosters the engine cannot partition
pub fn validate_roster(golfers: &[Golfer], capacity: usize) -> Result<(), GroupingError> {
    if capacity < 1 {
        return Err(GroupingError::InvalidCapacity(capacity));
    }
    if golfers.is_empty() {
        return Err(GroupingError::EmptyRoster);
    }

    let mut seen = HashSet::with_capacity(golfers.len());
    for golfer in golfers {
        if !seen.insert(golfer.profile_id.as_str()) {
            return Err(GroupingError::DuplicateGolfer(golfer.profile_id.clone()));
        }
    }

    Ok(())
}
