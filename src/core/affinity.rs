use std::collections::HashMap;
use crate::models::{Golfer, PreferenceEdge};

/// Strongest accepted rank
pub const MIN_RANK: u8 = 1;
/// Weakest accepted rank
pub const MAX_RANK: u8 = 10;
/// Affinity of a pair that ranked each other first
pub const MAX_PAIR_AFFINITY: u32 = 2 * preference_weight(MIN_RANK);

/// Weight contributed by one directed preference
///
/// Rank 1 weighs 10, rank 10 weighs 1, anything weaker weighs nothing.
#[inline]
pub const fn preference_weight(rank: u8) -> u32 {
    if rank > 10 {
        0
    } else {
        11 - rank as u32
    }
}

/// Symmetric pairwise affinity between the golfers of one run
///
/// Golfers are indexed in ascending profile id order, so a lower index
/// always means a lower profile id.
#[derive(Debug, Clone)]
pub struct AffinityTable {
    ids: Vec<String>,
    weights: Vec<u32>,
}

impl AffinityTable {
    /// Build the table from the confirmed golfers and all known preferences
    ///
    /// Edges pointing at or from golfers outside the run are ignored, as are
    /// self-preferences and ranks outside 1..=10. A repeated directed edge
    /// keeps its strongest rank.
    pub fn build(golfers: &[Golfer], preferences: &[PreferenceEdge]) -> Self {
        let mut ids: Vec<String> = golfers.iter().map(|g| g.profile_id.clone()).collect();
        ids.sort();

        let index: HashMap<&str, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut strongest: HashMap<(usize, usize), u8> = HashMap::new();
        let mut dropped = 0usize;

        for edge in preferences {
            let from = index.get(edge.from_profile_id.as_str());
            let to = index.get(edge.to_profile_id.as_str());
            match (from, to) {
                (Some(&from), Some(&to))
                    if from != to && (MIN_RANK..=MAX_RANK).contains(&edge.rank) =>
                {
                    strongest
                        .entry((from, to))
                        .and_modify(|rank| *rank = (*rank).min(edge.rank))
                        .or_insert(edge.rank);
                }
                _ => dropped += 1,
            }
        }

        let n = ids.len();
        let mut weights = vec![0u32; n * n];
        for (&(from, to), &rank) in &strongest {
            let w = preference_weight(rank);
            weights[from * n + to] += w;
            weights[to * n + from] += w;
        }

        tracing::debug!(
            "Affinity table built: {} golfers, {} edges used, {} dropped",
            n,
            strongest.len(),
            dropped
        );

        Self { ids, weights }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Profile id of the golfer at `index`
    pub fn id(&self, index: usize) -> &str {
        &self.ids[index]
    }

    /// Index of a profile id, if the golfer is part of this run
    pub fn index_of(&self, profile_id: &str) -> Option<usize> {
        self.ids.binary_search_by(|id| id.as_str().cmp(profile_id)).ok()
    }

    #[inline]
    pub fn get(&self, a: usize, b: usize) -> u32 {
        self.weights[a * self.ids.len() + b]
    }

    /// Affinity between `candidate` and every listed member
    pub fn affinity_to(&self, candidate: usize, members: &[usize]) -> u32 {
        members.iter().map(|&m| self.get(candidate, m)).sum()
    }

    /// Sum of affinities over all member pairs of one group
    pub fn group_affinity(&self, members: &[usize]) -> u32 {
        let mut total = 0;
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                total += self.get(a, b);
            }
        }
        total
    }

    /// Captured affinity over a whole partition
    pub fn partition_affinity(&self, groups: &[Vec<usize>]) -> u64 {
        groups.iter().map(|g| self.group_affinity(g) as u64).sum()
    }

    /// True when no pair has any affinity
    pub fn is_flat(&self) -> bool {
        self.weights.iter().all(|&w| w == 0)
    }
}
