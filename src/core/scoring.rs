use std::cmp::Ordering;
use crate::core::affinity::{AffinityTable, MAX_PAIR_AFFINITY};
use crate::models::TeeTimePreference;

/// Net early-versus-late signal of a group, kept as an exact fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Earliness {
    net: i64,
    size: i64,
}

impl Earliness {
    pub fn from_preferences<'a, I>(preferences: I) -> Self
    where
        I: IntoIterator<Item = &'a TeeTimePreference>,
    {
        let mut net = 0;
        let mut size = 0;
        for preference in preferences {
            size += 1;
            match preference {
                TeeTimePreference::Early => net += 1,
                TeeTimePreference::Late => net -= 1,
                TeeTimePreference::None => {}
            }
        }
        Self { net, size }
    }

    /// `(early - late) / size`, zero for an empty group
    pub fn value(&self) -> f64 {
        if self.size == 0 {
            0.0
        } else {
            self.net as f64 / self.size as f64
        }
    }
}

impl Ord for Earliness {
    fn cmp(&self, other: &Self) -> Ordering {
        // Cross-multiply so equal ratios compare equal
        (self.net * other.size.max(1)).cmp(&(other.net * self.size.max(1)))
    }
}

impl PartialOrd for Earliness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Tee order (1 = first off) for groups identified by group number
///
/// Groups leaning early go off first. Equal earliness keeps ascending group
/// number order. Returns `(group_number, tee_order)` sorted by tee order.
pub fn assign_tee_order(groups: &[(u32, Earliness)]) -> Vec<(u32, u32)> {
    let mut ordered: Vec<&(u32, Earliness)> = groups.iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    ordered
        .into_iter()
        .enumerate()
        .map(|(position, &(group_number, _))| (group_number, position as u32 + 1))
        .collect()
}

/// Share of the best possible affinity a group captured, in [0, 1]
///
/// A single golfer has nobody to be matched with and scores 0.
pub fn harmony_score(table: &AffinityTable, members: &[usize]) -> f64 {
    let size = members.len();
    if size <= 1 {
        return 0.0;
    }

    let pairs = (size * (size - 1) / 2) as f64;
    let captured = table.group_affinity(members) as f64;

    (captured / (MAX_PAIR_AFFINITY as f64 * pairs)).clamp(0.0, 1.0)
}
