use crate::core::affinity::AffinityTable;

/// Greedy initial partition of all golfers into groups of at most `capacity`
///
/// Each group is seeded with the strongest remaining pair (or the lowest
/// unplaced golfer when no pair has positive affinity) and then filled with
/// whichever unplaced golfer adds the most affinity. Groups are always filled
/// to capacity while golfers remain, so only the last group can come up short.
/// Every tie goes to the lowest index, which is the lowest profile id.
pub fn form_groups(table: &AffinityTable, capacity: usize) -> Vec<Vec<usize>> {
    let n = table.len();
    let mut placed = vec![false; n];
    let mut remaining = n;
    let mut groups = Vec::with_capacity(n.div_ceil(capacity.max(1)));

    while remaining > 0 {
        let mut group = Vec::with_capacity(capacity);

        match strongest_unplaced_pair(table, &placed) {
            Some((a, b)) if capacity >= 2 => {
                group.push(a);
                group.push(b);
            }
            _ => {
                // `remaining > 0` guarantees an unplaced golfer
                if let Some(first) = placed.iter().position(|p| !p) {
                    group.push(first);
                }
            }
        }
        for &member in &group {
            placed[member] = true;
        }
        remaining -= group.len();

        while group.len() < capacity && remaining > 0 {
            let Some(next) = best_addition(table, &placed, &group) else {
                break;
            };
            placed[next] = true;
            group.push(next);
            remaining -= 1;
        }

        tracing::trace!(
            "Formed group {} with {} members (affinity {})",
            groups.len() + 1,
            group.len(),
            table.group_affinity(&group)
        );
        groups.push(group);
    }

    groups
}

/// Unplaced pair with the highest positive affinity
fn strongest_unplaced_pair(table: &AffinityTable, placed: &[bool]) -> Option<(usize, usize)> {
    let n = table.len();
    let mut best: Option<(usize, usize, u32)> = None;

    for a in (0..n).filter(|&a| !placed[a]) {
        for b in (a + 1..n).filter(|&b| !placed[b]) {
            let affinity = table.get(a, b);
            if affinity > 0 && best.map_or(true, |(_, _, top)| affinity > top) {
                best = Some((a, b, affinity));
            }
        }
    }

    best.map(|(a, b, _)| (a, b))
}

/// Unplaced golfer adding the most affinity to `group`, zero included
fn best_addition(table: &AffinityTable, placed: &[bool], group: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;

    for candidate in (0..table.len()).filter(|&c| !placed[c]) {
        let gain = table.affinity_to(candidate, group);
        if best.map_or(true, |(_, top)| gain > top) {
            best = Some((candidate, gain));
        }
    }

    best.map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Golfer, PreferenceEdge, TeeTimePreference};

    fn table(ids: &[&str], edges: &[PreferenceEdge]) -> AffinityTable {
        let golfers: Vec<Golfer> = ids
            .iter()
            .map(|id| Golfer::new(*id, TeeTimePreference::None))
            .collect();
        AffinityTable::build(&golfers, edges)
    }

    #[test]
    fn test_no_preferences_groups_by_id() {
        let t = table(&["a", "b", "c", "d", "e", "f"], &[]);
        let groups = form_groups(&t, 4);

        assert_eq!(groups, vec![vec![0, 1, 2, 3], vec![4, 5]]);
    }

    #[test]
    fn test_strongest_pair_seeds_first_group() {
        let t = table(
            &["a", "b", "c", "d", "e", "f"],
            &[
                PreferenceEdge::new("e", "f", 1),
                PreferenceEdge::new("f", "e", 1),
                PreferenceEdge::new("a", "b", 5),
            ],
        );
        let groups = form_groups(&t, 2);

        assert_eq!(groups[0], vec![4, 5]);
        assert_eq!(groups[1], vec![0, 1]);
        assert_eq!(groups[2], vec![2, 3]);
    }

    #[test]
    fn test_fills_with_highest_gain() {
        let t = table(
            &["a", "b", "c", "d", "e"],
            &[
                PreferenceEdge::new("a", "b", 1),
                PreferenceEdge::new("d", "a", 3),
                PreferenceEdge::new("c", "b", 8),
            ],
        );
        let groups = form_groups(&t, 3);

        // d adds 8 to {a, b}, c only adds 3
        assert_eq!(groups[0], vec![0, 1, 3]);
        assert_eq!(groups[1], vec![2, 4]);
    }

    #[test]
    fn test_capacity_one_makes_singletons() {
        let t = table(&["a", "b", "c"], &[PreferenceEdge::new("a", "b", 1)]);
        let groups = form_groups(&t, 1);

        assert_eq!(groups, vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_only_last_group_is_short() {
        let t = table(&["a", "b", "c", "d", "e", "f", "g"], &[PreferenceEdge::new("g", "a", 2)]);
        let groups = form_groups(&t, 3);
        let sizes: Vec<usize> = groups.iter().map(Vec::len).collect();

        assert_eq!(sizes, vec![3, 3, 1]);
    }
}
