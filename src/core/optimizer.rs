use crate::core::affinity::AffinityTable;

/// Outcome of a local-search pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeOutcome {
    pub swaps_applied: usize,
    pub converged: bool,
}

/// Candidate exchange of two golfers between groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Swap {
    a: usize,
    b: usize,
    delta: i64,
}

/// Hill-climb the partition by swapping golfers between groups
///
/// Each step applies the single swap with the largest positive gain in
/// captured affinity, lowest golfer pair first on ties. Stops when no swap
/// helps or after `max_iterations` swaps. Group sizes never change.
pub fn optimize(
    table: &AffinityTable,
    groups: &mut [Vec<usize>],
    max_iterations: usize,
) -> OptimizeOutcome {
    let mut membership = vec![0usize; table.len()];
    for (group_index, group) in groups.iter().enumerate() {
        for &member in group {
            membership[member] = group_index;
        }
    }

    let mut swaps_applied = 0;
    while swaps_applied < max_iterations {
        let Some(swap) = best_swap(table, groups, &membership) else {
            return OptimizeOutcome { swaps_applied, converged: true };
        };

        apply_swap(groups, &mut membership, swap);
        swaps_applied += 1;

        tracing::trace!(
            "Swap {}: {} <-> {} (+{})",
            swaps_applied,
            table.id(swap.a),
            table.id(swap.b),
            swap.delta
        );
    }

    // The cap was hit; converged only if nothing is left to improve
    let converged = best_swap(table, groups, &membership).is_none();
    OptimizeOutcome { swaps_applied, converged }
}

/// Change in captured affinity from exchanging `a` and `b`
fn swap_delta(table: &AffinityTable, groups: &[Vec<usize>], membership: &[usize], a: usize, b: usize) -> i64 {
    let group_a = &groups[membership[a]];
    let group_b = &groups[membership[b]];

    let a_stays: i64 = group_a.iter().filter(|&&m| m != a).map(|&m| table.get(a, m) as i64).sum();
    let b_stays: i64 = group_b.iter().filter(|&&m| m != b).map(|&m| table.get(b, m) as i64).sum();
    let a_moves: i64 = group_b.iter().filter(|&&m| m != b).map(|&m| table.get(a, m) as i64).sum();
    let b_moves: i64 = group_a.iter().filter(|&&m| m != a).map(|&m| table.get(b, m) as i64).sum();

    a_moves + b_moves - a_stays - b_stays
}

fn best_swap(table: &AffinityTable, groups: &[Vec<usize>], membership: &[usize]) -> Option<Swap> {
    let n = table.len();
    let mut best: Option<Swap> = None;

    for a in 0..n {
        for b in a + 1..n {
            if membership[a] == membership[b] {
                continue;
            }
            let delta = swap_delta(table, groups, membership, a, b);
            if delta > 0 && best.map_or(true, |s| delta > s.delta) {
                best = Some(Swap { a, b, delta });
            }
        }
    }

    best
}

fn apply_swap(groups: &mut [Vec<usize>], membership: &mut [usize], swap: Swap) {
    let (ga, gb) = (membership[swap.a], membership[swap.b]);

    if let Some(slot) = groups[ga].iter_mut().find(|m| **m == swap.a) {
        *slot = swap.b;
    }
    if let Some(slot) = groups[gb].iter_mut().find(|m| **m == swap.b) {
        *slot = swap.a;
    }

    membership[swap.a] = gb;
    membership[swap.b] = ga;
}
