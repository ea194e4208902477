// Unit tests for Teesheet

use teesheet::core::{
    affinity::{preference_weight, AffinityTable},
    former::form_groups,
    guests::attach_guests,
    optimizer::optimize,
    scoring::{assign_tee_order, harmony_score, Earliness},
};
use teesheet::models::{Golfer, Group, GuestRequest, PreferenceEdge, TeeTimePreference};

fn golfers(ids: &[&str]) -> Vec<Golfer> {
    ids.iter().map(|id| Golfer::new(*id, TeeTimePreference::None)).collect()
}

#[test]
fn test_weight_is_rank_monotonic() {
    for rank in 1..10u8 {
        assert!(preference_weight(rank) > preference_weight(rank + 1));
    }
    assert_eq!(preference_weight(10), 1);
}

#[test]
fn test_affinity_is_symmetric() {
    let table = AffinityTable::build(
        &golfers(&["p1", "p2", "p3", "p4"]),
        &[
            PreferenceEdge::new("p1", "p2", 3),
            PreferenceEdge::new("p3", "p1", 1),
            PreferenceEdge::new("p4", "p3", 7),
            PreferenceEdge::new("p3", "p4", 2),
        ],
    );

    for a in 0..table.len() {
        assert_eq!(table.get(a, a), 0);
        for b in 0..table.len() {
            assert_eq!(table.get(a, b), table.get(b, a));
        }
    }
    assert_eq!(table.get(2, 3), preference_weight(7) + preference_weight(2));
}

#[test]
fn test_preferences_for_absent_golfers_ignored() {
    let with_absent = AffinityTable::build(
        &golfers(&["p1", "p2"]),
        &[
            PreferenceEdge::new("p1", "p2", 4),
            PreferenceEdge::new("p1", "away", 1),
            PreferenceEdge::new("away", "p2", 1),
        ],
    );

    assert_eq!(with_absent.get(0, 1), preference_weight(4));
    assert_eq!(with_absent.index_of("away"), None);
}

#[test]
fn test_former_partitions_everyone_once() {
    let ids: Vec<String> = (0..11).map(|i| format!("g{:02}", i)).collect();
    let roster: Vec<Golfer> = ids.iter().map(|id| Golfer::new(id.clone(), TeeTimePreference::None)).collect();
    let edges = vec![
        PreferenceEdge::new("g03", "g07", 1),
        PreferenceEdge::new("g07", "g03", 2),
        PreferenceEdge::new("g10", "g01", 5),
    ];
    let table = AffinityTable::build(&roster, &edges);

    let groups = form_groups(&table, 4);

    let mut seen: Vec<usize> = groups.iter().flatten().copied().collect();
    seen.sort();
    assert_eq!(seen, (0..11).collect::<Vec<_>>());
    assert!(groups.iter().all(|g| !g.is_empty() && g.len() <= 4));
    assert_eq!(groups.iter().filter(|g| g.len() < 4).count(), 1);
}

#[test]
fn test_optimizer_improves_poor_seed() {
    let table = AffinityTable::build(
        &golfers(&["a", "b", "c", "d", "e", "f"]),
        &[
            PreferenceEdge::new("a", "d", 1),
            PreferenceEdge::new("d", "a", 1),
            PreferenceEdge::new("b", "e", 1),
            PreferenceEdge::new("c", "f", 1),
        ],
    );
    let mut groups = vec![vec![0, 1, 2], vec![3, 4, 5]];
    let before = table.partition_affinity(&groups);

    let outcome = optimize(&table, &mut groups, 60);

    assert!(outcome.converged);
    assert!(table.partition_affinity(&groups) > before);
}

#[test]
fn test_harmony_of_perfect_foursome() {
    let ids = ["a", "b", "c", "d"];
    let mut edges = Vec::new();
    for from in ids {
        for to in ids {
            if from != to {
                edges.push(PreferenceEdge::new(from, to, 1));
            }
        }
    }
    let table = AffinityTable::build(&golfers(&ids), &edges);

    assert_eq!(harmony_score(&table, &[0, 1, 2, 3]), 1.0);
}

#[test]
fn test_tee_order_is_permutation() {
    let groups = vec![
        (1, Earliness::from_preferences(&[TeeTimePreference::Late])),
        (2, Earliness::from_preferences(&[TeeTimePreference::Early])),
        (3, Earliness::from_preferences(&[TeeTimePreference::None])),
        (4, Earliness::from_preferences(&[TeeTimePreference::Early, TeeTimePreference::None])),
    ];

    let order = assign_tee_order(&groups);
    let mut tee_orders: Vec<u32> = order.iter().map(|&(_, t)| t).collect();
    tee_orders.sort();

    assert_eq!(tee_orders, vec![1, 2, 3, 4]);
    assert_eq!(order[0], (2, 1));
    assert_eq!(order[3], (1, 4));
}

#[test]
fn test_unplaced_guest_reported() {
    let mut groups = vec![Group {
        group_number: 1,
        tee_order: 1,
        members: vec!["host".to_string()],
        guests: vec![],
        harmony_score: 0.0,
    }];

    let unplaced = attach_guests(
        &mut groups,
        &[GuestRequest::new("visit-1", "host"), GuestRequest::new("visit-2", "absent")],
    );

    assert_eq!(groups[0].guests, vec!["visit-1"]);
    assert_eq!(unplaced.len(), 1);
    assert_eq!(unplaced[0].host_profile_id, "absent");
}
