// Criterion benchmarks for Teesheet

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use teesheet::core::{affinity::AffinityTable, former::form_groups, optimizer::optimize, GroupingEngine};
use teesheet::models::{Golfer, GuestRequest, PreferenceEdge, TeeTimePreference};

fn create_roster(size: usize) -> (Vec<Golfer>, Vec<PreferenceEdge>) {
    let golfers = (0..size)
        .map(|i| {
            let preference = match i % 3 {
                0 => TeeTimePreference::Early,
                1 => TeeTimePreference::Late,
                _ => TeeTimePreference::None,
            };
            Golfer::new(format!("member-{:03}", i), preference)
        })
        .collect();

    // Every golfer ranks three partners
    let preferences = (0..size)
        .flat_map(|i| {
            (1..=3u8).map(move |rank| {
                let partner = (i * 7 + rank as usize * 13) % size;
                PreferenceEdge::new(format!("member-{:03}", i), format!("member-{:03}", partner), rank)
            })
        })
        .collect();

    (golfers, preferences)
}

fn bench_affinity_table(c: &mut Criterion) {
    let (golfers, preferences) = create_roster(48);

    c.bench_function("affinity_table_48", |b| {
        b.iter(|| AffinityTable::build(black_box(&golfers), black_box(&preferences)));
    });
}

fn bench_form_and_optimize(c: &mut Criterion) {
    let (golfers, preferences) = create_roster(48);
    let table = AffinityTable::build(&golfers, &preferences);

    c.bench_function("form_and_optimize_48", |b| {
        b.iter(|| {
            let mut groups = form_groups(black_box(&table), 4);
            optimize(&table, &mut groups, 480)
        });
    });
}

fn bench_full_engine(c: &mut Criterion) {
    let engine = GroupingEngine::default();
    let mut group = c.benchmark_group("generate_groupings");

    for size in [8, 24, 48, 96].iter() {
        let (golfers, preferences) = create_roster(*size);
        let guests = vec![GuestRequest::new("guest-1", "member-000")];

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                engine
                    .generate(black_box(&golfers), black_box(&preferences), black_box(&guests))
                    .ok()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_affinity_table,
    bench_form_and_optimize,
    bench_full_engine
);

criterion_main!(benches);
