//! Performance benchmarks for the storemap grouping pipeline.
//!
//! Run with: `cargo bench`
//!
//! Uses synthetic merchant data at the sizes the production deployment
//! actually sees (hundreds to low thousands of merchants per category).

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use storemap::icon::MarkerIconFactory;
use storemap::synthetic::{generate_merchants, SyntheticConfig};
use storemap::group_merchants;

fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_merchants");

    for &count in &[100usize, 500, 2000] {
        let merchants = generate_merchants(&SyntheticConfig {
            count,
            ..SyntheticConfig::default()
        });

        group.bench_with_input(BenchmarkId::from_parameter(count), &merchants, |b, m| {
            b.iter(|| group_merchants(black_box(m), 5.0));
        });
    }

    group.finish();
}

fn bench_icon_rendering(c: &mut Criterion) {
    let merchants = generate_merchants(&SyntheticConfig {
        count: 1000,
        ..SyntheticConfig::default()
    });
    let groups = group_merchants(&merchants, 5.0);

    c.bench_function("marker_icons_1000_merchants", |b| {
        b.iter(|| {
            let mut factory = MarkerIconFactory::new();
            for g in &groups {
                let _ = black_box(factory.marker_icon(&g.members, &g.key));
            }
        });
    });
}

criterion_group!(benches, bench_grouping, bench_icon_rendering);
criterion_main!(benches);
