//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use floating_cuts::*;

fn benchmark_index_arithmetic(c: &mut Criterion) {
    let tree = CutTree::<GuillotinePosition>::new(8).expect("tree fits");

    c.bench_function("stages_h8", |b| {
        b.iter(|| tree.nodes().map(|j| stages(black_box(j))).max());
    });

    c.bench_function("level_h8", |b| {
        b.iter(|| {
            tree.nodes()
                .map(|j| level::<GuillotinePosition>(black_box(j)))
                .sum::<usize>()
        });
    });
}

fn benchmark_reconstruction(c: &mut Criterion) {
    let height = 6;
    let mut solved = SolvedTree::<GuillotinePosition>::new(height);
    let tree = CutTree::<GuillotinePosition>::new(height).expect("tree fits");
    for j in tree.nodes() {
        let depth = level::<GuillotinePosition>(j) as u32;
        let cut = if depth % 2 == 0 { Cut::Vertical } else { Cut::Horizontal };
        solved
            .set(j, Dimensions::new(1024 >> depth, 512 >> depth), cut)
            .expect("node in range");
    }
    let occupancy = Occupancy::from_pairs(1, solved.len(), tree.leaves().map(|j| (0, j)))
        .expect("leaves in range");
    let plate = Plate::new(1024, 512);

    c.bench_function("reconstruct_leaves_h6", |b| {
        b.iter(|| {
            let paths = build_paths(black_box(&occupancy), &solved).expect("paths");
            resolve_all(&paths, plate, false, &solved).expect("coordinates")
        });
    });
}

criterion_group!(benches, benchmark_index_arithmetic, benchmark_reconstruction);
criterion_main!(benches);
