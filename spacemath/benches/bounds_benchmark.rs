use rand::SeedableRng;
use rand::rngs::StdRng;
use spacemath::{Bounds3, Point3, Vector3};

use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    Criterion
};

const CELLS: [usize; 3] = [48, 24, 12];

fn calorimeter() -> Bounds3 {
    Bounds3::new(Point3::origin(), Vector3::new(60.0, 60.0, 120.0))
}

fn cell_index_inside_benchmark(c: &mut Criterion) {
    let bounds = black_box(calorimeter());
    let pos = black_box(Point3::new(12.5, -33.0, 80.25));

    c.bench_function(
        "cell index of contained point",
        |bench| bench.iter(|| bounds.cell_index(pos, CELLS))
    );
}

fn cell_index_outside_benchmark(c: &mut Criterion) {
    let bounds = black_box(calorimeter());
    let pos = black_box(Point3::new(12.5, -33.0, 180.0));

    c.bench_function(
        "cell index of escaped point",
        |bench| bench.iter(|| bounds.cell_index(pos, CELLS))
    );
}

fn cell_center_benchmark(c: &mut Criterion) {
    let bounds = black_box(calorimeter());
    let index = black_box(48 * 24 * 7 + 48 * 5 + 31);

    c.bench_function(
        "cell center lookup",
        |bench| bench.iter(|| bounds.cell_center(index, CELLS))
    );
}

fn cell_sweep_benchmark(c: &mut Criterion) {
    let bounds = black_box(calorimeter());
    let total = CELLS.iter().product::<usize>();

    c.bench_function(
        "cell center to index sweep",
        |bench| bench.iter(|| {
            (0..total)
                .filter_map(|index| bounds.cell_center(index, CELLS))
                .filter_map(|center| bounds.cell_index(center, CELLS))
                .count()
        })
    );
}

fn front_face_sampling_benchmark(c: &mut Criterion) {
    let face = black_box(Bounds3::new_from_extents(Point3::new(-30.0, -30.0, -120.0), Point3::new(30.0, 30.0, -120.0)));
    let mut rng = StdRng::seed_from_u64(5);

    c.bench_function(
        "front face entry sampling",
        |bench| bench.iter(|| face.get_random_within(&mut rng))
    );
}

criterion_group!(benches,
    cell_index_inside_benchmark,
    cell_index_outside_benchmark,
    cell_center_benchmark,
    cell_sweep_benchmark,
    front_face_sampling_benchmark
);
criterion_main!(benches);
