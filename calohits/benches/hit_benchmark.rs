use calohits::{Hit, HitBuffer};
use spacemath::{Point3, Vector3};
use rand::Rng;
use rand::thread_rng;

use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    Criterion
};

fn random_hits(count: usize, primaries: i32, cells: i32) -> Vec<Hit> {
    let mut rng = thread_rng();
    (0..count).map(|track| {
        Hit::new(
            rng.gen_range(0..primaries),
            track as i32,
            rng.gen_range(0..cells),
            rng.gen_range(1.0..100.0),
            Point3::new(rng.gen(), rng.gen(), rng.gen()),
            Vector3::new(rng.gen(), rng.gen(), rng.gen()),
            rng.gen_range(0.0..20.0),
            rng.gen_range(0.0..0.5),
        )
    }).collect()
}

fn hit_merge_pair(c: &mut Criterion) {
    let a = black_box(Hit::new(5, 1, 10, 100.0, Point3::origin(), Vector3::new(1.0, 0.0, 0.0), 2.0, 0.5));
    let b = black_box(Hit::new(5, 2, 10, 100.0, Point3::new(1.0, 1.0, 1.0), Vector3::new(0.0, 1.0, 0.0), 2.5, 0.3));

    c.bench_function(
        "hit merge pair",
        |bench| bench.iter(|| a + b)
    );
}

fn hit_compare_pair(c: &mut Criterion) {
    let a = black_box(Hit::new(5, 1, 10, 100.0, Point3::origin(), Vector3::zero(), 2.0, 0.5));
    let b = black_box(Hit::new(5, 2, 11, 100.0, Point3::origin(), Vector3::zero(), 2.5, 0.3));

    c.bench_function(
        "hit compare pair",
        |bench| bench.iter(|| a < b)
    );
}

fn buffer_merge_1000_dense(c: &mut Criterion) {
    let hits = random_hits(1000, 4, 16);

    c.bench_function(
        "buffer merge 1000 hits into 64 cells",
        |bench| bench.iter(|| {
            let mut buffer: HitBuffer = hits.iter().copied().collect();
            buffer.merge_duplicates()
        })
    );
}

fn buffer_merge_100000_sparse(c: &mut Criterion) {
    let hits = random_hits(100000, 200, 12000);

    c.bench_function(
        "buffer merge 100000 hits into sparse cells",
        |bench| bench.iter(|| {
            let mut buffer: HitBuffer = hits.iter().copied().collect();
            buffer.merge_duplicates()
        })
    );
}

criterion_group!(benches,
    hit_merge_pair,
    hit_compare_pair,
    buffer_merge_1000_dense,
    buffer_merge_100000_sparse
);
criterion_main!(benches);
