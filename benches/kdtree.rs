use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kd_index::kdtree::KDTree;
use kd_index::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstar::RTree;

fn generate_points(n: usize) -> Vec<Point<f64>> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| Point::new(rng.gen_range(-180.0..180.0), rng.gen_range(-90.0..90.0)))
        .collect()
}

fn construct_kdtree(points: &[Point<f64>]) -> KDTree<f64> {
    KDTree::try_new(points.iter().copied()).unwrap()
}

fn construct_rstar(points: &[Point<f64>]) -> RTree<[f64; 2]> {
    RTree::bulk_load(points.iter().map(|p| [p.x, p.y]).collect())
}

fn linear_nearest(points: &[Point<f64>], query: &Point<f64>) -> Option<Point<f64>> {
    points
        .iter()
        .min_by(|a, b| a.distance(query).total_cmp(&b.distance(query)))
        .copied()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    for size in [1_000, 100_000] {
        let points = generate_points(size);

        let mut group = c.benchmark_group("construction");
        group.bench_with_input(BenchmarkId::new("kdtree", size), &points, |b, points| {
            b.iter(|| construct_kdtree(points))
        });
        group.bench_with_input(BenchmarkId::new("rstar", size), &points, |b, points| {
            b.iter(|| construct_rstar(points))
        });
        group.finish();

        let kdtree = construct_kdtree(&points);
        let rstar_tree = construct_rstar(&points);
        let query = Point::new(12.5, -33.25);

        let mut group = c.benchmark_group("nearest");
        group.bench_function(BenchmarkId::new("kdtree", size), |b| {
            b.iter(|| kdtree.nearest(black_box(query.x), black_box(query.y)))
        });
        group.bench_function(BenchmarkId::new("rstar", size), |b| {
            b.iter(|| rstar_tree.nearest_neighbor(black_box(&[query.x, query.y])))
        });
        group.bench_function(BenchmarkId::new("linear", size), |b| {
            b.iter(|| linear_nearest(&points, black_box(&query)))
        });
        group.finish();

        let r = 5.0;
        let mut group = c.benchmark_group("within");
        group.bench_function(BenchmarkId::new("kdtree", size), |b| {
            b.iter(|| kdtree.within(black_box(query.x), black_box(query.y), r))
        });
        group.bench_function(BenchmarkId::new("rstar", size), |b| {
            b.iter(|| {
                rstar_tree
                    .locate_within_distance(black_box([query.x, query.y]), r * r)
                    .count()
            })
        });
        group.finish();

        let k = 16;
        let mut group = c.benchmark_group("k_nearest");
        group.bench_function(BenchmarkId::new("kdtree", size), |b| {
            b.iter(|| kdtree.k_nearest(black_box(query.x), black_box(query.y), k))
        });
        group.bench_function(BenchmarkId::new("rstar", size), |b| {
            b.iter(|| {
                rstar_tree
                    .nearest_neighbor_iter(black_box(&[query.x, query.y]))
                    .take(k)
                    .count()
            })
        });
        group.finish();
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
