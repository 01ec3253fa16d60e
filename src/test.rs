//! Shared fixtures: seeded random point sets and linear-scan reference queries.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::kdtree::KDTree;
use crate::r#type::{IndexableNum, Point};

/// `n` random points with both coordinates in `min..max`. Duplicates are likely, on purpose.
pub(crate) fn random_points(seed: u64, n: usize, min: i32, max: i32) -> Vec<Point<i32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point::new(rng.gen_range(min..max), rng.gen_range(min..max)))
        .collect()
}

pub(crate) fn random_point(rng: &mut StdRng, min: i32, max: i32) -> Point<i32> {
    Point::new(rng.gen_range(min..max), rng.gen_range(min..max))
}

pub(crate) fn random_tree(seed: u64, n: usize) -> (Vec<Point<i32>>, KDTree<i32>) {
    let points = random_points(seed, n, 1, 100);
    let tree = KDTree::try_new(points.iter().copied()).unwrap();
    (points, tree)
}

pub(crate) fn random_float_point(rng: &mut StdRng) -> Point<f64> {
    Point::new(rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0))
}

/// Like [`random_tree`], with `f64` coordinates in `-500.0..500.0`.
pub(crate) fn random_float_tree(seed: u64, n: usize) -> (Vec<Point<f64>>, KDTree<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<Point<f64>> = (0..n).map(|_| random_float_point(&mut rng)).collect();
    let tree = KDTree::try_new(points.iter().copied()).unwrap();
    (points, tree)
}

/// Distance from `query` to the closest of `points`, by linear scan.
pub(crate) fn linear_nearest_distance<N: IndexableNum>(
    points: &[Point<N>],
    query: &Point<N>,
) -> f64 {
    points
        .iter()
        .map(|p| p.distance(query))
        .fold(f64::INFINITY, f64::min)
}

/// Sorted distances of all `points` within `r` of `query`, by linear scan.
pub(crate) fn linear_within_distances<N: IndexableNum>(
    points: &[Point<N>],
    query: &Point<N>,
    r: f64,
) -> Vec<f64> {
    let mut distances: Vec<f64> = points
        .iter()
        .map(|p| p.distance(query))
        .filter(|d| *d <= r)
        .collect();
    distances.sort_by(f64::total_cmp);
    distances
}

/// Sorted distances of the `k` closest `points` to `query`, by linear scan.
pub(crate) fn linear_k_nearest_distances<N: IndexableNum>(
    points: &[Point<N>],
    query: &Point<N>,
    k: usize,
) -> Vec<f64> {
    let mut distances: Vec<f64> = points.iter().map(|p| p.distance(query)).collect();
    distances.sort_by(f64::total_cmp);
    distances.truncate(k);
    distances
}
