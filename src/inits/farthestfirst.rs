use crate::{helpers, DistanceFunction, Point, Primitive};
use rand::prelude::*;

/// Farthest-first traversal.
///
/// The first centroid is drawn uniformly from the dataset. Every following centroid is the point
/// maximizing its distance to the nearest already chosen centroid. A point has to be strictly
/// farther to replace the current candidate, so ties resolve to the first occurrence in dataset order.
#[inline(always)] pub fn calculate<T, D>(points: &[Point<T>], k: usize, distance: &D, rnd: &mut dyn RngCore) -> Vec<Point<T>>
        where T: Primitive, D: DistanceFunction<T> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rnd.gen_range(0..points.len())]);
    for _ in 1..k {
        centroids.push(points[farthest_point(points, &centroids, distance)]);
    }
    centroids
}

/// Index of the point with the largest minimum distance to `centroids`.
pub(crate) fn farthest_point<T, D>(points: &[Point<T>], centroids: &[Point<T>], distance: &D) -> usize
        where T: Primitive, D: DistanceFunction<T> {
    let mut best_idx = 0;
    let mut best_dist = T::neg_infinity();
    for (idx, p) in points.iter().enumerate() {
        let d = helpers::min_distance(p, centroids, distance);
        if d > best_dist {
            best_idx = idx;
            best_dist = d;
        }
    }
    best_idx
}
