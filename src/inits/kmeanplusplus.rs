use crate::{helpers, DistanceFunction, Point, Primitive};
use rand::prelude::*;

/// K-Means++ initialization.
///
/// Starts by drawing one sample uniformly as first centroid. Each following centroid is drawn
/// with a probability proportional to the sample's (plain, not squared) distance to its nearest
/// already chosen centroid.
#[inline(always)] pub fn calculate<T, D>(points: &[Point<T>], k: usize, distance: &D, rnd: &mut dyn RngCore) -> Vec<Point<T>>
        where T: Primitive, D: DistanceFunction<T> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rnd.gen_range(0..points.len())]);
    for _ in 1..k {
        let w = weights(points, &centroids, distance);
        centroids.push(points[draw_weighted(&w, rnd)]);
    }
    centroids
}

/// Sampling weight of every point: its distance to the nearest chosen centroid.
/// Zero exactly for points coinciding with a chosen centroid.
pub fn weights<T, D>(points: &[Point<T>], centroids: &[Point<T>], distance: &D) -> Vec<T>
        where T: Primitive, D: DistanceFunction<T> {
    points.iter().map(|p| helpers::min_distance(p, centroids, distance)).collect()
}

/// Cumulative-subtraction draw: `r` is uniform in `[0, sum(weights))`, walk the weights subtracting
/// each one from `r` and stop at the first positive weight that brings `r` to zero or below.
///
/// If all weights are zero the first index is returned. Should rounding leave `r` positive after
/// the walk, the last positively weighted index is returned.
pub fn draw_weighted<T: Primitive>(weights: &[T], rnd: &mut dyn RngCore) -> usize {
    let total: T = weights.iter().cloned().sum();
    if !(total > T::zero()) || !total.is_finite() {
        return 0;
    }
    let mut r = rnd.gen_range(T::zero()..total);
    let mut last_positive = 0;
    for (idx, w) in weights.iter().cloned().enumerate() {
        if !(w > T::zero()) {
            continue;
        }
        last_positive = idx;
        r -= w;
        if r <= T::zero() {
            return idx;
        }
    }
    last_positive
}
