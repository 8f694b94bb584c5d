use crate::{Point, Primitive};
use rand::prelude::*;

/// Draw `k` centroids by independent uniform sampling of dataset indices (with replacement).
/// Duplicate centroids are permitted.
#[inline(always)] pub fn calculate<T: Primitive>(points: &[Point<T>], k: usize, rnd: &mut dyn RngCore) -> Vec<Point<T>> {
    (0..k).map(|_| points[rnd.gen_range(0..points.len())]).collect()
}
