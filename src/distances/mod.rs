mod euclideandistance;

use crate::{Point, Primitive};

pub use euclideandistance::EuclideanDistance;

/// Metric used for both cluster assignment and the initialization heuristics.
pub trait DistanceFunction<T: Primitive> {
    fn distance(&self, a: &Point<T>, b: &Point<T>) -> T;
}
