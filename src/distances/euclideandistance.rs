use crate::{DistanceFunction, Point, Primitive};

/// Plain euclidean distance in the plane: `sqrt((x1-x2)^2 + (y1-y2)^2)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanDistance;

impl<T: Primitive> DistanceFunction<T> for EuclideanDistance {
    #[inline(always)]
    fn distance(&self, a: &Point<T>, b: &Point<T>) -> T {
        let (dx, dy) = (a.x - b.x, a.y - b.y);
        (dx * dx + dy * dy).sqrt()
    }
}
