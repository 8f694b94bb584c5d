use crate::{Point, Primitive};

/// Use the caller supplied seeds verbatim, in their given order.
#[inline(always)] pub fn calculate<T: Primitive>(seeds: &[Point<T>], k: usize) -> Vec<Point<T>> {
    if seeds.len() != k {
        log::warn!("manual initialization with {} seeds while k = {}, using the seeds as given", seeds.len(), k);
    }
    seeds.to_vec()
}
