use crate::{Point, Primitive};
use rand::prelude::*;
use std::ops::Range;

/// Amount of samples in the default interactive dataset.
pub const DEFAULT_SAMPLE_CNT: usize = 100;

/// Draw `sample_cnt` points with both coordinates uniformly distributed in `range`.
pub fn generate<T: Primitive>(rnd: &mut dyn RngCore, sample_cnt: usize, range: Range<T>) -> Vec<Point<T>> {
    (0..sample_cnt)
        .map(|_| Point::new(rnd.gen_range(range.clone()), rnd.gen_range(range.clone())))
        .collect()
}

/// The dataset the interactive front end starts with: 100 points in `[-10, 10)` on both axes.
pub fn generate_default<T: Primitive>(rnd: &mut dyn RngCore) -> Vec<Point<T>> {
    let bound = T::from(10.0).unwrap_or_else(T::one);
    generate(rnd, DEFAULT_SAMPLE_CNT, -bound..bound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dataset_bounds() {
        let samples: Vec<Point<f64>> = generate_default(&mut StdRng::seed_from_u64(1));
        assert_eq!(samples.len(), DEFAULT_SAMPLE_CNT);
        assert!(samples.iter().all(|p| (-10.0..10.0).contains(&p.x) && (-10.0..10.0).contains(&p.y)));
    }

    #[test]
    fn custom_range_and_count() {
        let samples = generate(&mut StdRng::seed_from_u64(2), 17, 2.0f32..3.0);
        assert_eq!(samples.len(), 17);
        assert!(samples.iter().all(|p| p.x >= 2.0 && p.x < 3.0 && p.y >= 2.0 && p.y < 3.0));
    }

    #[test]
    fn seeded_is_reproducible() {
        let a: Vec<Point<f64>> = generate_default(&mut StdRng::seed_from_u64(5));
        let b: Vec<Point<f64>> = generate_default(&mut StdRng::seed_from_u64(5));
        let c: Vec<Point<f64>> = generate_default(&mut StdRng::seed_from_u64(6));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
