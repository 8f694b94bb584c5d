use crate::{DistanceFunction, Point, Primitive};

/// Index of the centroid closest to `point`, scanning left to right.
/// A later centroid has to be strictly closer to win, so ties go to the lower index.
pub(crate) fn nearest_centroid<T, D>(point: &Point<T>, centroids: &[Point<T>], distance: &D) -> (usize, T)
        where T: Primitive, D: DistanceFunction<T> {
    let mut best_idx = 0;
    let mut best_dist = T::infinity();
    for (idx, c) in centroids.iter().enumerate() {
        let d = distance.distance(c, point);
        if idx == 0 || d < best_dist {
            best_idx = idx;
            best_dist = d;
        }
    }
    (best_idx, best_dist)
}

/// Minimum distance from `point` to any of `centroids` (infinity, if there are none).
pub(crate) fn min_distance<T, D>(point: &Point<T>, centroids: &[Point<T>], distance: &D) -> T
        where T: Primitive, D: DistanceFunction<T> {
    centroids.iter()
        .map(|c| distance.distance(c, point))
        .fold(T::infinity(), |acc, d| if d < acc { d } else { acc })
}

#[cfg(test)]
macro_rules! assert_approx_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		match ($left, $right, $tol) {
			(left_val , right_val, tol_val) => {
				let delta = (left_val - right_val).abs();
				if !(delta < tol_val) {
					panic!(
						"assertion failed: `(left ≈ right)` \
						(left: `{}`, right: `{}`) \
						with ∆={:1.1e} (allowed ∆={:e})",
						left_val , right_val, delta, tol_val
					)
				}
			}
		}
	});
	($left: expr, $right: expr) => (assert_approx_eq!(($left), ($right), 1e-12))
}

#[cfg(test)]
macro_rules! assert_point_eq {
	($left: expr, $right: expr, $tol: expr) => ({
		let (l, r) = ($left, $right);
		assert_approx_eq!(l.x, r.x, $tol);
		assert_approx_eq!(l.y, r.y, $tol);
	});
	($left: expr, $right: expr) => (assert_point_eq!(($left), ($right), 1e-12))
}

#[cfg(test)]
pub(crate) mod testing {
	use crate::{KMeansConfig, Point, Primitive};
	use rand::prelude::*;

	/// Two well separated pairs of points, handy for hand-checked scenarios.
	pub fn two_pairs<T: Primitive>() -> Vec<Point<T>> {
		[(0.0, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0)].iter()
			.map(|&(x, y)| Point::new(T::from(x).unwrap(), T::from(y).unwrap()))
			.collect()
	}

	/// Three gaussian-ish blobs, deterministic for a given seed.
	pub fn blobs<T: Primitive>(seed: u64, per_blob: usize) -> Vec<Point<T>> {
		let mut rnd = StdRng::seed_from_u64(seed);
		let centers = [(-6.0, -6.0), (0.0, 5.0), (7.0, -2.0)];
		let mut res = Vec::with_capacity(per_blob * centers.len());
		for &(cx, cy) in centers.iter() {
			for _ in 0..per_blob {
				let (dx, dy): (f64, f64) = (rnd.gen_range(-1.5..1.5), rnd.gen_range(-1.5..1.5));
				res.push(Point::new(T::from(cx + dx).unwrap(), T::from(cy + dy).unwrap()));
			}
		}
		res
	}

	pub fn seeded_config<'a, T: Primitive>(seed: u64) -> KMeansConfig<'a, T> {
		KMeansConfig::build().random_generator(StdRng::seed_from_u64(seed)).build()
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use crate::{points, EuclideanDistance};

	#[test]
	fn nearest_prefers_first_on_ties() {
		let centroids = points(&[(-1.0f64, 0.0), (1.0, 0.0), (-1.0, 0.0)]);
		let (idx, dist) = nearest_centroid(&Point::new(0.0, 0.0), &centroids, &EuclideanDistance);
		assert_eq!(idx, 0);
		assert_approx_eq!(dist, 1.0);
	}

	#[test]
	fn nearest_picks_strictly_closer() {
		let centroids = points(&[(5.0f64, 5.0), (1.0, 1.0), (0.5, 0.5)]);
		let (idx, _) = nearest_centroid(&Point::new(0.0, 0.0), &centroids, &EuclideanDistance);
		assert_eq!(idx, 2);
	}

	#[test]
	fn nearest_ignores_nan_centroids() {
		let centroids = points(&[(1.0f64, 0.0), (f64::NAN, f64::NAN)]);
		let (idx, _) = nearest_centroid(&Point::new(0.0, 0.0), &centroids, &EuclideanDistance);
		assert_eq!(idx, 0);
	}

	#[test]
	fn min_distance_over_centroids() {
		let centroids = points(&[(3.0f64, 4.0), (0.0, 2.0)]);
		assert_approx_eq!(min_distance(&Point::new(0.0, 0.0), &centroids, &EuclideanDistance), 2.0);
		assert_eq!(min_distance(&Point::new(0.0f64, 0.0), &[], &EuclideanDistance), f64::INFINITY);
	}
}
