use crate::{Point, Primitive};
use std::cmp::Ordering;

/// Enum with possible policies for clusters that lost all of their samples during an iteration.
/// The mean of an empty cluster is undefined, each policy decides what the centroid becomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
	/// The starved centroid keeps its previous position.
	#[default]
	Freeze,
	/// Divide by zero, like a naive mean would. The centroid becomes `(NaN, NaN)`.
	/// ## Note
	/// NaN distances never exceed the convergence threshold, so a NaN centroid is never counted as moved
	/// and no sample is ever assigned to it again.
	Propagate,
	/// Move the starved centroid onto the sample farthest away from its own centroid, taken from a
	/// cluster that keeps at least one other sample. That sample is removed from its previous cluster's mean.
	/// Falls back to [`EmptyClusterPolicy::Freeze`] when no cluster can spare a sample.
	StealFarthest
}

/// Running per-cluster coordinate sums, from which the new centroids are derived.
pub(crate) struct ClusterSums<T: Primitive> {
	pub sums: Vec<(T, T)>,
	pub frequency: Vec<usize>
}
impl<T: Primitive> ClusterSums<T> {
	pub fn new(points: &[Point<T>], assignments: &[usize], k: usize) -> Self {
		let mut sums = vec![(T::zero(), T::zero()); k];
		let mut frequency = vec![0usize; k];
		points.iter().zip(assignments.iter().cloned())
			.for_each(|(p, c)| {
				sums[c].0 += p.x;
				sums[c].1 += p.y;
				frequency[c] += 1;
			});
		Self { sums, frequency }
	}

	fn mean(&self, c: usize) -> Point<T> {
		// 0/0 yields NaN for empty clusters
		let cnt = T::from(self.frequency[c]).unwrap_or_else(T::zero);
		Point::new(self.sums[c].0 / cnt, self.sums[c].1 / cnt)
	}
}

impl EmptyClusterPolicy {
	/// Calculate the new centroids from the cluster sums, resolving starved clusters according to this policy.
	/// ## Arguments
	/// - **sums**: Coordinate sums and frequencies of the current assignment
	/// - **points**: The dataset
	/// - **assignments**: Current assignment of every sample
	/// - **centroid_distances**: Every sample's distance to its assigned centroid
	/// - **old_centroids**: Centroids the current assignment was computed against
	pub(crate) fn resolve<T: Primitive>(&self, mut sums: ClusterSums<T>, points: &[Point<T>], assignments: &[usize],
				centroid_distances: &[T], old_centroids: &[Point<T>]) -> Vec<Point<T>> {
		let starved: Vec<usize> = (0..old_centroids.len()).filter(|&c| sums.frequency[c] == 0).collect();
		if !starved.is_empty() {
			log::warn!("clusters {:?} have no samples assigned, applying {:?}", starved, self);
		}
		let mut frozen = vec![false; old_centroids.len()];
		match self {
			EmptyClusterPolicy::Propagate => {},
			EmptyClusterPolicy::Freeze => starved.iter().for_each(|&c| frozen[c] = true),
			EmptyClusterPolicy::StealFarthest if !starved.is_empty() => {
				let mut assignments = assignments.to_vec();
				let mut distance_sorted_samples: Vec<usize> = (0..points.len()).collect();
				distance_sorted_samples.sort_by(
					|&i1, &i2| centroid_distances[i1].partial_cmp(&centroid_distances[i2]).unwrap_or(Ordering::Equal));

				for &c in starved.iter() {
					// Find the sample with the highest distance to its centroid, that is not alone in its cluster
					let candidate = distance_sorted_samples.iter().rev().cloned()
						.find(|&s| sums.frequency[assignments[s]] > 1);
					match candidate {
						Some(sample_id) => {
							let prev = assignments[sample_id];
							let p = points[sample_id];
							sums.frequency[prev] -= 1;
							sums.sums[prev].0 -= p.x;
							sums.sums[prev].1 -= p.y;
							// Chosen sample is the single member of the starved cluster
							sums.frequency[c] = 1;
							sums.sums[c] = (p.x, p.y);
							assignments[sample_id] = c;
						},
						None => frozen[c] = true
					}
				}
			},
			EmptyClusterPolicy::StealFarthest => {}
		}
		(0..old_centroids.len())
			.map(|c| if frozen[c] { old_centroids[c] } else { sums.mean(c) })
			.collect()
	}
}
