use crate::empty_cluster::ClusterSums;
use crate::{ClusterEngine, DistanceFunction, Point, Primitive};

pub(crate) struct Lloyd<T: Primitive> {
	_p: std::marker::PhantomData<T>
}
impl<T: Primitive> Lloyd<T> {
    /// Calculate the mean of every cluster under the current assignment.
    fn update_centroids<D: DistanceFunction<T>>(engine: &ClusterEngine<'_, T, D>) -> Vec<Point<T>> {
        let state = &engine.state;
        let sums = ClusterSums::new(&engine.points, &state.assignments, state.k);
        engine.empty_cluster_policy.resolve(sums, &engine.points, &state.assignments,
            &state.centroid_distances, &state.centroids)
    }

    /// One Lloyd iteration on the engine's state.
    pub fn step<D: DistanceFunction<T>>(engine: &mut ClusterEngine<'_, T, D>) {
        let new_centroids = Self::update_centroids(engine);

        // Judged against the centroids before the update
        let threshold = engine.convergence_threshold;
        let changed = new_centroids.iter().zip(engine.state.centroids.iter())
            .any(|(new, old)| engine.distance.distance(new, old) > threshold);

        engine.state.centroids = new_centroids;
        let new_distsum = engine.update_cluster_assignments();
        engine.state.converged = !changed;
        engine.state.iteration += 1;

		// Notify subscriber about finished iteration
        (engine.iteration_done)(&engine.state, engine.state.iteration, new_distsum);
        engine.state.distsum = new_distsum;

        log::trace!("iteration {}: distsum {:e}, centroids {:?}", engine.state.iteration, new_distsum, engine.state.centroids);
        if engine.state.converged {
            log::info!("converged after {} iterations", engine.state.iteration);
        }
    }
}
