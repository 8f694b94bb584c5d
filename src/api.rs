use crate::{helpers, DistanceFunction, EmptyClusterPolicy, Error, EuclideanDistance, Initialization, Point, Primitive, Result};
use std::cell::RefCell;
use std::ops::DerefMut;
use rand::prelude::*;

pub type InitDoneCallbackFn<'a, T> = &'a dyn Fn(&EngineState<T>);
pub type IterationDoneCallbackFn<'a, T> = &'a dyn Fn(&EngineState<T>, usize, T);

/// This is a structure holding various configuration options for a clustering run, such as
/// the random number generator to use, the convergence threshold, or a couple of callbacks, that can be set to get
/// status information from a running engine.
///
/// For a more detailed information about all possible options, have a look at [`KMeansConfigBuilder`].
pub struct KMeansConfig<'a, T: Primitive> {
    /// Callback that is called, when the initialization phase finished
    /// ## Arguments
    /// - **state**: Current [`EngineState`] after the initialization
    pub(crate) init_done: InitDoneCallbackFn<'a, T>,
    /// Callback that is called after each iteration
    /// ## Arguments
    /// - **state**: Current [`EngineState`] after the iteration
    /// - **iteration_id**: Number of the current iteration
    /// - **distsum**: New distance sum (**state** contains the distsum from the previous iteration)
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>,
    /// Random number generator to use
    pub(crate) rnd: Box<RefCell<dyn RngCore>>,
    /// A centroid moving farther than this counts as changed
    pub(crate) convergence_threshold: T,
    /// What happens to clusters without samples
    pub(crate) empty_cluster_policy: EmptyClusterPolicy,
    /// Upper bound for [`crate::Session::run_to_convergence`]
    pub(crate) max_steps: Option<usize>
}
impl<'a, T: Primitive> Default for KMeansConfig<'a, T> {
    fn default() -> Self {
        Self {
            init_done: &|_| {},
            iteration_done: &|_,_,_| {},
            rnd: Box::new(RefCell::new(rand::thread_rng())),
            convergence_threshold: T::from(1e-4).unwrap_or_else(T::epsilon),
            empty_cluster_policy: EmptyClusterPolicy::default(),
            max_steps: None
        }
    }
}
impl<'a, T: Primitive> KMeansConfig<'a, T> {
    /// Use the [`KMeansConfigBuilder`] to build a [`KMeansConfig`] instance.
    pub fn build() -> KMeansConfigBuilder<'a, T> {
        KMeansConfigBuilder { config: KMeansConfig::default() }
    }
    pub fn convergence_threshold(&self) -> T { self.convergence_threshold }
    pub fn empty_cluster_policy(&self) -> EmptyClusterPolicy { self.empty_cluster_policy }
    pub fn max_steps(&self) -> Option<usize> { self.max_steps }
}
impl<'a, T: Primitive> std::fmt::Debug for KMeansConfig<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KMeansConfig")
            .field("convergence_threshold", &self.convergence_threshold)
            .field("empty_cluster_policy", &self.empty_cluster_policy)
            .field("max_steps", &self.max_steps)
            .finish()
    }
}

pub struct KMeansConfigBuilder<'a, T: Primitive> {
    config: KMeansConfig<'a, T>
}
impl<'a, T: Primitive> KMeansConfigBuilder<'a, T> {
    /// Set the callback that should be called after the centroid initialization, before the first iteration.
    pub fn init_done(mut self, init_done: InitDoneCallbackFn<'a, T>) -> Self {
        self.config.init_done = init_done; self
    }
    /// Set the callback that should be called after each iteration.
    pub fn iteration_done(mut self, iteration_done: IterationDoneCallbackFn<'a, T>) -> Self {
        self.config.iteration_done = iteration_done; self
    }
    /// Set the random number generator that should be used for the centroid initialization.
    /// Use a seeded generator for deterministically repeatable results.
    pub fn random_generator<R: RngCore + 'static>(mut self, rnd: R) -> Self {
        self.config.rnd = Box::new(RefCell::new(rnd)); self
    }
    /// Set the distance a centroid has to move within one iteration to count as changed.
    /// ## Default
    /// `1e-4`
    pub fn convergence_threshold(mut self, threshold: T) -> Self {
        self.config.convergence_threshold = threshold; self
    }
    /// Set the policy for clusters that lost all of their samples. For more information,
    /// see documentation of [`EmptyClusterPolicy`].
    /// ## Default
    /// [`EmptyClusterPolicy::Freeze`]
    pub fn empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.config.empty_cluster_policy = policy; self
    }
    /// Limit the amount of steps [`crate::Session::run_to_convergence`] takes before giving up.
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.config.max_steps = Some(max_steps); self
    }
    /// Return the internally built configuration structure.
    pub fn build(self) -> KMeansConfig<'a, T> { self.config }
}


/// Explicit lifecycle of a [`ClusterEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Centroids were initialized and assigned, no iteration ran yet
    Initialized,
    /// At least one iteration ran, and the last one still moved a centroid
    Iterating,
    /// The last iteration did not move any centroid beyond the threshold
    Converged
}


/// The state of a running clustering, as returned by the API.
/// All mutations are done in this structure. It is replaced wholesale on each iteration, so centroids and
/// assignments are always consistent with each other.
///
/// ## Generics
/// - **T**: Underlying primitive type that was used for the calculation
///
/// ## Fields
/// - **k**: The amount of clusters (the amount of seeds, for manual initialization)
/// - **distsum**: The total sum of squared distances from all samples to their respective centroids
/// - **centroids**: Current cluster centers, the index is the cluster id
/// - **centroid_frequency**: Amount of samples in each cluster
/// - **assignments**: Vector mapping each sample to its nearest cluster
/// - **centroid_distances**: Vector containing each sample's distance to its centroid
/// - **converged**: Whether the most recent iteration left all centroids in place
/// - **iteration**: Amount of iterations run so far
#[derive(Clone, Debug, PartialEq)]
pub struct EngineState<T: Primitive> {
    pub k: usize,
    pub distsum: T,
    pub centroids: Vec<Point<T>>,
    pub centroid_frequency: Vec<usize>,
    pub assignments: Vec<usize>,
    pub centroid_distances: Vec<T>,
    pub converged: bool,
    pub iteration: usize
}
impl<T: Primitive> EngineState<T> {
    pub(crate) fn new(sample_cnt: usize, centroids: Vec<Point<T>>) -> Self {
        let k = centroids.len();
        Self {
            k,
            distsum: T::infinity(),
            centroids,
            centroid_frequency: vec![0usize;k],
            assignments: vec![0usize;sample_cnt],
            centroid_distances: vec![T::infinity();sample_cnt],
            converged: false,
            iteration: 0
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.iteration, self.converged) {
            (0, _) => Phase::Initialized,
            (_, false) => Phase::Iterating,
            (_, true) => Phase::Converged
        }
    }
}


/// Assign every point to its nearest centroid.
///
/// Centroids are scanned left to right, a later centroid has to be strictly closer to win. Ties therefore
/// go to the lower cluster index.
pub fn assign_clusters<T, D>(points: &[Point<T>], centroids: &[Point<T>], distance: &D) -> Vec<usize>
        where T: Primitive, D: DistanceFunction<T> {
    points.iter().map(|p| helpers::nearest_centroid(p, centroids, distance).0).collect()
}


/// Entrypoint of this crate's engine API.
///
/// A [`ClusterEngine`] owns a fixed dataset, the current centroids and the cluster assignment of every sample.
/// It is created initialized (centroids drawn, samples assigned) and then advanced one Lloyd iteration
/// at a time with [`ClusterEngine::iterate`].
///
/// ## Supported initialization methods
/// - Random-Sample [`Initialization::RandomSample`]
/// - Farthest-First [`Initialization::FarthestFirst`]
/// - K-Mean++ [`Initialization::KMeansPlusPlus`]
/// - Manual [`Initialization::Manual`]
///
/// ## Example
/// ```rust
/// use stepmeans::*;
/// use rand::prelude::*;
///
/// let samples = points(&[(0.0f64, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0)]);
/// let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(42)).build();
/// let mut engine = ClusterEngine::new(samples, 2, &Initialization::FarthestFirst, &conf).unwrap();
/// while !engine.has_converged() {
///     engine.iterate();
/// }
/// println!("Centroids: {:?}", engine.centroids());
/// println!("Cluster-Assignments: {:?}", engine.assignments());
/// ```
pub struct ClusterEngine<'a, T: Primitive, D: DistanceFunction<T> = EuclideanDistance> {
    pub(crate) points: Vec<Point<T>>,
    pub(crate) distance: D,
    pub(crate) state: EngineState<T>,
    pub(crate) convergence_threshold: T,
    pub(crate) empty_cluster_policy: EmptyClusterPolicy,
    pub(crate) iteration_done: IterationDoneCallbackFn<'a, T>
}
impl<'a, T: Primitive> ClusterEngine<'a, T, EuclideanDistance> {
    /// Create a new engine using the euclidean distance.
    ///
    /// ## Arguments
    /// - **points**: The dataset, owned by the engine for the whole run
    /// - **k**: Amount of clusters to search for (ignored by [`Initialization::Manual`], which uses the seed count)
    /// - **init**: Initialization-Method to use for the initial centroids
    /// - **config**: [`KMeansConfig`] instance; its random generator is only used during this call
    pub fn new(points: Vec<Point<T>>, k: usize, init: &Initialization<T>, config: &KMeansConfig<'a, T>) -> Result<Self> {
        Self::with_distance(points, k, init, EuclideanDistance, config)
    }
}
impl<'a, T: Primitive, D: DistanceFunction<T>> ClusterEngine<'a, T, D> {
    /// Same as [`ClusterEngine::new`], using a custom distance function.
    pub fn with_distance(points: Vec<Point<T>>, k: usize, init: &Initialization<T>, distance: D, config: &KMeansConfig<'a, T>) -> Result<Self> {
        if k < 1 {
            return Err(Error::InvalidClusterCount { k });
        }
        if points.is_empty() {
            return Err(Error::EmptyDataset);
        }
        if let Initialization::Manual(seeds) = init {
            if seeds.is_empty() {
                return Err(Error::NoSeeds);
            }
        }

        let centroids = init.initialize(&points, k, &distance, config.rnd.borrow_mut().deref_mut());
        log::debug!("initialized {} centroids using {}: {:?}", centroids.len(), init.name(), centroids);

        let mut engine = Self {
            state: EngineState::new(points.len(), centroids),
            points,
            distance,
            convergence_threshold: config.convergence_threshold,
            empty_cluster_policy: config.empty_cluster_policy,
            iteration_done: config.iteration_done
        };
        engine.state.distsum = engine.update_cluster_assignments();
        (config.init_done)(&engine.state);
        Ok(engine)
    }

    /// Recompute the assignment of every sample against the current centroids, together with
    /// per-sample distances and cluster frequencies.
    /// ## Returns
    /// The new distance sum, which is not yet stored into the state.
    pub(crate) fn update_cluster_assignments(&mut self) -> T {
        let state = &mut self.state;
        let (centroids, distance) = (&state.centroids, &self.distance);
        self.points.iter()
            .zip(state.assignments.iter_mut())
            .zip(state.centroid_distances.iter_mut())
            .for_each(|((p, assignment), centroid_dist)| {
                let (best_idx, best_dist) = helpers::nearest_centroid(p, centroids, distance);
                *assignment = best_idx;
                *centroid_dist = best_dist;
            });
        Self::update_cluster_frequencies(&state.assignments, &mut state.centroid_frequency);
        state.centroid_distances.iter().map(|&d| d * d).sum()
    }

    pub(crate) fn update_cluster_frequencies(assignments: &[usize], centroid_frequency: &mut[usize]) -> usize {
        centroid_frequency.iter_mut().for_each(|v| *v = 0);
        let mut used_centroids_cnt = 0;
        assignments.iter().cloned()
            .for_each(|centroid_id| {
                if centroid_frequency[centroid_id] == 0 {
                    used_centroids_cnt += 1; // Count the amount of centroids with more than 0 samples
                }
                centroid_frequency[centroid_id] += 1;
            });
        used_centroids_cnt
    }

    /// Perform exactly one Lloyd iteration: move every centroid to the mean of its samples, then reassign
    /// all samples against the moved centroids.
    ///
    /// Calling this after convergence is allowed; nothing moves and the engine stays converged.
    /// ## Returns
    /// The state after the iteration.
    pub fn iterate(&mut self) -> &EngineState<T> {
        crate::variants::Lloyd::step(self);
        &self.state
    }

    /// Whether the most recent [`ClusterEngine::iterate`] left all centroids in place.
    /// `false` before the first iteration.
    pub fn has_converged(&self) -> bool { self.state.converged }

    pub fn phase(&self) -> Phase { self.state.phase() }

    pub fn state(&self) -> &EngineState<T> { &self.state }

    pub fn into_state(self) -> EngineState<T> { self.state }

    pub fn centroids(&self) -> &[Point<T>] { &self.state.centroids }

    pub fn assignments(&self) -> &[usize] { &self.state.assignments }

    pub fn points(&self) -> &[Point<T>] { &self.points }

    pub fn k(&self) -> usize { self.state.k }

    /// Total sum of squared distances from all samples to their assigned centroids.
    pub fn distsum(&self) -> T { self.state.distsum }
}
impl<'a, T: Primitive, D: DistanceFunction<T>> std::fmt::Debug for ClusterEngine<'a, T, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterEngine")
            .field("sample_cnt", &self.points.len())
            .field("state", &self.state)
            .finish()
    }
}
