//! # stepmeans - API documentation
//!
//! Stepmeans is a small rust library for interactive k-means clustering of 2D points.
//!
//! ## Design target
//! Its main target is observability of the algorithm rather than throughput: a clustering run can be
//! advanced one Lloyd iteration at a time, and after every step the current centroids and cluster
//! assignments can be read back (e.g. to re-render a chart). Everything is single-threaded and synchronous.
//!
//! ## Supported centroid initializations
//! The outcome of each K-Means run depends on the initialization of its clusters. There exist
//! multiple algorithms for this initialization, most of which are based on at least some
//! degree of randomness. For a list of implemented initialization methods, see [`Initialization`].
//!
//! ## Supported primitive types
//! - [`f32`]
//! - [`f64`]
//!
//! ## Example
//! Here is an example stepping through a k-means run, using farthest-first initialization:
//!
//! ```rust
//! use stepmeans::*;
//! use rand::prelude::*;
//!
//! let mut rnd = StdRng::seed_from_u64(1337);
//! let samples: Vec<Point<f64>> = dataset::generate_default(&mut rnd);
//!
//! let conf = KMeansConfig::build().random_generator(rnd).build();
//! let mut engine = ClusterEngine::new(samples, 3, &Initialization::FarthestFirst, &conf).unwrap();
//! while !engine.has_converged() {
//!     let state = engine.iterate();
//!     println!("Iteration {} - Error: {:.2}", state.iteration, state.distsum);
//! }
//! println!("Centroids: {:?}", engine.centroids());
//! println!("Cluster-Assignments: {:?}", engine.assignments());
//! ```
//!
//! ## Example (using the status event callbacks)
//! ```rust
//! use stepmeans::*;
//!
//! let samples = points(&[(0.0f64, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0)]);
//! let conf = KMeansConfig::<f64>::build()
//!     .init_done(&|s| println!("Initialization completed: {:?}", s.centroids))
//!     .iteration_done(&|s, nr, new_distsum|
//!         println!("Iteration {} - Error: {:.2} -> {:.2} | Improvement: {:.2}",
//!             nr, s.distsum, new_distsum, s.distsum - new_distsum))
//!     .build();
//!
//! let seeds = points(&[(0.0, 0.0), (10.0, 10.0)]);
//! let mut engine = ClusterEngine::new(samples, 2, &Initialization::Manual(seeds), &conf).unwrap();
//! engine.iterate();
//! engine.iterate();
//! assert!(engine.has_converged());
//! ```
//!
//! ## Short API-Overview / Description
//! The [`ClusterEngine`] owns a dataset and the state of one clustering run ([`EngineState`]). It is created
//! already initialized: the centroids were drawn according to the chosen [`Initialization`] and every sample
//! was assigned to its nearest centroid. [`ClusterEngine::iterate`] performs one Lloyd iteration, and
//! [`ClusterEngine::has_converged`] reports whether the last iteration left all centroids in place.
//!
//! Clusters that lose all of their samples are handled according to the configured [`EmptyClusterPolicy`].
//!
//! Front ends that want the full interactive workflow (collecting manual seeds one at a time, stepping or
//! running to convergence with a delay, resetting and regenerating the dataset) use a [`Session`].

#[macro_use] mod helpers;
mod point;
mod error;
mod api;
mod distances;
mod empty_cluster;
mod variants;
mod session;
pub mod inits;
pub mod dataset;

pub use api::{assign_clusters, ClusterEngine, EngineState, InitDoneCallbackFn, IterationDoneCallbackFn, KMeansConfig, KMeansConfigBuilder, Phase};
pub use distances::{DistanceFunction, EuclideanDistance};
pub use empty_cluster::EmptyClusterPolicy;
pub use error::{Error, Result};
pub use inits::Initialization;
pub use point::{points, Point, Primitive};
pub use session::{ConvergedCallbackFn, RunTicket, SeedProgress, Session, StepReport};
