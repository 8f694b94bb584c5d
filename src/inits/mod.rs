pub mod farthestfirst;
pub mod kmeanplusplus;
pub mod manual;
pub mod randomsample;

use crate::{DistanceFunction, Point, Primitive};
use rand::RngCore;

/// Centroid initialization strategy.
///
/// The outcome of each k-means run depends on the initial centroids. All strategies but
/// [`Initialization::Manual`] draw from the dataset using the configured random generator.
#[derive(Clone, Debug, PartialEq)]
pub enum Initialization<T: Primitive> {
    /// Random-Sample (a.k.a. Forgy, with replacement): k independent uniform draws from the dataset.
    RandomSample,
    /// Farthest-first traversal: deterministic after the first (random) centroid.
    FarthestFirst,
    /// K-Means++ with plain distances as sampling weights.
    KMeansPlusPlus,
    /// Caller supplied centroids, used verbatim.
    Manual(Vec<Point<T>>),
}
impl<T: Primitive> Initialization<T> {
    /// Produce the initial centroids for `points`.
    pub fn initialize<D: DistanceFunction<T>>(&self, points: &[Point<T>], k: usize, distance: &D, rnd: &mut dyn RngCore) -> Vec<Point<T>> {
        match self {
            Initialization::RandomSample => randomsample::calculate(points, k, rnd),
            Initialization::FarthestFirst => farthestfirst::calculate(points, k, distance, rnd),
            Initialization::KMeansPlusPlus => kmeanplusplus::calculate(points, k, distance, rnd),
            Initialization::Manual(seeds) => manual::calculate(seeds, k),
        }
    }

    /// Short name, as shown in strategy pickers and log output.
    pub fn name(&self) -> &'static str {
        match self {
            Initialization::RandomSample => "random",
            Initialization::FarthestFirst => "farthest",
            Initialization::KMeansPlusPlus => "kmeans++",
            Initialization::Manual(_) => "manual",
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, Initialization::Manual(_))
    }
}
impl<T: Primitive> std::str::FromStr for Initialization<T> {
    type Err = String;

    /// Parses the strategy names used by front ends. `manual` parses to an empty seed list.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "random" => Ok(Initialization::RandomSample),
            "farthest" => Ok(Initialization::FarthestFirst),
            "kmeans++" => Ok(Initialization::KMeansPlusPlus),
            "manual" => Ok(Initialization::Manual(Vec::new())),
            other => Err(format!("unknown initialization method: {}", other)),
        }
    }
}
