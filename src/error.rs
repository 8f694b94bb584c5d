use thiserror::Error;

/// Errors returned by the clustering engine and the interactive session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Requested cluster count is below 1.
    #[error("invalid cluster count: k must be at least 1, got {k}")]
    InvalidClusterCount {
        /// Requested number of clusters.
        k: usize,
    },

    /// Dataset contains no points.
    #[error("empty dataset")]
    EmptyDataset,

    /// Manual initialization was requested with an empty seed list.
    #[error("manual initialization requires at least one seed")]
    NoSeeds,

    /// A step was requested while manual seeds are still being collected.
    #[error("manual seeds incomplete: {have} of {need} selected")]
    SeedsIncomplete {
        /// Seeds collected so far.
        have: usize,
        /// Seeds required before the run can start.
        need: usize,
    },

    /// A seed was added while the session is not collecting seeds.
    #[error("session is not collecting manual seeds")]
    NotCollecting,

    /// The run ticket belongs to a session generation that was reset or regenerated since.
    #[error("stale run: ticket generation {ticket} does not match session generation {current}")]
    StaleRun {
        /// Generation the ticket was issued for.
        ticket: u64,
        /// Current generation of the session.
        current: u64,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
