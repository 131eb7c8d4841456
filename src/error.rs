//! Error types shared across the crate.

use crate::tracks::SegmentKind;

/// Errors raised by the catalog, track construction and the evolutionary loop.
///
/// Incompatible candidates found *during* search (a failed probe, a bad
/// splice seam, a dead end while building) are recovered locally and never
/// surface here. These variants are reserved for violated preconditions and
/// exhausted retries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvolveError {
    /// Selection was attempted on a pool without members.
    #[error("cannot select from an empty pool")]
    EmptyPool,

    /// Selection was attempted but no member carries positive fitness.
    #[error("pool has no reproductive weight (total fitness {total})")]
    NoFitness {
        /// Sum of all member fitness values.
        total: f64,
    },

    /// The track builder kept running into dead ends.
    #[error("track builder exhausted after {attempts} attempts")]
    BuildExhausted {
        /// Number of from-scratch attempts made.
        attempts: usize,
    },

    /// Two adjacent elements do not connect.
    #[error("element {index} does not connect to its successor")]
    IncompatibleSeam {
        /// Index of the first element of the offending pair.
        index: usize,
    },

    /// A catalog was built with the same key twice.
    #[error("segment {0:?} defined more than once")]
    DuplicateSegment(SegmentKind),

    /// A lookup used a key the catalog does not contain.
    #[error("segment {0:?} is not in the catalog")]
    UnknownSegment(SegmentKind),

    /// A chain lift was requested on a piece that cannot carry one.
    #[error("segment {0:?} cannot carry a chain lift")]
    IneligibleChainLift(SegmentKind),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, EvolveError>;
