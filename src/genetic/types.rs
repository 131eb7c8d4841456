//! Core types shared by the pool and the runner.
//!
//! [`Member`] is one candidate layout; [`TrackScorer`] is the contract
//! between the evolution engine and whatever rates a finished layout.

use crate::tracks::Track;

/// A scoring collaborator could not rate a track.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("scoring failed: {reason}")]
pub struct ScoreError {
    /// Human-readable cause.
    pub reason: String,
}

impl ScoreError {
    /// Creates a scoring error with the given cause.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Per-generation summary handed to [`TrackScorer::on_generation`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,
    /// Highest score this generation, `None` if nothing was scored.
    pub best_score: Option<i64>,
    /// Pool size after crossover and mutation.
    pub pool_size: usize,
    /// Members whose scoring failed this generation.
    pub unscored: usize,
    /// Members whose track is a closed circuit.
    pub circuits: usize,
}

/// Rates a track layout. Higher is better.
///
/// Implemented for any `Fn(&Track) -> Result<i64, ScoreError>`, so a
/// closure is enough for simple cases.
///
/// # Thread Safety
///
/// `Send + Sync` because members may be scored in parallel with the
/// `parallel` feature.
pub trait TrackScorer: Send + Sync {
    /// Scores one track.
    ///
    /// Must depend only on the track's pieces. An error marks the member
    /// unscored for this generation; the run continues.
    fn score(&self, track: &Track) -> Result<i64, ScoreError>;

    /// Called after each reported generation.
    ///
    /// Useful for logging, checkpointing, or external communication.
    /// The default implementation is a no-op.
    fn on_generation(&self, _stats: &GenerationStats) {}
}

impl<F> TrackScorer for F
where
    F: Fn(&Track) -> Result<i64, ScoreError> + Send + Sync,
{
    fn score(&self, track: &Track) -> Result<i64, ScoreError> {
        self(track)
    }
}

/// One candidate layout in the pool.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Member {
    /// The layout.
    pub track: Track,
    /// Latest score, `None` before evaluation or after a failed one.
    pub score: Option<i64>,
    /// Reproduction weight; zero excludes the member from selection.
    pub fitness: f64,
}

impl Member {
    /// An unevaluated member.
    pub fn new(track: Track) -> Self {
        Self {
            track,
            score: None,
            fitness: 0.0,
        }
    }

    /// Drops the score and weight, e.g. after the track changed.
    pub fn invalidate(&mut self) {
        self.score = None;
        self.fitness = 0.0;
    }
}
