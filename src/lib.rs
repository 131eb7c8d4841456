//! Evolutionary synthesis of roller-coaster track layouts.
//!
//! Tracks are sequences of catalog pieces. Two pieces may only be joined
//! when the exit angle and banking of the first match the entry of the
//! second, and the search keeps that rule intact from the first random
//! build to the last generation:
//!
//! - **Tracks**: The piece catalog, the compatibility rule, placed elements
//!   with optional chain lifts, and tracks with the closed-circuit check.
//! - **Genetic**: Random track building with backtracking, roulette
//!   selection, seam-checked crossover and insertion mutation, driven by a
//!   generational runner that reports progress and keeps the best layouts.
//!
//! Scoring is external: implement [`genetic::TrackScorer`] (or pass a
//! closure) to plug in a ride simulator or any other rating.
//!
//! # Example
//!
//! ```
//! use coaster_evolve::genetic::{EvolveConfig, EvolveRunner, ScoreError};
//! use coaster_evolve::tracks::{Catalog, Track};
//!
//! let catalog = Catalog::standard();
//! let config = EvolveConfig::default()
//!     .with_pool_size(20)
//!     .with_iterations(5)
//!     .with_station_length(4)
//!     .with_initial_track_length(16)
//!     .with_seed(1);
//!
//! let score = |track: &Track| -> Result<i64, ScoreError> {
//!     Ok(track.elevation_profile().into_iter().max().unwrap_or(0).into())
//! };
//!
//! let result = EvolveRunner::run(&catalog, &score, &config).unwrap();
//! assert_eq!(result.score_history.len(), 5);
//! ```

pub mod error;
pub mod genetic;
pub mod random;
pub mod tracks;

pub use error::{EvolveError, Result};
