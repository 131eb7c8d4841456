//! Genetic search over track layouts.
//!
//! Every operator here respects the adjacency rule from
//! [`crate::tracks::compatible`]: tracks enter the pool well formed and
//! crossover or mutation never produce a broken seam.
//!
//! # Key Types
//!
//! - [`EvolveConfig`]: Pool size, generations, rates, trimming, seeding
//! - [`TrackBuilder`]: Random well-formed tracks with bounded backtracking
//! - [`Pool`]: The population, with evaluation, selection and trimming
//! - [`TrackScorer`]: The external rating contract
//! - [`EvolveRunner`]: Executes the generational loop
//! - [`EvolveResult`]: Best layouts found plus per-generation history
//!
//! # Submodules
//!
//! - [`crossover`]: Constraint-aware one-point crossover
//! - [`mutation`]: Compatibility-checked insertion mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod builder;
mod config;
pub mod crossover;
pub mod mutation;
mod pool;
mod runner;
mod selection;
mod types;

pub use builder::TrackBuilder;
pub use config::{EvolveConfig, FitnessShaping, TrimPolicy};
pub use pool::{EvaluationSummary, Pool};
pub use runner::{EvolveResult, EvolveRunner};
pub use selection::roulette;
pub use types::{GenerationStats, Member, ScoreError, TrackScorer};
