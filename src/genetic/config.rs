//! Evolution configuration.
//!
//! [`EvolveConfig`] holds all parameters that control the generational loop.

use crate::error::{EvolveError, Result};

/// What happens to the pool after each generation is evaluated.
///
/// Crossover appends children without removing parents, so without trimming
/// the pool grows every generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrimPolicy {
    /// Keep every member; the pool never shrinks.
    #[default]
    None,
    /// Keep the `n` highest-scoring members; unscored members are dropped first.
    KeepBest(usize),
    /// Keep `n` members drawn uniformly without replacement.
    KeepRandom(usize),
}

/// How scores turn into reproduction weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitnessShaping {
    /// Every scored member gets weight 1, regardless of score.
    #[default]
    Uniform,
    /// Weight is `score - min_score + 1` over the scored members.
    ScoreProportional,
}

/// Configuration for the track evolution.
///
/// # Defaults
///
/// ```
/// use coaster_evolve::genetic::EvolveConfig;
///
/// let config = EvolveConfig::default();
/// assert_eq!(config.pool_size, 500);
/// assert_eq!(config.iterations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use coaster_evolve::genetic::{EvolveConfig, TrimPolicy};
///
/// let config = EvolveConfig::default()
///     .with_pool_size(50)
///     .with_iterations(20)
///     .with_trim_policy(TrimPolicy::KeepBest(50))
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolveConfig {
    /// Members in the initial pool.
    pub pool_size: usize,

    /// Number of generations to run.
    pub iterations: usize,

    /// Probability that a selected parent pair attempts crossover (0.0–1.0).
    pub crossover_probability: f64,

    /// Per-seam probability of an insertion mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Emit a generation report every this many generations.
    pub report_every: usize,

    /// Pieces in the boarding station scaffold.
    pub station_length: usize,

    /// Total pieces, station included, of a freshly built track.
    pub initial_track_length: usize,

    /// Pool trimming after each generation.
    pub trim_policy: TrimPolicy,

    /// Score to reproduction-weight mapping.
    pub fitness_shaping: FitnessShaping,

    /// From-scratch attempts the builder makes before giving up on a track.
    pub build_attempts: usize,

    /// Single-piece backtracks the builder allows within one attempt.
    pub backtrack_limit: usize,

    /// Whether to score members in parallel (requires the `parallel` feature).
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at the start of each generation, so a run may overshoot by
    /// up to one generation.
    pub time_limit_ms: Option<u64>,
}

impl Default for EvolveConfig {
    fn default() -> Self {
        Self {
            pool_size: 500,
            iterations: 500,
            crossover_probability: 0.6,
            mutation_rate: 0.05,
            report_every: 1,
            station_length: 10,
            initial_track_length: 50,
            trim_policy: TrimPolicy::None,
            fitness_shaping: FitnessShaping::Uniform,
            build_attempts: 100,
            backtrack_limit: 32,
            parallel: false,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl EvolveConfig {
    /// Sets the initial pool size.
    pub fn with_pool_size(mut self, n: usize) -> Self {
        self.pool_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the reporting cadence.
    pub fn with_report_every(mut self, n: usize) -> Self {
        self.report_every = n;
        self
    }

    /// Sets the station length.
    pub fn with_station_length(mut self, n: usize) -> Self {
        self.station_length = n;
        self
    }

    /// Sets the total length of freshly built tracks.
    pub fn with_initial_track_length(mut self, n: usize) -> Self {
        self.initial_track_length = n;
        self
    }

    /// Sets the trim policy.
    pub fn with_trim_policy(mut self, policy: TrimPolicy) -> Self {
        self.trim_policy = policy;
        self
    }

    /// Sets the fitness shaping.
    pub fn with_fitness_shaping(mut self, shaping: FitnessShaping) -> Self {
        self.fitness_shaping = shaping;
        self
    }

    /// Sets the builder's attempt and backtrack budgets.
    pub fn with_build_limits(mut self, attempts: usize, backtracks: usize) -> Self {
        self.build_attempts = attempts;
        self.backtrack_limit = backtracks;
        self
    }

    /// Enables or disables parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`EvolveError::InvalidConfig`] describing the first bad parameter.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(EvolveError::InvalidConfig(msg.into()));

        if self.pool_size == 0 {
            return invalid("pool_size must be at least 1");
        }
        if self.iterations == 0 {
            return invalid("iterations must be at least 1");
        }
        if self.report_every == 0 {
            return invalid("report_every must be at least 1");
        }
        if self.station_length == 0 {
            return invalid("station_length must be at least 1");
        }
        if self.initial_track_length < self.station_length {
            return invalid("initial_track_length must not be shorter than the station");
        }
        if self.build_attempts == 0 {
            return invalid("build_attempts must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.crossover_probability) {
            return invalid("crossover_probability must be within 0.0..=1.0");
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return invalid("mutation_rate must be within 0.0..=1.0");
        }
        match self.trim_policy {
            TrimPolicy::KeepBest(0) | TrimPolicy::KeepRandom(0) => {
                return invalid("trim policy must keep at least 1 member");
            }
            _ => {}
        }
        if self.time_limit_ms == Some(0) {
            return invalid("time_limit_ms must be positive or None");
        }
        Ok(())
    }
}
