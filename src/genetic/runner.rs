//! Generational loop execution.
//!
//! [`EvolveRunner`] drives the whole search:
//! build → evaluate → (crossover → mutate → evaluate → report → trim) × N.

use super::config::EvolveConfig;
use super::pool::Pool;
use super::types::{GenerationStats, Member, TrackScorer};
use crate::error::Result;
use crate::random::create_rng;
use crate::tracks::{Catalog, Track};
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of an evolution run.
#[derive(Debug, Clone)]
pub struct EvolveResult {
    /// Highest-scoring member seen in any generation (first one wins ties).
    pub best: Option<Member>,

    /// Highest-scoring closed circuit seen in any generation.
    pub best_circuit: Option<Member>,

    /// Generations completed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Whether the run hit its wall-clock limit.
    pub timed_out: bool,

    /// Best score of each completed generation, `None` if nothing scored.
    pub score_history: Vec<Option<i64>>,

    /// The pool as it stood when the run ended.
    pub pool: Pool,
}

/// Executes the track evolution.
///
/// # Usage
///
/// ```
/// use coaster_evolve::genetic::{EvolveConfig, EvolveRunner, ScoreError};
/// use coaster_evolve::tracks::{Catalog, Track};
///
/// let catalog = Catalog::standard();
/// let config = EvolveConfig::default()
///     .with_pool_size(10)
///     .with_iterations(3)
///     .with_seed(42);
/// let scorer = |track: &Track| -> Result<i64, ScoreError> { Ok(track.len() as i64) };
///
/// let result = EvolveRunner::run(&catalog, &scorer, &config).unwrap();
/// assert_eq!(result.generations, 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EvolveRunner;

impl EvolveRunner {
    /// Runs the evolution from a freshly built pool.
    ///
    /// # Errors
    /// Invalid configuration, or no initial track could be built.
    pub fn run<S: TrackScorer>(
        catalog: &Catalog,
        scorer: &S,
        config: &EvolveConfig,
    ) -> Result<EvolveResult> {
        Self::run_with_cancel(catalog, scorer, config, None)
    }

    /// Runs the evolution with an optional cancellation token.
    ///
    /// If `cancel` is set to `true`, the run stops before the next
    /// generation and returns what it has.
    pub fn run_with_cancel<S: TrackScorer>(
        catalog: &Catalog,
        scorer: &S,
        config: &EvolveConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<EvolveResult> {
        config.validate()?;
        let mut rng = create_rng(config.seed.unwrap_or_else(rand::random));
        let pool = Pool::build(catalog, config, &mut rng)?;
        Self::evolve(catalog, scorer, config, pool, &mut rng, cancel)
    }

    /// Runs the evolution starting from existing layouts.
    ///
    /// `config.pool_size` and the build settings are ignored; the pool
    /// starts with exactly `tracks`. `cancel` behaves as in
    /// [`EvolveRunner::run_with_cancel`].
    ///
    /// # Errors
    /// Invalid configuration, no seed tracks at all
    /// ([`EvolveError::EmptyPool`](crate::EvolveError::EmptyPool)), or a
    /// malformed seed track.
    pub fn run_seeded<S: TrackScorer>(
        catalog: &Catalog,
        scorer: &S,
        config: &EvolveConfig,
        tracks: Vec<Track>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<EvolveResult> {
        config.validate()?;
        let pool = Pool::from_tracks(tracks)?;
        let mut rng = create_rng(config.seed.unwrap_or_else(rand::random));
        Self::evolve(catalog, scorer, config, pool, &mut rng, cancel)
    }

    fn evolve<S: TrackScorer, R: rand::Rng>(
        catalog: &Catalog,
        scorer: &S,
        config: &EvolveConfig,
        mut pool: Pool,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<EvolveResult> {
        let started = Instant::now();
        let deadline = config.time_limit_ms.map(Duration::from_millis);

        pool.evaluate(scorer, config.fitness_shaping, config.parallel);
        let mut best = pool.best().cloned();
        let mut best_circuit = pool.best_circuit().cloned();

        let mut score_history = Vec::with_capacity(config.iterations);
        let mut cancelled = false;
        let mut timed_out = false;

        for generation in 0..config.iterations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = deadline {
                if started.elapsed() >= limit {
                    timed_out = true;
                    break;
                }
            }

            if let Err(e) = pool.crossover(config.crossover_probability, rng) {
                warn!("generation {generation}: crossover skipped: {e}");
            }
            pool.mutate(catalog, config.mutation_rate, rng);
            let summary = pool.evaluate(scorer, config.fitness_shaping, config.parallel);

            let gen_best = pool.best();
            if improves(gen_best, best.as_ref()) {
                best = gen_best.cloned();
            }
            let gen_circuit = pool.best_circuit();
            if improves(gen_circuit, best_circuit.as_ref()) {
                best_circuit = gen_circuit.cloned();
            }

            let stats = GenerationStats {
                generation,
                best_score: gen_best.and_then(|m| m.score),
                pool_size: pool.len(),
                unscored: summary.failed,
                circuits: pool.circuit_count(),
            };
            score_history.push(stats.best_score);

            if generation % config.report_every == 0 {
                info!(
                    "generation {}: best score {:?}, pool {}, unscored {}, circuits {}",
                    stats.generation,
                    stats.best_score,
                    stats.pool_size,
                    stats.unscored,
                    stats.circuits
                );
                scorer.on_generation(&stats);
            }

            pool.trim(config.trim_policy, rng);
        }

        Ok(EvolveResult {
            best,
            best_circuit,
            generations: score_history.len(),
            cancelled,
            timed_out,
            score_history,
            pool,
        })
    }
}

/// Strictly better score than the incumbent, so earlier finds win ties.
fn improves(candidate: Option<&Member>, incumbent: Option<&Member>) -> bool {
    match (candidate.and_then(|m| m.score), incumbent.and_then(|m| m.score)) {
        (Some(c), Some(i)) => c > i,
        (Some(_), None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvolveError;
    use crate::genetic::{ScoreError, TrimPolicy};
    use std::sync::Mutex;

    fn small_config() -> EvolveConfig {
        EvolveConfig::default()
            .with_pool_size(20)
            .with_iterations(8)
            .with_station_length(4)
            .with_initial_track_length(20)
            .with_seed(42)
    }

    /// Rewards height gained, with a bonus for closing the loop.
    struct HillScorer;

    impl TrackScorer for HillScorer {
        fn score(&self, track: &Track) -> std::result::Result<i64, ScoreError> {
            let peak = track.elevation_profile().into_iter().max().unwrap_or(0);
            let bonus = if track.is_circuit() { 100 } else { 0 };
            Ok(i64::from(peak) + bonus)
        }
    }

    /// Records every report it receives.
    #[derive(Default)]
    struct RecordingScorer {
        reports: Mutex<Vec<GenerationStats>>,
    }

    impl TrackScorer for RecordingScorer {
        fn score(&self, track: &Track) -> std::result::Result<i64, ScoreError> {
            Ok(track.len() as i64)
        }

        fn on_generation(&self, stats: &GenerationStats) {
            self.reports.lock().unwrap().push(stats.clone());
        }
    }

    #[test]
    fn test_run_completes() {
        let catalog = Catalog::standard();
        let result = EvolveRunner::run(&catalog, &HillScorer, &small_config()).unwrap();

        assert_eq!(result.generations, 8);
        assert_eq!(result.score_history.len(), 8);
        assert!(!result.cancelled);
        assert!(!result.timed_out);
        assert!(result.best.is_some());
        for m in result.pool.members() {
            assert!(m.track.is_well_formed());
        }
    }

    #[test]
    fn test_best_circuit_is_a_circuit() {
        let catalog = Catalog::standard();
        let config = small_config().with_pool_size(30);
        let result = EvolveRunner::run(&catalog, &HillScorer, &config).unwrap();

        let circuit = result.best_circuit.expect("expected some closed layout");
        assert!(circuit.track.is_circuit());
        assert!(circuit.score.unwrap() >= 100);
    }

    #[test]
    fn test_same_seed_same_run() {
        let catalog = Catalog::standard();
        let a = EvolveRunner::run(&catalog, &HillScorer, &small_config()).unwrap();
        let b = EvolveRunner::run(&catalog, &HillScorer, &small_config()).unwrap();

        assert_eq!(a.score_history, b.score_history);
        assert_eq!(a.pool, b.pool);
    }

    #[test]
    fn test_pool_never_shrinks_without_trim() {
        let catalog = Catalog::standard();
        let scorer = RecordingScorer::default();
        let result = EvolveRunner::run(&catalog, &scorer, &small_config()).unwrap();

        let reports = scorer.reports.lock().unwrap();
        assert_eq!(reports.len(), 8);
        assert!(reports[0].pool_size >= 20);
        for pair in reports.windows(2) {
            assert!(pair[1].pool_size >= pair[0].pool_size);
            assert_eq!(pair[1].generation, pair[0].generation + 1);
        }
        assert_eq!(result.pool.len(), reports[7].pool_size);
    }

    #[test]
    fn test_report_cadence() {
        let catalog = Catalog::standard();
        let scorer = RecordingScorer::default();
        let config = small_config().with_report_every(3);
        EvolveRunner::run(&catalog, &scorer, &config).unwrap();

        let gens: Vec<usize> = scorer
            .reports
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.generation)
            .collect();
        assert_eq!(gens, vec![0, 3, 6]);
    }

    #[test]
    fn test_trim_keep_best_bounds_pool() {
        let catalog = Catalog::standard();
        let config = small_config().with_trim_policy(TrimPolicy::KeepBest(20));
        let result = EvolveRunner::run(&catalog, &HillScorer, &config).unwrap();
        assert!(result.pool.len() <= 20);
    }

    #[test]
    fn test_failing_scorer_does_not_halt() {
        let catalog = Catalog::standard();
        let scorer = |_: &Track| -> std::result::Result<i64, ScoreError> {
            Err(ScoreError::new("simulator offline"))
        };
        let result = EvolveRunner::run(&catalog, &scorer, &small_config()).unwrap();

        assert_eq!(result.generations, 8);
        assert!(result.best.is_none());
        assert!(result.score_history.iter().all(Option::is_none));
        // nothing could reproduce, so nothing was added
        assert_eq!(result.pool.len(), 20);
    }

    #[test]
    fn test_cancelled_before_start() {
        let catalog = Catalog::standard();
        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            EvolveRunner::run_with_cancel(&catalog, &HillScorer, &small_config(), Some(cancel))
                .unwrap();

        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert!(result.best.is_some(), "initial pool is still evaluated");
    }

    #[test]
    fn test_run_seeded() {
        let catalog = Catalog::standard();
        let loop_track = Track::try_from_elements(
            [
                crate::tracks::SegmentKind::EndStation,
                crate::tracks::SegmentKind::LeftQuarterTurn1Tile,
                crate::tracks::SegmentKind::LeftQuarterTurn1Tile,
                crate::tracks::SegmentKind::Flat,
                crate::tracks::SegmentKind::LeftQuarterTurn1Tile,
                crate::tracks::SegmentKind::LeftQuarterTurn1Tile,
            ]
            .iter()
            .map(|&k| catalog.element(k).unwrap())
            .collect(),
        )
        .unwrap();

        let config = small_config().with_iterations(3);
        let result = EvolveRunner::run_seeded(
            &catalog,
            &HillScorer,
            &config,
            vec![loop_track.clone(), loop_track.clone()],
            None,
        )
        .unwrap();
        assert_eq!(result.generations, 3);
        assert!(result.best_circuit.is_some());

        let cancel = Arc::new(AtomicBool::new(true));
        let stopped =
            EvolveRunner::run_seeded(&catalog, &HillScorer, &config, vec![loop_track], Some(cancel))
                .unwrap();
        assert!(stopped.cancelled);
        assert_eq!(stopped.generations, 0);
    }

    #[test]
    fn test_run_seeded_without_tracks() {
        let catalog = Catalog::standard();
        let err = EvolveRunner::run_seeded(&catalog, &HillScorer, &small_config(), Vec::new(), None)
            .unwrap_err();
        assert_eq!(err, EvolveError::EmptyPool);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let catalog = Catalog::standard();
        let config = small_config().with_pool_size(0);
        let err = EvolveRunner::run(&catalog, &HillScorer, &config).unwrap_err();
        assert!(matches!(err, EvolveError::InvalidConfig(_)));
    }

    #[test]
    fn test_improves_keeps_first_on_tie() {
        let a = Member {
            track: Track::new(),
            score: Some(3),
            fitness: 1.0,
        };
        let b = Member {
            score: Some(3),
            ..a.clone()
        };
        assert!(!improves(Some(&b), Some(&a)));
        assert!(improves(Some(&a), None));
        assert!(!improves(None, Some(&a)));
    }
}
