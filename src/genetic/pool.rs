//! One generation of candidate layouts.
//!
//! The pool owns its members outright. Crossover appends children without
//! removing parents, so the pool only shrinks through an explicit
//! [`Pool::trim`].

use super::builder::TrackBuilder;
use super::config::{EvolveConfig, FitnessShaping, TrimPolicy};
use super::crossover::crossover;
use super::mutation::insertion_mutation;
use super::selection::roulette;
use super::types::{Member, TrackScorer};
use crate::error::{EvolveError, Result};
use crate::tracks::{Catalog, Track};
use log::{debug, warn};
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of one [`Pool::evaluate`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvaluationSummary {
    /// Members that received a score.
    pub scored: usize,
    /// Members whose scorer returned an error.
    pub failed: usize,
}

/// A population of [`Member`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pool {
    members: Vec<Member>,
}

impl Pool {
    /// Wraps existing members.
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    /// Builds `config.pool_size` fresh tracks.
    ///
    /// A track the builder cannot finish is left out with a warning, so the
    /// pool may come back smaller than requested.
    ///
    /// # Errors
    /// [`EvolveError::BuildExhausted`] if not a single track could be built.
    pub fn build<R: Rng>(catalog: &Catalog, config: &EvolveConfig, rng: &mut R) -> Result<Self> {
        let builder = TrackBuilder::new(
            catalog,
            config.station_length,
            config.initial_track_length,
        )
        .with_limits(config.build_attempts, config.backtrack_limit);

        let mut members = Vec::with_capacity(config.pool_size);
        for i in 0..config.pool_size {
            match builder.build(rng) {
                Ok(track) => members.push(Member::new(track)),
                Err(e) => warn!("member {i} left out of initial pool: {e}"),
            }
        }

        if members.is_empty() {
            return Err(EvolveError::BuildExhausted {
                attempts: config.build_attempts,
            });
        }
        Ok(Self { members })
    }

    /// Seeds a pool from existing layouts, e.g. tracks loaded from disk.
    ///
    /// # Errors
    /// - [`EvolveError::EmptyPool`] if `tracks` is empty
    /// - [`EvolveError::IncompatibleSeam`] or
    ///   [`EvolveError::IneligibleChainLift`] for the first malformed track
    pub fn from_tracks(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(EvolveError::EmptyPool);
        }
        let mut members = Vec::with_capacity(tracks.len());
        for track in tracks {
            track.validate()?;
            members.push(Member::new(track));
        }
        Ok(Self { members })
    }

    /// Members in enumeration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Consumes the pool, returning its members.
    pub fn into_members(self) -> Vec<Member> {
        self.members
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the pool has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Scores every member and assigns reproduction weight.
    ///
    /// A scoring failure leaves that member unscored with zero weight for
    /// this generation. With [`FitnessShaping::Uniform`] every scored member
    /// weighs 1.
    pub fn evaluate<S: TrackScorer>(
        &mut self,
        scorer: &S,
        shaping: FitnessShaping,
        parallel: bool,
    ) -> EvaluationSummary {
        #[cfg(feature = "parallel")]
        let failed = if parallel {
            self.members
                .par_iter_mut()
                .enumerate()
                .map(|(i, m)| score_member(scorer, i, m))
                .filter(|scored| !scored)
                .count()
        } else {
            score_serial(scorer, &mut self.members)
        };

        #[cfg(not(feature = "parallel"))]
        let failed = {
            let _ = parallel;
            score_serial(scorer, &mut self.members)
        };

        self.shape_fitness(shaping);

        EvaluationSummary {
            scored: self.members.len() - failed,
            failed,
        }
    }

    fn shape_fitness(&mut self, shaping: FitnessShaping) {
        match shaping {
            FitnessShaping::Uniform => {
                for m in &mut self.members {
                    m.fitness = if m.score.is_some() { 1.0 } else { 0.0 };
                }
            }
            FitnessShaping::ScoreProportional => {
                let min = self.members.iter().filter_map(|m| m.score).min();
                for m in &mut self.members {
                    m.fitness = match (m.score, min) {
                        // i128: the spread of two i64 scores can exceed i64::MAX
                        (Some(s), Some(lo)) => (i128::from(s) - i128::from(lo)) as f64 + 1.0,
                        _ => 0.0,
                    };
                }
            }
        }
    }

    /// Draws one member by roulette-wheel selection.
    ///
    /// # Errors
    /// [`EvolveError::EmptyPool`] or [`EvolveError::NoFitness`]; never a
    /// placeholder member.
    pub fn select<R: Rng>(&self, rng: &mut R) -> Result<&Member> {
        roulette(&self.members, rng).map(|i| &self.members[i])
    }

    /// Runs `len / 2` parent-pair draws and appends any children.
    ///
    /// Parents are drawn with replacement. Each pair attempts crossover with
    /// probability `probability`. Children are appended unscored after all
    /// pairs are processed; parents stay.
    ///
    /// Returns the number of children appended.
    ///
    /// # Errors
    /// Selection errors, when the pool has at least two members but no
    /// reproductive weight.
    pub fn crossover<R: Rng>(&mut self, probability: f64, rng: &mut R) -> Result<usize> {
        let pairs = self.members.len() / 2;
        let mut children = Vec::new();
        let mut matched = 0;

        for _ in 0..pairs {
            let p1 = roulette(&self.members, rng)?;
            let p2 = roulette(&self.members, rng)?;
            if rng.random::<f64>() < probability {
                let produced = crossover(&self.members[p1].track, &self.members[p2].track, rng);
                if !produced.is_empty() {
                    matched += 1;
                }
                children.extend(produced.into_iter().map(Member::new));
            }
        }

        let appended = children.len();
        debug!("crossover: {pairs} pairs, {matched} spliced, {appended} children");
        self.members.extend(children);
        Ok(appended)
    }

    /// Applies insertion mutation to every member.
    ///
    /// Members whose track changed lose their score. Returns how many
    /// members changed.
    pub fn mutate<R: Rng>(&mut self, catalog: &Catalog, rate: f64, rng: &mut R) -> usize {
        let mut mutated = 0;
        for m in &mut self.members {
            if insertion_mutation(&mut m.track, catalog, rate, rng) > 0 {
                m.invalidate();
                mutated += 1;
            }
        }
        mutated
    }

    /// Shrinks the pool according to `policy`.
    ///
    /// Surviving members keep their relative order.
    pub fn trim<R: Rng>(&mut self, policy: TrimPolicy, rng: &mut R) {
        match policy {
            TrimPolicy::None => {}
            TrimPolicy::KeepBest(n) => {
                if self.members.len() > n {
                    let mut ranked: Vec<usize> = (0..self.members.len()).collect();
                    // stable: ties keep enumeration order, unscored sink
                    ranked.sort_by(|&a, &b| self.members[b].score.cmp(&self.members[a].score));
                    ranked.truncate(n);
                    self.retain_indices(ranked);
                }
            }
            TrimPolicy::KeepRandom(n) => {
                if self.members.len() > n {
                    let picked = rand::seq::index::sample(rng, self.members.len(), n).into_vec();
                    self.retain_indices(picked);
                }
            }
        }
    }

    fn retain_indices(&mut self, mut keep: Vec<usize>) {
        keep.sort_unstable();
        let mut keep = keep.into_iter().peekable();
        let mut index = 0;
        self.members.retain(|_| {
            let kept = keep.peek() == Some(&index);
            if kept {
                keep.next();
            }
            index += 1;
            kept
        });
    }

    /// The highest-scoring member; ties go to the earliest.
    pub fn best(&self) -> Option<&Member> {
        best_of(self.members.iter())
    }

    /// The highest-scoring member whose track is a closed circuit.
    pub fn best_circuit(&self) -> Option<&Member> {
        best_of(self.members.iter().filter(|m| m.track.is_circuit()))
    }

    /// Members whose track is a closed circuit.
    pub fn circuit_count(&self) -> usize {
        self.members.iter().filter(|m| m.track.is_circuit()).count()
    }

    /// Members without a current score.
    pub fn unscored_count(&self) -> usize {
        self.members.iter().filter(|m| m.score.is_none()).count()
    }
}

fn best_of<'a>(members: impl Iterator<Item = &'a Member>) -> Option<&'a Member> {
    let mut best: Option<&Member> = None;
    for m in members.filter(|m| m.score.is_some()) {
        match best {
            Some(b) if b.score >= m.score => {}
            _ => best = Some(m),
        }
    }
    best
}

/// Returns whether the member was scored.
fn score_member<S: TrackScorer>(scorer: &S, index: usize, member: &mut Member) -> bool {
    match scorer.score(&member.track) {
        Ok(score) => {
            member.score = Some(score);
            true
        }
        Err(e) => {
            warn!("member {index} unscored: {e}");
            member.score = None;
            false
        }
    }
}

fn score_serial<S: TrackScorer>(scorer: &S, members: &mut [Member]) -> usize {
    members
        .iter_mut()
        .enumerate()
        .map(|(i, m)| score_member(scorer, i, m))
        .filter(|scored| !scored)
        .count()
}
