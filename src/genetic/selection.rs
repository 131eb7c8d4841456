//! Fitness-proportionate parent selection.
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*, ch. 1 (roulette wheel)

use super::types::Member;
use crate::error::{EvolveError, Result};
use rand::Rng;

/// Roulette-wheel selection over member fitness.
///
/// Walks the members in order keeping a running fitness total, draws a
/// value in `[0, total)`, and returns the index of the first member whose
/// running total exceeds it. Members with zero weight are never chosen.
///
/// # Errors
/// - [`EvolveError::EmptyPool`] for an empty slice
/// - [`EvolveError::NoFitness`] when no member has positive weight
///
/// # Complexity
/// O(n) per selection
pub fn roulette<R: Rng>(members: &[Member], rng: &mut R) -> Result<usize> {
    if members.is_empty() {
        return Err(EvolveError::EmptyPool);
    }

    let total: f64 = members.iter().map(|m| m.fitness.max(0.0)).sum();
    if !(total > 0.0 && total.is_finite()) {
        return Err(EvolveError::NoFitness { total });
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last_weighted = 0;
    for (i, m) in members.iter().enumerate() {
        let w = m.fitness.max(0.0);
        if w <= 0.0 {
            continue;
        }
        cumulative += w;
        last_weighted = i;
        if cumulative > threshold {
            return Ok(i);
        }
    }

    Ok(last_weighted) // floating-point fallback
}
