//! Discrete categorical sampling.
//!
//! Used wherever a roster of outcomes must be turned into one outcome: delivery
//! symbols, dismissal modes, fielder identity, toss choice, follow-on decision.

use crate::error::{Error, Result};
use rand::distributions::WeightedIndex;
use rand::Rng;

/// Draw one label from `weights` with probability proportional to its weight.
/// Weights need not sum to one. Fails with [`Error::EmptyDistribution`] if every
/// weight is zero (or the map is empty).
pub fn sample_weighted<'a, T>(rng: &mut impl Rng, weights: &'a [(T, f64)]) -> Result<&'a T> {
    if weights.is_empty() || weights.iter().all(|(_, w)| *w <= 0.0) {
        return Err(Error::EmptyDistribution);
    }
    let dist = WeightedIndex::new(weights.iter().map(|(_, w)| w.max(0.0)))
        .map_err(|_| Error::EmptyDistribution)?;
    let idx = rng.sample(dist);
    Ok(&weights[idx].0)
}

/// Draw one label uniformly at random from a non-empty slice.
pub fn sample_uniform<'a, T>(rng: &mut impl Rng, items: &'a [T]) -> Result<&'a T> {
    if items.is_empty() {
        return Err(Error::EmptyDistribution);
    }
    let idx = rng.gen_range(0..items.len());
    Ok(&items[idx])
}
