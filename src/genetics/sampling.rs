//! Random draws used during pedigree growth

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// Pick one option with probability proportional to its weight.
///
/// Weights are relative and need not sum to one. Returns `None` when no
/// option carries positive weight.
pub fn weighted_choice<T, W, R>(rng: &mut R, options: &[(T, W)]) -> Option<T>
where
    T: Copy,
    W: Copy + Into<f64>,
    R: Rng + ?Sized,
{
    let dist = WeightedIndex::new(options.iter().map(|(_, w)| (*w).into())).ok()?;
    Some(options[dist.sample(rng)].0)
}

/// Percentile draw in (0, 1], resolution 0.01
pub fn percentile_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(1..=100u32) as f64 / 100.0
}

/// Whether a percentile draw lands at or below `likelihood`
pub fn passes<R: Rng + ?Sized>(rng: &mut R, likelihood: f64) -> bool {
    percentile_draw(rng) <= likelihood
}
