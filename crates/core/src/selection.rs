//! Weighted random selection.
//!
//! A quote with weight `w` is chosen with probability `w / W`, where `W` is the
//! sum of all weights. The draw is supplied by the caller as a uniform value
//! in `[0, 1)` so storage backends can pick inside their own transaction while
//! the randomness stays outside of it.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The part of a quote the selector needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedCandidate {
    pub id: i64,
    pub weight: i64,
}

impl WeightedCandidate {
    #[must_use]
    pub const fn new(id: i64, weight: i64) -> Self {
        Self { id, weight }
    }

    /// Negative weights are rejected at write time; if one slips through it
    /// counts as zero.
    #[must_use]
    pub fn effective_weight(&self) -> u64 {
        u64::try_from(self.weight).unwrap_or(0)
    }
}

/// Sum of effective weights.
#[must_use]
pub fn total_weight(candidates: &[WeightedCandidate]) -> u64 {
    candidates.iter().fold(0u64, |acc, c| acc.saturating_add(c.effective_weight()))
}

/// Pick a candidate id for a uniform `draw` in `[0, 1)`.
///
/// Returns `None` when there are no candidates or every weight is zero.
/// Out-of-range draws are clamped into `[0, 1)`.
#[must_use]
pub fn pick_weighted(candidates: &[WeightedCandidate], draw: f64) -> Option<i64> {
    let total = total_weight(candidates);
    if total == 0 {
        return None;
    }
    let draw = if draw.is_finite() { draw.clamp(0.0, 1.0) } else { 0.0 };
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "draw is in [0, 1] so the product is within [0, total]"
    )]
    let target = ((draw * total as f64) as u64).min(total - 1);

    let mut cumulative = 0u64;
    for candidate in candidates {
        cumulative = cumulative.saturating_add(candidate.effective_weight());
        if target < cumulative {
            return Some(candidate.id);
        }
    }
    None
}

/// [`pick_weighted`] with the draw taken from `rng`.
pub fn pick_weighted_with<R: Rng + ?Sized>(
    candidates: &[WeightedCandidate],
    rng: &mut R,
) -> Option<i64> {
    pick_weighted(candidates, rng.gen_range(0.0..1.0))
}
