//! Plackett-Luce ranking probabilities
//!
//! Under Gumbel noise the probability of a full ranking factors by sequential
//! choice: the top candidate is chosen from all candidates with probability
//! proportional to `exp(scale * strength)`, the next from the remainder, and
//! so on. Evaluated bottom-up so the running normalizer is a single
//! log-sum-exp accumulator.

use super::marginal::log_add_exp;

/// Log-probability of a ranking (best first, as candidate positions)
///
/// `strengths` is indexed by candidate position. The result is finite for
/// finite strengths and a positive finite scale.
pub fn ranking_log_probability(strengths: &[f64], scale: f64, order: &[usize]) -> f64 {
    let mut remaining = f64::NEG_INFINITY;
    let mut total = 0.0;
    for &idx in order.iter().rev() {
        let theta = scale * strengths[idx];
        remaining = log_add_exp(remaining, theta);
        total += theta - remaining;
    }
    total
}
