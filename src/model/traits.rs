//! Noise family trait
//!
//! This module defines the capability every noise family provides to a
//! [`RandomUtilityModel`](crate::model::utility::RandomUtilityModel). All
//! arrays are indexed by candidate position.

use rand::Rng;

use crate::error::ModelResult;

/// Noise family of a random utility model
///
/// A family decides how latent utilities scatter around the candidate
/// strengths, and supplies the matching closed-form pairwise probability and
/// ranking likelihood.
pub trait NoiseFamily: Clone + Send + Sync {
    /// Label written on the candidate line of the parameter text
    fn label(&self) -> &'static str;

    /// Check the family's parameters against the number of candidates
    fn validate(&self, num_candidates: usize) -> ModelResult<()>;

    /// Draw one latent utility per candidate
    fn sample_utilities<R: Rng>(&self, strengths: &[f64], rng: &mut R) -> Vec<f64>;

    /// Probability that a single draw ranks `winner` above `loser`
    fn pairwise_probability(
        &self,
        strengths: &[f64],
        winner: usize,
        loser: usize,
    ) -> ModelResult<f64>;

    /// Log-probability of a full ranking, best candidate first
    fn ranking_log_probability(&self, strengths: &[f64], order: &[usize]) -> ModelResult<f64>;

    /// Per-candidate spread parameters for the parameter text
    fn spreads(&self, num_candidates: usize) -> Vec<f64>;

    /// Rebuild the family from a parsed label and spread line
    fn from_spreads(label: &str, spreads: Vec<f64>) -> ModelResult<Self>;
}
