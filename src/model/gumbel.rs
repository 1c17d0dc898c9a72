//! Gumbel (Plackett-Luce) noise
//!
//! Utilities are `strength[j] + G_j / scale` with `G_j` standard Gumbel. The
//! difference of two independent standard Gumbel variables is standard
//! logistic, so
//!
//! ```text
//! P(a beats b) = 1 / (1 + exp(-(strength[a] - strength[b]) * scale))
//! ```
//!
//! holds exactly, and the distribution of the full ranking is Plackett-Luce
//! with weights `exp(scale * strength)`.

use rand::Rng;
use rand_distr::Exp1;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{ModelError, ModelResult};
use crate::likelihood::gumbel::ranking_log_probability;
use crate::likelihood::marginal::logistic;
use crate::model::traits::NoiseFamily;
use crate::model::utility::RandomUtilityModel;

/// Gumbel noise with one global scale
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GumbelNoise {
    scale: f64,
}

impl Default for GumbelNoise {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl GumbelNoise {
    /// Noise with a logistic steepness of `scale`
    pub fn new(scale: f64) -> ModelResult<Self> {
        check_scale(scale)?;
        Ok(Self { scale })
    }

    /// Logistic steepness of the pairwise law
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Scale of the Gumbel noise added to each strength (`1 / scale`)
    pub fn noise_scale(&self) -> f64 {
        1.0 / self.scale
    }
}

fn check_scale(scale: f64) -> ModelResult<()> {
    if scale > 0.0 && scale.is_finite() {
        Ok(())
    } else {
        Err(ModelError::Domain(format!(
            "Gumbel scale must be positive and finite, got {}",
            scale
        )))
    }
}

impl NoiseFamily for GumbelNoise {
    fn label(&self) -> &'static str {
        "gumbel"
    }

    fn validate(&self, _num_candidates: usize) -> ModelResult<()> {
        check_scale(self.scale)
    }

    fn sample_utilities<R: Rng>(&self, strengths: &[f64], rng: &mut R) -> Vec<f64> {
        let beta = self.noise_scale();
        strengths
            .iter()
            .map(|&s| {
                // -ln(E) is standard Gumbel for E ~ Exp(1)
                let e: f64 = rng.sample(Exp1);
                s - beta * e.ln()
            })
            .collect()
    }

    fn pairwise_probability(
        &self,
        strengths: &[f64],
        winner: usize,
        loser: usize,
    ) -> ModelResult<f64> {
        Ok(logistic((strengths[winner] - strengths[loser]) * self.scale))
    }

    fn ranking_log_probability(&self, strengths: &[f64], order: &[usize]) -> ModelResult<f64> {
        Ok(ranking_log_probability(strengths, self.scale, order))
    }

    fn spreads(&self, num_candidates: usize) -> Vec<f64> {
        vec![self.noise_scale(); num_candidates]
    }

    fn from_spreads(_label: &str, spreads: Vec<f64>) -> ModelResult<Self> {
        let beta = match spreads.first() {
            Some(&beta) => beta,
            None => return Self::new(1.0),
        };
        if spreads
            .iter()
            .any(|&b| (b - beta).abs() > 1e-12 * beta.abs().max(1.0))
        {
            return Err(ModelError::Domain(
                "Gumbel noise requires one scale shared by all candidates".to_string(),
            ));
        }
        Self::new(1.0 / beta)
    }
}

/// Random utility model with Gumbel noise
pub type GumbelNoiseModel<T> = RandomUtilityModel<T, GumbelNoise>;

impl<T> RandomUtilityModel<T, GumbelNoise>
where
    T: Clone + Eq + Hash + Debug,
{
    /// Explicit strengths with unit scale
    pub fn new(candidates: Vec<T>, strengths: Vec<f64>) -> ModelResult<Self> {
        Self::from_parts(candidates, strengths, GumbelNoise::default())
    }

    /// Explicit strengths with a custom scale
    pub fn with_scale(candidates: Vec<T>, strengths: Vec<f64>, scale: f64) -> ModelResult<Self> {
        Self::from_parts(candidates, strengths, GumbelNoise::new(scale)?)
    }

    /// Equally spaced strengths with unit scale
    pub fn ladder(candidates: Vec<T>, delta: f64) -> ModelResult<Self> {
        Self::from_adjacent_difference(candidates, delta, GumbelNoise::default())
    }

    /// Logistic steepness of the pairwise law
    pub fn scale(&self) -> f64 {
        self.noise().scale()
    }
}
