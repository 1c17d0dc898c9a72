//! Gaussian (Thurstone-Mosteller) noise
//!
//! Each candidate's utility is drawn independently from
//! `Normal(strength[j], sd[j])`. With the default standard deviation of
//! `sqrt(0.5)` the difference of two utilities has unit variance, which is
//! the classic Thurstone case V scaling.

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{ModelError, ModelResult};
use crate::likelihood::gaussian::GridQuadrature;
use crate::likelihood::marginal::thurstone_pairwise;
use crate::model::traits::NoiseFamily;
use crate::model::utility::RandomUtilityModel;

/// Standard deviation giving unit-variance pairwise differences
pub const THURSTONE_SIGMA: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Independent Gaussian noise with one standard deviation per candidate
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GaussianNoise {
    sds: Vec<f64>,
    #[serde(default)]
    quadrature: GridQuadrature,
}

impl GaussianNoise {
    /// Noise with explicit per-candidate standard deviations
    pub fn new(sds: Vec<f64>) -> Self {
        Self {
            sds,
            quadrature: GridQuadrature::default(),
        }
    }

    /// Noise with one standard deviation shared by `num_candidates` candidates
    pub fn shared(sd: f64, num_candidates: usize) -> Self {
        Self::new(vec![sd; num_candidates])
    }

    /// Thurstone noise (`sd = sqrt(0.5)`) for `num_candidates` candidates
    pub fn thurstone(num_candidates: usize) -> Self {
        Self::shared(THURSTONE_SIGMA, num_candidates)
    }

    /// Use a custom quadrature for ranking likelihoods
    pub fn with_quadrature(mut self, quadrature: GridQuadrature) -> Self {
        self.quadrature = quadrature;
        self
    }

    /// Standard deviation per candidate
    pub fn sigmas(&self) -> &[f64] {
        &self.sds
    }

    /// Quadrature used for ranking likelihoods
    pub fn quadrature(&self) -> &GridQuadrature {
        &self.quadrature
    }
}

impl NoiseFamily for GaussianNoise {
    fn label(&self) -> &'static str {
        "gaussian"
    }

    fn validate(&self, num_candidates: usize) -> ModelResult<()> {
        if self.sds.len() != num_candidates {
            return Err(ModelError::DimensionMismatch {
                what: "standard deviations",
                expected: num_candidates,
                actual: self.sds.len(),
            });
        }
        if let Some(bad) = self.sds.iter().find(|sd| !(**sd >= 0.0 && sd.is_finite())) {
            return Err(ModelError::Domain(format!(
                "standard deviations must be non-negative and finite, got {}",
                bad
            )));
        }
        self.quadrature.validate()
    }

    fn sample_utilities<R: Rng>(&self, strengths: &[f64], rng: &mut R) -> Vec<f64> {
        strengths
            .iter()
            .zip(&self.sds)
            .map(|(&mean, &sd)| {
                let z: f64 = rng.sample(StandardNormal);
                mean + sd * z
            })
            .collect()
    }

    fn pairwise_probability(
        &self,
        strengths: &[f64],
        winner: usize,
        loser: usize,
    ) -> ModelResult<f64> {
        thurstone_pairwise(
            strengths[winner],
            strengths[loser],
            self.sds[winner],
            self.sds[loser],
        )
        .ok_or_else(|| {
            ModelError::Domain(format!(
                "candidates {} and {} both have zero variance",
                winner, loser
            ))
        })
    }

    fn ranking_log_probability(&self, strengths: &[f64], order: &[usize]) -> ModelResult<f64> {
        self.quadrature
            .ranking_log_probability(strengths, &self.sds, order)
    }

    fn spreads(&self, _num_candidates: usize) -> Vec<f64> {
        self.sds.clone()
    }

    fn from_spreads(_label: &str, spreads: Vec<f64>) -> ModelResult<Self> {
        Ok(Self::new(spreads))
    }
}

/// Random utility model with Gaussian noise
pub type NormalNoiseModel<T> = RandomUtilityModel<T, GaussianNoise>;

impl<T> RandomUtilityModel<T, GaussianNoise>
where
    T: Clone + Eq + Hash + Debug,
{
    /// Explicit strengths and per-candidate standard deviations
    pub fn new(candidates: Vec<T>, strengths: Vec<f64>, sds: Vec<f64>) -> ModelResult<Self> {
        Self::from_parts(candidates, strengths, GaussianNoise::new(sds))
    }

    /// Explicit strengths with the Thurstone standard deviation
    pub fn thurstone_with_strengths(candidates: Vec<T>, strengths: Vec<f64>) -> ModelResult<Self> {
        let noise = GaussianNoise::thurstone(candidates.len());
        Self::from_parts(candidates, strengths, noise)
    }

    /// Explicit strengths with one shared standard deviation
    pub fn with_shared_sd(candidates: Vec<T>, strengths: Vec<f64>, sd: f64) -> ModelResult<Self> {
        let noise = GaussianNoise::shared(sd, candidates.len());
        Self::from_parts(candidates, strengths, noise)
    }

    /// Equally spaced strengths with one shared standard deviation
    pub fn ladder(candidates: Vec<T>, delta: f64, sd: f64) -> ModelResult<Self> {
        let noise = GaussianNoise::shared(sd, candidates.len());
        Self::from_adjacent_difference(candidates, delta, noise)
    }

    /// Equally spaced strengths with the Thurstone standard deviation
    pub fn thurstone(candidates: Vec<T>, delta: f64) -> ModelResult<Self> {
        Self::ladder(candidates, delta, THURSTONE_SIGMA)
    }

    /// Standard deviation per candidate
    pub fn sigmas(&self) -> &[f64] {
        self.noise().sigmas()
    }
}
