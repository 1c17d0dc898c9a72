//! Closed set of noise families
//!
//! [`Noise`] lets one model type hold either family, chosen at runtime, for
//! example from the family label of a parameter text.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ModelResult, ParseError};
use crate::model::gaussian::GaussianNoise;
use crate::model::gumbel::GumbelNoise;
use crate::model::traits::NoiseFamily;
use crate::model::utility::RandomUtilityModel;

/// Either supported noise family
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Noise {
    /// Thurstone-Mosteller noise
    Gaussian(GaussianNoise),
    /// Plackett-Luce noise
    Gumbel(GumbelNoise),
}

impl From<GaussianNoise> for Noise {
    fn from(noise: GaussianNoise) -> Self {
        Self::Gaussian(noise)
    }
}

impl From<GumbelNoise> for Noise {
    fn from(noise: GumbelNoise) -> Self {
        Self::Gumbel(noise)
    }
}

impl NoiseFamily for Noise {
    fn label(&self) -> &'static str {
        match self {
            Self::Gaussian(n) => n.label(),
            Self::Gumbel(n) => n.label(),
        }
    }

    fn validate(&self, num_candidates: usize) -> ModelResult<()> {
        match self {
            Self::Gaussian(n) => n.validate(num_candidates),
            Self::Gumbel(n) => n.validate(num_candidates),
        }
    }

    fn sample_utilities<R: Rng>(&self, strengths: &[f64], rng: &mut R) -> Vec<f64> {
        match self {
            Self::Gaussian(n) => n.sample_utilities(strengths, rng),
            Self::Gumbel(n) => n.sample_utilities(strengths, rng),
        }
    }

    fn pairwise_probability(
        &self,
        strengths: &[f64],
        winner: usize,
        loser: usize,
    ) -> ModelResult<f64> {
        match self {
            Self::Gaussian(n) => n.pairwise_probability(strengths, winner, loser),
            Self::Gumbel(n) => n.pairwise_probability(strengths, winner, loser),
        }
    }

    fn ranking_log_probability(&self, strengths: &[f64], order: &[usize]) -> ModelResult<f64> {
        match self {
            Self::Gaussian(n) => n.ranking_log_probability(strengths, order),
            Self::Gumbel(n) => n.ranking_log_probability(strengths, order),
        }
    }

    fn spreads(&self, num_candidates: usize) -> Vec<f64> {
        match self {
            Self::Gaussian(n) => n.spreads(num_candidates),
            Self::Gumbel(n) => n.spreads(num_candidates),
        }
    }

    fn from_spreads(label: &str, spreads: Vec<f64>) -> ModelResult<Self> {
        match label.to_ascii_lowercase().as_str() {
            "gaussian" | "normal" | "thurstone" => {
                GaussianNoise::from_spreads(label, spreads).map(Self::Gaussian)
            }
            "gumbel" | "plackett-luce" => {
                GumbelNoise::from_spreads(label, spreads).map(Self::Gumbel)
            }
            _ => Err(ParseError::UnknownFamily(label.to_string()).into()),
        }
    }
}

/// Random utility model whose family is chosen at runtime
pub type AnyNoiseModel<T> = RandomUtilityModel<T, Noise>;
