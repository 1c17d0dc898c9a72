//! Random utility models
//!
//! This module provides the candidate index, the `NoiseFamily` trait, the
//! generic `RandomUtilityModel`, and the Gaussian and Gumbel families.

pub mod candidates;
pub mod gaussian;
pub mod gumbel;
pub mod noise;
pub mod traits;
pub mod utility;

pub mod prelude {
    pub use super::candidates::CandidateIndex;
    pub use super::gaussian::{GaussianNoise, NormalNoiseModel, THURSTONE_SIGMA};
    pub use super::gumbel::{GumbelNoise, GumbelNoiseModel};
    pub use super::noise::{AnyNoiseModel, Noise};
    pub use super::traits::NoiseFamily;
    pub use super::utility::RandomUtilityModel;
}
