//! Probability engines
//!
//! Closed-form pairwise probabilities for both noise families, the exact
//! Plackett-Luce ranking likelihood for Gumbel noise, and grid quadrature for
//! Gaussian ranking likelihoods.

pub mod gaussian;
pub mod gumbel;
pub mod marginal;

pub mod prelude {
    pub use super::gaussian::GridQuadrature;
    pub use super::marginal::{log_add_exp, log_normal_cdf, logistic, normal_cdf};
}
