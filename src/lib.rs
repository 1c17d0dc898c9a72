//! # random-utility
//!
//! Random utility models for probabilistic rankings.
//!
//! Every candidate has a latent utility: its strength plus independent noise.
//! A ranking is the order of one draw of those utilities, best first. The
//! library samples rankings and profiles from a model, computes pairwise
//! win probabilities in closed form, and evaluates the log-likelihood of
//! observed rankings under a parameter vector, for use inside an external
//! estimator.
//!
//! ## Noise Families
//!
//! - **Gaussian** (Thurstone-Mosteller): per-candidate standard deviations,
//!   pairwise probabilities through the normal CDF, ranking likelihoods by
//!   deterministic grid quadrature
//! - **Gumbel** (Plackett-Luce): one global scale, logistic pairwise
//!   probabilities, exact ranking likelihoods by sequential choice
//!
//! ## Quick Start
//!
//! ```rust
//! use random_utility::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let model = GumbelNoiseModel::ladder(vec!['a', 'b', 'c', 'd'], 0.2)?;
//! let profile = model.sample_profile(1_000, &mut rng);
//!
//! let p = model.marginal_probability(&'a', &'b')?;
//! assert!((p - 1.0 / (1.0 + (-0.2f64).exp())).abs() < 1e-12);
//!
//! let ll = model.log_likelihood(&profile)?;
//! assert!(ll < 0.0);
//! # Ok::<(), random_utility::error::ModelError>(())
//! ```
//!
//! ## Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `parallel` | `sample_profile_parallel` via rayon | on |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) | off |

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod codec;
pub mod error;
pub mod likelihood;
pub mod model;
pub mod profile;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::codec::ParamText;
    pub use crate::error::*;
    pub use crate::likelihood::prelude::*;
    pub use crate::model::prelude::*;
    pub use crate::profile::PreferenceProfile;
}
