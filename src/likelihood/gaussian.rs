//! Thurstone ranking probabilities by grid quadrature
//!
//! The probability of a full ranking under independent Gaussian utilities is
//! an orthant probability of a multivariate normal and has no closed form
//! beyond two candidates. Conditioning on order statistics turns it into a
//! chain of one-dimensional integrals:
//!
//! ```text
//! F_m(x)  = Φ((x - μ_m) / σ_m)                       (worst candidate)
//! F_k(x)  = ∫_{-∞}^{x} φ_k(y) F_{k+1}(y) dy          (k = m-1 .. 2)
//! P(rank) = ∫ φ_1(y) F_2(y) dy                       (best candidate)
//! ```
//!
//! Each `ln F_k` is tabulated on a fixed uniform grid with the cumulative
//! trapezoid rule, accumulated entirely in log space so that rankings far in
//! the tails keep a finite log-probability. The grid depends only on the
//! parameters, so identical inputs always produce identical outputs.
//!
//! # Error bound
//!
//! Truncating the grid `tail_sds` standard deviations beyond the extreme
//! means drops mass below `Φ(-tail_sds)` (about `6e-16` for the default of 8).
//! The cumulative trapezoid rule has error `dx² / 12 · |f'|`, which for a
//! Gaussian stage of width `σ` is at most `0.02 · (dx / σ)²`. The grid step is
//! never coarser than `σ_min / POINTS_PER_SD` over the ranked candidates, which
//! bounds the absolute error of every stage by about `2e-5`; with the default
//! 4096 intervals and comparable spreads it is nearer `1e-7`. Parameters that
//! would need more than [`GridQuadrature::MAX_INTERVALS`] intervals to meet that
//! resolution are rejected with a domain error.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

use super::marginal::{log_add_exp, log_normal_cdf, LN_SQRT_2PI};

/// Grid quadrature configuration for Gaussian ranking likelihoods
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridQuadrature {
    /// Minimum number of grid intervals (default: 4096)
    pub intervals: usize,
    /// Padding beyond the extreme means, in standard deviations (default: 8.0)
    pub tail_sds: f64,
}

impl Default for GridQuadrature {
    fn default() -> Self {
        Self {
            intervals: 4096,
            tail_sds: 8.0,
        }
    }
}

impl GridQuadrature {
    /// Smallest grid accepted
    pub const MIN_INTERVALS: usize = 16;

    /// Largest grid ever built
    pub const MAX_INTERVALS: usize = 1 << 21;

    /// Grid points per standard deviation of the narrowest ranked candidate
    pub const POINTS_PER_SD: f64 = 32.0;

    /// Create a quadrature with a custom grid
    pub fn new(intervals: usize, tail_sds: f64) -> ModelResult<Self> {
        let quadrature = Self {
            intervals,
            tail_sds,
        };
        quadrature.validate()?;
        Ok(quadrature)
    }

    /// Check the configuration
    ///
    /// Also run before every evaluation.
    pub fn validate(&self) -> ModelResult<()> {
        if !(Self::MIN_INTERVALS..=Self::MAX_INTERVALS).contains(&self.intervals) {
            return Err(ModelError::Domain(format!(
                "quadrature intervals must be in {}..={}, got {}",
                Self::MIN_INTERVALS,
                Self::MAX_INTERVALS,
                self.intervals
            )));
        }
        if !(self.tail_sds > 0.0 && self.tail_sds.is_finite()) {
            return Err(ModelError::Domain(format!(
                "tail padding must be positive and finite, got {}",
                self.tail_sds
            )));
        }
        Ok(())
    }

    /// Log-probability of a ranking (best first, as candidate positions)
    ///
    /// `means` and `sds` are indexed by candidate position. Fails with a
    /// domain error if the configuration is invalid, if any involved standard
    /// deviation is not strictly positive, if any value is non-finite, or if
    /// the spreads differ too much for the grid to resolve them.
    pub fn ranking_log_probability(
        &self,
        means: &[f64],
        sds: &[f64],
        order: &[usize],
    ) -> ModelResult<f64> {
        self.validate()?;
        for &idx in order {
            check_parameters(idx, means[idx], sds[idx])?;
        }

        match order {
            [] | [_] => Ok(0.0),
            [w, l] => {
                let spread = sds[*w].hypot(sds[*l]);
                Ok(log_normal_cdf((means[*w] - means[*l]) / spread))
            }
            _ => self.integrate(means, sds, order),
        }
    }

    fn integrate(&self, means: &[f64], sds: &[f64], order: &[usize]) -> ModelResult<f64> {
        let lo = order
            .iter()
            .map(|&i| means[i] - self.tail_sds * sds[i])
            .fold(f64::INFINITY, f64::min);
        let hi = order
            .iter()
            .map(|&i| means[i] + self.tail_sds * sds[i])
            .fold(f64::NEG_INFINITY, f64::max);
        let sd_min = order
            .iter()
            .map(|&i| sds[i])
            .fold(f64::INFINITY, f64::min);

        let width = hi - lo;
        let needed = (width * Self::POINTS_PER_SD / sd_min).ceil();
        if !(needed <= Self::MAX_INTERVALS as f64) {
            return Err(ModelError::Domain(format!(
                "spreads from {} over a range of {} need {} grid intervals, limit is {}",
                sd_min,
                width,
                needed,
                Self::MAX_INTERVALS
            )));
        }
        let n = self.intervals.max(needed as usize);
        let dx = width / n as f64;
        let x = |k: usize| lo + dx * k as f64;

        let last = order[order.len() - 1];
        let mut log_cumulative: Vec<f64> = (0..=n)
            .map(|k| log_normal_cdf((x(k) - means[last]) / sds[last]))
            .collect();
        let mut log_integrand = vec![0.0; n + 1];
        let log_half_dx = (0.5 * dx).ln();

        for &idx in order[1..order.len() - 1].iter().rev() {
            for (k, value) in log_integrand.iter_mut().enumerate() {
                *value = log_density(x(k), means[idx], sds[idx]) + log_cumulative[k];
            }

            let mut acc = f64::NEG_INFINITY;
            log_cumulative[0] = acc;
            for k in 1..=n {
                let piece = log_half_dx + log_add_exp(log_integrand[k - 1], log_integrand[k]);
                acc = log_add_exp(acc, piece);
                log_cumulative[k] = acc;
            }
        }

        let first = order[0];
        for (k, value) in log_integrand.iter_mut().enumerate() {
            let end_weight = if k == 0 || k == n { -std::f64::consts::LN_2 } else { 0.0 };
            *value = end_weight + log_density(x(k), means[first], sds[first]) + log_cumulative[k];
        }
        let peak = log_integrand
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        if peak == f64::NEG_INFINITY {
            return Ok(f64::NEG_INFINITY);
        }
        let sum: f64 = log_integrand.iter().map(|v| (v - peak).exp()).sum();

        // Quadrature error can push a near-certain ranking just above zero.
        Ok((dx.ln() + peak + sum.ln()).min(0.0))
    }
}

fn check_parameters(idx: usize, mean: f64, sd: f64) -> ModelResult<()> {
    if !mean.is_finite() {
        return Err(ModelError::Domain(format!(
            "mean of candidate {} is not finite: {}",
            idx, mean
        )));
    }
    if !(sd > 0.0 && sd.is_finite()) {
        return Err(ModelError::Domain(format!(
            "standard deviation of candidate {} must be positive and finite, got {}",
            idx, sd
        )));
    }
    Ok(())
}

#[inline]
fn log_density(x: f64, mean: f64, sd: f64) -> f64 {
    let z = (x - mean) / sd;
    -0.5 * z * z - sd.ln() - LN_SQRT_2PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::likelihood::marginal::{normal_cdf, thurstone_pairwise};

    const THURSTONE: f64 = std::f64::consts::FRAC_1_SQRT_2;

    fn permutations3() -> Vec<[usize; 3]> {
        vec![
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ]
    }

    #[test]
    fn test_exchangeable_candidates() {
        let quad = GridQuadrature::default();
        let means = [0.0; 3];
        let sds = [THURSTONE; 3];
        for perm in permutations3() {
            let lp = quad.ranking_log_probability(&means, &sds, &perm).unwrap();
            assert!((lp - (1.0f64 / 6.0).ln()).abs() < 1e-5, "lp = {}", lp);
        }
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let quad = GridQuadrature::default();
        let means = [1.0, 0.2, -0.5];
        let sds = [0.5, 1.0, 0.8];
        let total: f64 = permutations3()
            .iter()
            .map(|p| quad.ranking_log_probability(&means, &sds, p).unwrap().exp())
            .sum();
        assert!((total - 1.0).abs() < 1e-5, "total = {}", total);
    }

    #[test]
    fn test_four_candidates_sum_to_one() {
        let quad = GridQuadrature::default();
        let means = [0.6, 0.2, -0.1, -0.7];
        let sds = [THURSTONE; 4];
        let mut total = 0.0;
        for a in 0..4 {
            for b in 0..4 {
                for c in 0..4 {
                    for d in 0..4 {
                        let p = [a, b, c, d];
                        let mut seen = [false; 4];
                        p.iter().for_each(|&i| seen[i] = true);
                        if seen.iter().all(|&s| s) {
                            total += quad.ranking_log_probability(&means, &sds, &p).unwrap().exp();
                        }
                    }
                }
            }
        }
        assert!((total - 1.0).abs() < 1e-5, "total = {}", total);
    }

    #[test]
    fn test_two_candidates_closed_form() {
        let quad = GridQuadrature::default();
        let lp = quad
            .ranking_log_probability(&[0.4, -0.1], &[THURSTONE, THURSTONE], &[0, 1])
            .unwrap();
        assert!((lp - normal_cdf(0.5).ln()).abs() < 1e-14);
    }

    #[test]
    fn test_marginal_consistency() {
        // P(a > b) = P(abc) + P(acb) + P(cab)
        let quad = GridQuadrature::default();
        let means = [0.3, 0.0, 0.1];
        let sds = [1.0, 0.6, 0.9];
        let p: f64 = [[0, 1, 2], [0, 2, 1], [2, 0, 1]]
            .iter()
            .map(|o| quad.ranking_log_probability(&means, &sds, o).unwrap().exp())
            .sum();
        let exact = thurstone_pairwise(means[0], means[1], sds[0], sds[1]).unwrap();
        assert!((p - exact).abs() < 1e-5);
    }

    #[test]
    fn test_single_candidate() {
        let quad = GridQuadrature::default();
        assert_eq!(quad.ranking_log_probability(&[2.0], &[1.0], &[0]).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_variance_is_domain_error() {
        let quad = GridQuadrature::default();
        let err = quad
            .ranking_log_probability(&[0.0, 0.0, 0.0], &[1.0, 0.0, 1.0], &[0, 1, 2])
            .unwrap_err();
        assert!(matches!(err, ModelError::Domain(_)));
    }

    #[test]
    fn test_deterministic() {
        let quad = GridQuadrature::new(512, 6.0).unwrap();
        let means = [0.5, -0.2, 0.1, 0.0];
        let sds = [0.7, 0.9, 1.1, 0.5];
        let a = quad.ranking_log_probability(&means, &sds, &[2, 0, 3, 1]).unwrap();
        let b = quad.ranking_log_probability(&means, &sds, &[2, 0, 3, 1]).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(GridQuadrature::new(4, 8.0).is_err());
        assert!(GridQuadrature::new(1024, 0.0).is_err());
        assert!(GridQuadrature::new(1024, f64::NAN).is_err());
        assert!(GridQuadrature::new(GridQuadrature::MAX_INTERVALS + 1, 8.0).is_err());
    }

    #[test]
    fn test_unchecked_configuration_is_domain_error() {
        let means = [0.0, -0.5, -1.0];
        let sds = [THURSTONE; 3];
        for quad in [
            GridQuadrature {
                intervals: 0,
                tail_sds: 8.0,
            },
            GridQuadrature {
                intervals: 4096,
                tail_sds: -1.0,
            },
        ] {
            let err = quad
                .ranking_log_probability(&means, &sds, &[0, 1, 2])
                .unwrap_err();
            assert!(matches!(err, ModelError::Domain(_)));
        }

        let quad: GridQuadrature =
            serde_json::from_str(r#"{"intervals": 0, "tail_sds": 8.0}"#).unwrap();
        assert!(matches!(quad.validate(), Err(ModelError::Domain(_))));
    }

    #[test]
    fn test_narrow_spread_sums_to_one() {
        let quad = GridQuadrature::default();
        let cases: [([f64; 3], [f64; 3]); 3] = [
            ([0.0, 0.0, 0.0], [1.0, 0.001, 1.0]),
            ([0.0, 0.00123, 0.0], [1.0, 0.0005, 1.0]),
            ([0.0, 50.0, -50.0], [1.0, 0.01, 1.0]),
        ];
        for (means, sds) in cases {
            let lps: Vec<f64> = permutations3()
                .iter()
                .map(|p| quad.ranking_log_probability(&means, &sds, p).unwrap())
                .collect();
            assert!(lps.iter().all(|&lp| lp <= 0.0), "lps = {:?}", lps);
            let total: f64 = lps.iter().map(|lp| lp.exp()).sum();
            assert!((total - 1.0).abs() < 1e-4, "total = {} for {:?}", total, sds);
        }

        // A narrow middle candidate is equally likely to land anywhere
        // between the other two, so a > b > c has probability 1/4.
        let lp = quad
            .ranking_log_probability(&[0.0; 3], &[1.0, 0.001, 1.0], &[0, 1, 2])
            .unwrap();
        assert!((lp - 0.25f64.ln()).abs() < 1e-4, "lp = {}", lp);
    }

    #[test]
    fn test_unresolvable_spreads_are_domain_error() {
        let quad = GridQuadrature::default();
        let err = quad
            .ranking_log_probability(&[0.0; 3], &[1.0, 1e-9, 1.0], &[0, 1, 2])
            .unwrap_err();
        assert!(matches!(err, ModelError::Domain(_)));
    }

    #[test]
    fn test_distant_means_stay_finite() {
        let quad = GridQuadrature::default();

        let lp = quad
            .ranking_log_probability(&[0.0, 50.0], &[1.0, 1.0], &[0, 1])
            .unwrap();
        assert!(lp.is_finite() && lp < -1000.0, "lp = {}", lp);

        let means = [0.0, 50.0, -50.0];
        let sds = [1.0, 0.01, 1.0];
        for perm in permutations3() {
            let lp = quad.ranking_log_probability(&means, &sds, &perm).unwrap();
            assert!(lp.is_finite(), "{:?} gave {}", perm, lp);
        }
    }
}
