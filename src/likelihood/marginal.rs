//! Closed-form pairwise probabilities
//!
//! Both families reduce the probability that one candidate beats another to a
//! univariate CDF of the strength difference. These helpers evaluate those
//! CDFs without overflowing when the argument saturates.

use std::f64::consts::SQRT_2;

use statrs::function::erf::erfc;

/// `ln(sqrt(2π))`
pub(crate) const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;

/// Below this argument `ln Φ` switches to its asymptotic expansion
const LOG_CDF_ASYMPTOTIC: f64 = -30.0;

/// Standard normal CDF
///
/// Uses the complementary error function so the lower tail keeps full
/// relative precision instead of cancelling against 1.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// Natural log of the standard normal CDF
///
/// Finite for every finite argument. Far in the lower tail, where `Φ(z)`
/// underflows, it uses `ln φ(z) - ln(-z)` plus the first terms of the Mills
/// ratio series, accurate to about `1e-12` relative there.
pub fn log_normal_cdf(z: f64) -> f64 {
    if z > 0.0 {
        (-normal_cdf(-z)).ln_1p()
    } else if z > LOG_CDF_ASYMPTOTIC {
        normal_cdf(z).ln()
    } else {
        let z2 = z * z;
        let inv = 1.0 / z2;
        let series = 1.0 - inv * (1.0 - 3.0 * inv * (1.0 - 5.0 * inv * (1.0 - 7.0 * inv)));
        -0.5 * z2 - (-z).ln() - LN_SQRT_2PI + series.ln()
    }
}

/// Standard logistic CDF, `1 / (1 + exp(-z))`
pub fn logistic(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Numerically stable `ln(exp(a) + exp(b))`
pub fn log_add_exp(a: f64, b: f64) -> f64 {
    if a == f64::NEG_INFINITY {
        return b;
    }
    if b == f64::NEG_INFINITY {
        return a;
    }
    let (hi, lo) = if a > b { (a, b) } else { (b, a) };
    hi + (lo - hi).exp().ln_1p()
}

/// Probability that `winner` beats `loser` under independent Gaussian noise
pub(crate) fn thurstone_pairwise(
    mean_w: f64,
    mean_l: f64,
    sd_w: f64,
    sd_l: f64,
) -> Option<f64> {
    let spread = (sd_w * sd_w + sd_l * sd_l).sqrt();
    if !(spread > 0.0 && spread.is_finite()) {
        return None;
    }
    Some(normal_cdf((mean_w - mean_l) / spread))
}
