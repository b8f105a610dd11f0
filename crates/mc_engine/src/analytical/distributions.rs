//! Standard normal distribution functions.

use num_traits::Float;

/// Converts an `f64` constant into `T`.
#[inline]
pub(crate) fn lit<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Complementary error function, Abramowitz and Stegun 7.1.26.
///
/// Absolute error below 1.5e-7.
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    let a1 = lit::<T>(0.254829592);
    let a2 = lit::<T>(-0.284496736);
    let a3 = lit::<T>(1.421413741);
    let a4 = lit::<T>(-1.453152027);
    let a5 = lit::<T>(1.061405429);
    let p = lit::<T>(0.3275911);

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let erfc_abs = t * poly * (-abs_x * abs_x).exp();

    if x < T::zero() {
        lit::<T>(2.0) - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function Φ(x).
///
/// Saturates to 0 or 1 beyond |x| > 8.
///
/// ```rust
/// use mc_engine::analytical::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!((norm_cdf(1.96_f64) - 0.975).abs() < 1e-4);
/// ```
pub fn norm_cdf<T: Float>(x: T) -> T {
    if x.abs() > lit::<T>(8.0) {
        return if x > T::zero() { T::one() } else { T::zero() };
    }
    lit::<T>(0.5) * erfc_approx(-x / lit::<T>(std::f64::consts::SQRT_2))
}

/// Standard normal density φ(x) = exp(-x²/2) / √(2π).
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let inv_sqrt_2pi = lit::<T>(0.398_942_280_401_432_7);
    inv_sqrt_2pi * (-lit::<T>(0.5) * x * x).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_norm_cdf_symmetry() {
        for x in [0.1_f64, 0.5, 1.0, 2.0, 3.5] {
            assert_abs_diff_eq!(norm_cdf(x) + norm_cdf(-x), 1.0, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_norm_cdf_known_values() {
        assert_abs_diff_eq!(norm_cdf(1.0_f64), 0.841_344_746, epsilon = 1e-6);
        assert_abs_diff_eq!(norm_cdf(-2.0_f64), 0.022_750_132, epsilon = 1e-6);
        assert_eq!(norm_cdf(9.0_f64), 1.0);
        assert_eq!(norm_cdf(-9.0_f64), 0.0);
    }

    #[test]
    fn test_norm_cdf_f32() {
        assert_abs_diff_eq!(norm_cdf(0.0_f32), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_norm_pdf_peak() {
        assert_abs_diff_eq!(norm_pdf(0.0_f64), 0.398_942_28, epsilon = 1e-8);
        assert_abs_diff_eq!(norm_pdf(1.0_f64), norm_pdf(-1.0_f64), epsilon = 1e-15);
    }
}
