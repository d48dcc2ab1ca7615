//! # Effect sizes
//!
//! Conversions between the most common standardized
//! [effect sizes](https://en.wikipedia.org/wiki/Effect_size).
//!
//!  - Cohen's `d`: difference of means in units of the pooled standard deviation.
//!  - `r`: (point-biserial) correlation coefficient.
//!  - Cohen's `f`: effect size of the ANOVA, derived from `eta^2`.
//!  - Cohen's `f^2`: effect size of a linear regression, derived from `R^2`.
//!
//! All of them return an error if the input is outside the domain of the
//! conversion, except [r_from_d], wich is defined for every real `d`.
//!

use crate::errors::PowerError;

/// Checks that `r` is a valid correlation (`-1 < r < 1`).
fn check_correlation(r: f64) -> Result<(), PowerError> {
    #[allow(clippy::nonminimal_bool)]
    if !(-1.0 < r && r < 1.0) {
        return Err(PowerError::InvalidCorrelation(r));
    }
    return Ok(());
}

/// Checks that `value` is strictly inside `(0, 1)`.
fn check_unit_interval(name: &'static str, value: f64) -> Result<(), PowerError> {
    #[allow(clippy::nonminimal_bool)]
    if !(0.0 < value && value < 1.0) {
        return Err(PowerError::OutOfRange { name, value });
    }
    return Ok(());
}

/// Cohen's `d` from the means of two groups and their pooled standard deviation.
///
/// > d = (mean1 - mean2) / sd_pooled
///
/// Returns an error if `sd_pooled <= 0.0` or any input is not finite.
pub fn d_from_means(mean1: f64, mean2: f64, sd_pooled: f64) -> Result<f64, PowerError> {
    if mean1.is_nan() || mean2.is_nan() || sd_pooled.is_nan() {
        return Err(PowerError::NanErr);
    }
    if !sd_pooled.is_finite() || sd_pooled <= 0.0 {
        return Err(PowerError::NonPositive {
            name: "sd_pooled",
            value: sd_pooled,
        });
    }
    let d: f64 = (mean1 - mean2) / sd_pooled;
    if !d.is_finite() {
        return Err(PowerError::OutOfRange { name: "d", value: d });
    }
    return Ok(d);
}

/// Cohen's `f` from `eta^2` (proportion of variance explained):
///
/// > f = sqrt(eta^2 / (1 - eta^2))
///
/// `eta2` must be in `(0, 1)`.
pub fn f_from_eta2(eta2: f64) -> Result<f64, PowerError> {
    check_unit_interval("eta2", eta2)?;
    return Ok((eta2 / (1.0 - eta2)).sqrt());
}

/// Cohen's `f` from a partial `eta^2`. For a one way ANOVA with fixed factor
/// it is the same as [f_from_eta2].
pub fn f_from_partial_eta2(partial_eta2: f64) -> Result<f64, PowerError> {
    return f_from_eta2(partial_eta2);
}

/// Cohen's `f^2` from the coefficient of determination `R^2`:
///
/// > f^2 = R^2 / (1 - R^2)
pub fn f2_from_r2(r2: f64) -> Result<f64, PowerError> {
    check_unit_interval("r2", r2)?;
    return Ok(r2 / (1.0 - r2));
}

/// Inverse of [f2_from_r2]:
///
/// > R^2 = f^2 / (1 + f^2)
pub fn r2_from_f2(f2: f64) -> Result<f64, PowerError> {
    if f2.is_nan() {
        return Err(PowerError::NanErr);
    }
    if !f2.is_finite() || f2 <= 0.0 {
        return Err(PowerError::NonPositive {
            name: "f2",
            value: f2,
        });
    }
    return Ok(f2 / (1.0 + f2));
}

/// The correlation `r` equivalent to a Cohen's `d` (equal group sizes):
///
/// > r = d / sqrt(d^2 + 4)
///
/// The result is always in `(-1, 1)`.
#[must_use]
pub fn r_from_d(d: f64) -> f64 {
    if d.is_infinite() {
        return d.signum();
    }
    return d / (d * d + 4.0).sqrt();
}

/// Inverse of [r_from_d]:
///
/// > d = 2r / sqrt(1 - r^2)
pub fn d_from_r(r: f64) -> Result<f64, PowerError> {
    check_correlation(r)?;
    return Ok(2.0 * r / (1.0 - r * r).sqrt());
}

/// The [Fisher transformation](https://en.wikipedia.org/wiki/Fisher_transformation)
/// of the correlation `r`:
///
/// > z = atanh(r) = ln((1 + r) / (1 - r)) / 2
///
/// For a sample of size `n`, `z` is approximately normal with standard
/// deviation `1 / sqrt(n - 3)`.
pub fn fisher_z(r: f64) -> Result<f64, PowerError> {
    check_correlation(r)?;
    return Ok(r.atanh());
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn cohen_d() {
        assert_approx_eq!(d_from_means(105.0, 100.0, 10.0).unwrap(), 0.5, 1e-12);
        assert_approx_eq!(d_from_means(100.0, 105.0, 10.0).unwrap(), -0.5, 1e-12);
        assert!(d_from_means(1.0, 0.0, 0.0).is_err());
        assert!(d_from_means(1.0, 0.0, -2.0).is_err());
    }

    #[test]
    fn anova_and_regression() {
        // eta^2 = 0.0588 is a "medium" effect: f ~= 0.25
        assert_approx_eq!(f_from_eta2(0.0588).unwrap(), 0.25, 1e-3);
        assert_eq!(f_from_partial_eta2(0.2).unwrap(), f_from_eta2(0.2).unwrap());
        assert_approx_eq!(f2_from_r2(0.13).unwrap(), 0.149425287, 1e-8);
        assert_approx_eq!(r2_from_f2(0.15).unwrap(), 0.130434783, 1e-8);

        assert!(f_from_eta2(0.0).is_err());
        assert!(f_from_eta2(1.0).is_err());
        assert!(f2_from_r2(1.2).is_err());
        assert!(r2_from_f2(0.0).is_err());
    }

    #[test]
    fn correlations() {
        assert_approx_eq!(r_from_d(0.5), 0.242535625, 1e-8);
        assert_approx_eq!(d_from_r(0.242535625).unwrap(), 0.5, 1e-7);
        assert_approx_eq!(fisher_z(0.3).unwrap(), 0.309519604, 1e-8);
        assert_eq!(fisher_z(0.0).unwrap(), 0.0);
        assert_eq!(r_from_d(f64::INFINITY), 1.0);

        assert_eq!(fisher_z(1.0), Err(PowerError::InvalidCorrelation(1.0)));
        assert!(d_from_r(-1.0).is_err());
        assert!(d_from_r(f64::NAN).is_err());
    }
}
