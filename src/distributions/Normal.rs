//! # Normal distribution
//!
//! The [Normal distribution](https://en.wikipedia.org/wiki/Normal_distribution)
//! ia a very important continuous probability distribution.
//!
//! All the z-tests of the library assume that the test statistic is
//! (approximately) normal: a [StdNormal] under the null hypothesys and a
//! [Normal] with mean `delta` (the noncentrality) and standard deviation `1.0`
//! under the alternative.
//!
//! We implement the [Normal] distribution and the [StdNormal], wich is the same as [Normal]
//! but for fixed `mean = 0.0` and `std_dev = 1.0`.
//!

use crate::{
    distribution_trait::Distribution,
    domain::ContinuousDomain,
    errors::PowerError,
    euclid,
};

pub const NORMAL_DOMAIN: ContinuousDomain = ContinuousDomain::Reals;

/// A standard normal distribution (`mean = 0.0`, `std_dev = 1.0`).
pub const STD_NORMAL: StdNormal = StdNormal::new();

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StdNormal {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    /// The mean of the distribution
    mean: f64,
    /// The standard deviation of the distribution
    standard_deviation: f64,
}

impl StdNormal {
    /// Create a Standard normal distribution. Has a mean of `0.0` and a standard
    /// deviation of `1.0`.
    #[must_use]
    pub const fn new() -> StdNormal {
        return StdNormal {};
    }

    /// Evaluates the pdf at `x`.
    #[must_use]
    pub fn pdf(&self, x: f64) -> f64 {
        return euclid::normal_pdf(x);
    }
}

impl Distribution for StdNormal {
    fn cdf(&self, x: f64) -> f64 {
        return euclid::normal_cdf(x);
    }

    fn get_domain(&self) -> &ContinuousDomain {
        return &NORMAL_DOMAIN;
    }

    /// Uses Acklam's approximation ([euclid::inv_norm]). Unlike the deafult
    /// implementation, `p = 0.0` and `p = 1.0` are valid and give `-inf`
    /// and `+inf`.
    fn quantile(&self, p: f64) -> Result<f64, PowerError> {
        return euclid::inv_norm(p);
    }
}

impl Normal {
    /// Create a [Normal] distribution.
    ///
    ///  - The `mean` must be finite (No `+-inf` or NaNs)
    ///  - The `standard_deviation` must be finite (No `+-inf` or NaNs)
    ///  - The `standard_deviation` must be stricly greater than `0.0`.
    ///
    /// If those conditions are not fullfiled, an error will be returned.
    pub fn new(mean: f64, standard_deviation: f64) -> Result<Normal, PowerError> {
        if mean.is_nan() || standard_deviation.is_nan() {
            return Err(PowerError::NanErr);
        }
        if !mean.is_finite() {
            return Err(PowerError::OutOfRange {
                name: "mean",
                value: mean,
            });
        }
        if !standard_deviation.is_finite() || standard_deviation <= 0.0 {
            return Err(PowerError::NonPositive {
                name: "standard_deviation",
                value: standard_deviation,
            });
        }

        return Ok(Normal {
            mean,
            standard_deviation,
        });
    }

    /// The distribution of a z statistic with noncentrality `delta`: a normal
    /// with mean `delta` and standard deviation `1.0`.
    pub fn shifted(delta: f64) -> Result<Normal, PowerError> {
        return Normal::new(delta, 1.0);
    }

    #[must_use]
    pub const fn get_mean(&self) -> f64 {
        return self.mean;
    }

    #[must_use]
    pub const fn get_standard_deviation(&self) -> f64 {
        return self.standard_deviation;
    }

    /// Evaluates the pdf at `x`.
    #[must_use]
    pub fn pdf(&self, x: f64) -> f64 {
        let z: f64 = (x - self.mean) / self.standard_deviation;
        return euclid::normal_pdf(z) / self.standard_deviation;
    }
}

impl Distribution for Normal {
    fn cdf(&self, x: f64) -> f64 {
        return euclid::normal_cdf((x - self.mean) / self.standard_deviation);
    }

    fn get_domain(&self) -> &ContinuousDomain {
        return &NORMAL_DOMAIN;
    }

    fn quantile(&self, p: f64) -> Result<f64, PowerError> {
        let z: f64 = euclid::inv_norm(p)?;
        return Ok(self.mean + z * self.standard_deviation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn std_normal() {
        assert_approx_eq!(STD_NORMAL.cdf(0.0), 0.5, 1e-9);
        assert_approx_eq!(STD_NORMAL.sf(1.644854), 0.05, 1e-6);
        assert_approx_eq!(STD_NORMAL.quantile(0.975).unwrap(), 1.959964, 1e-5);
        assert_eq!(STD_NORMAL.quantile(0.0).unwrap(), f64::NEG_INFINITY);
        assert!(STD_NORMAL.quantile(2.0).is_err());
    }

    #[test]
    fn normal() {
        let normal: Normal = Normal::new(3.0, 2.0).unwrap();
        assert_approx_eq!(normal.cdf(3.0), 0.5, 1e-9);
        assert_approx_eq!(normal.cdf(3.0 + 2.0 * 1.959964), 0.975, 1e-6);
        assert_approx_eq!(normal.quantile(0.025).unwrap(), 3.0 - 2.0 * 1.959964, 1e-4);
        assert_approx_eq!(normal.pdf(3.0), 0.3989422804 / 2.0, 1e-9);
    }

    #[test]
    fn invalid_parameters() {
        assert!(Normal::new(0.0, 0.0).is_err());
        assert!(Normal::new(0.0, -1.0).is_err());
        assert!(Normal::new(f64::NAN, 1.0).is_err());
        assert!(Normal::new(f64::INFINITY, 1.0).is_err());
    }
}
