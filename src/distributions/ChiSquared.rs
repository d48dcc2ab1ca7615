//! # Chi-Squared distribution
//!
//! The [Chi Squared distribution](https://en.wikipedia.org/wiki/Chi-squared_distribution)
//! is a continuous distribution. It has 1 parameter: the degrees fo freedom (`k`). It
//! represents the distribution of the sum of k iid standard normal random variables.
//!
//! The Chi Squared distribution is a special case of the Gamma distribution:
//!
//!  > ChiSquared(k) ~ Gamma(a = k/2, theta = 2)
//!
//! so it's cdf is the regularized lower incomplete gamma function.
//!
//! If the normal variables do not have mean `0.0`, the sum of their squares has a
//! [noncentral chi squared distribution](https://en.wikipedia.org/wiki/Noncentral_chi-squared_distribution)
//! ([NoncentralChiSquared]), with noncentrality `lambda` equal to the sum of
//! the squared means. It is the distribution of the chi squared test statistic
//! under the alternative hypothesys.
//!

use crate::{
    configuration::noncentral::{CHI_SQUARED_MAX_TERMS, CHI_SQUARED_WEIGHT_EPSILON},
    distribution_trait::Distribution,
    domain::ContinuousDomain,
    errors::PowerError,
    euclid,
};

use super::Poisson::Poisson;

pub const CHI_SQUARED_DOMAIN: ContinuousDomain = ContinuousDomain::From(0.0);

#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquared {
    degrees_of_freedom: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoncentralChiSquared {
    degrees_of_freedom: f64,
    /// `None` if `lambda = 0.0` (the central case).
    mixing: Option<Poisson>,
    lambda: f64,
}

/// Checks that the degrees of freedom are finite and positive.
fn check_degrees_of_freedom(name: &'static str, value: f64) -> Result<(), PowerError> {
    if value.is_nan() {
        return Err(PowerError::NanErr);
    }
    if !value.is_finite() || value <= 0.0 {
        return Err(PowerError::NonPositive { name, value });
    }
    return Ok(());
}

/// Checks that the noncentrality is finite and non-negative.
pub(crate) fn check_noncentrality(lambda: f64) -> Result<(), PowerError> {
    if lambda.is_nan() {
        return Err(PowerError::NanErr);
    }
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(PowerError::OutOfRange {
            name: "lambda",
            value: lambda,
        });
    }
    return Ok(());
}

impl ChiSquared {
    /// Creates a new [ChiSquared] distribution with parameter
    /// `k` = `degrees_of_freedom`.
    ///
    /// It will return error if `degrees_of_freedom` is not strictly positive
    /// and finite.
    pub fn new(degrees_of_freedom: f64) -> Result<ChiSquared, PowerError> {
        check_degrees_of_freedom("degrees_of_freedom", degrees_of_freedom)?;
        return Ok(ChiSquared { degrees_of_freedom });
    }

    /// Get the parameter degrees of freedom
    #[must_use]
    pub const fn get_degrees_of_freedom(&self) -> f64 {
        return self.degrees_of_freedom;
    }
}

impl Distribution for ChiSquared {
    fn cdf(&self, x: f64) -> f64 {
        return euclid::reg_incomplete_gamma_unchecked(0.5 * self.degrees_of_freedom, 0.5 * x);
    }

    fn get_domain(&self) -> &ContinuousDomain {
        return &CHI_SQUARED_DOMAIN;
    }

    fn quantile_search_start(&self) -> f64 {
        // the critical values of interest are a bit above the mean (`k`)
        return self.degrees_of_freedom + 50.0;
    }
}

impl NoncentralChiSquared {
    /// Creates a new [NoncentralChiSquared] distribution with `degrees_of_freedom`
    /// and noncentrality `lambda`.
    ///
    /// It will return error if `degrees_of_freedom` is not strictly positive
    /// or `lambda` is negative (or if any is not finite).
    pub fn new(degrees_of_freedom: f64, lambda: f64) -> Result<NoncentralChiSquared, PowerError> {
        check_degrees_of_freedom("degrees_of_freedom", degrees_of_freedom)?;
        check_noncentrality(lambda)?;

        let mixing: Option<Poisson> = if lambda == 0.0 {
            None
        } else {
            Some(Poisson::new(0.5 * lambda)?)
        };

        return Ok(NoncentralChiSquared {
            degrees_of_freedom,
            mixing,
            lambda,
        });
    }

    #[must_use]
    pub const fn get_degrees_of_freedom(&self) -> f64 {
        return self.degrees_of_freedom;
    }

    #[must_use]
    pub const fn get_lambda(&self) -> f64 {
        return self.lambda;
    }
}

impl Distribution for NoncentralChiSquared {
    /// Poisson mixture of central chi squared cdfs:
    ///
    /// > cdf(x | k, lambda) = sum_i Poisson(i | lambda/2) * cdf_chi_squared(x | k + 2i)
    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }

        let k: f64 = self.degrees_of_freedom;
        return match &self.mixing {
            None => euclid::reg_incomplete_gamma_unchecked(0.5 * k, 0.5 * x),
            Some(poisson) => poisson.mixture(
                CHI_SQUARED_WEIGHT_EPSILON,
                CHI_SQUARED_MAX_TERMS,
                |i: usize| euclid::reg_incomplete_gamma_unchecked(0.5 * k + i as f64, 0.5 * x),
            ),
        };
    }

    fn get_domain(&self) -> &ContinuousDomain {
        return &CHI_SQUARED_DOMAIN;
    }

    fn quantile_search_start(&self) -> f64 {
        return self.degrees_of_freedom + self.lambda + 50.0;
    }
}

/// The cdf of a chi squared distribution with `k` degrees of freedom at `x`.
///
/// Returns `0.0` for `x <= 0` and an error if `k` is not strictly positive.
pub fn chi2_cdf(x: f64, k: f64) -> Result<f64, PowerError> {
    if x.is_nan() {
        return Err(PowerError::NanErr);
    }
    return Ok(ChiSquared::new(k)?.cdf(x));
}

/// The cdf of a noncentral chi squared distribution with `k` degrees of freedom
/// and noncentrality `lambda` at `x`.
pub fn ncx2_cdf(x: f64, k: f64, lambda: f64) -> Result<f64, PowerError> {
    if x.is_nan() {
        return Err(PowerError::NanErr);
    }
    return Ok(NoncentralChiSquared::new(k, lambda)?.cdf(x));
}

/// The critical value of a chi squared test with `df` degrees of freedom and
/// significance level `alpha`: the `1 - alpha` quantile.
pub fn crit_chi(alpha: f64, df: f64) -> Result<f64, PowerError> {
    if alpha.is_nan() || !(0.0 < alpha && alpha < 1.0) {
        return Err(PowerError::InvalidSignificance(alpha));
    }
    return ChiSquared::new(df)?.quantile(1.0 - alpha);
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn cdf_two_degrees_of_freedom() {
        // k = 2 is an exponential with rate 1/2
        for x in [0.1, 1.0, 2.5, 7.0, 20.0] {
            assert_approx_eq!(chi2_cdf(x, 2.0).unwrap(), 1.0 - (-0.5 * x as f64).exp(), 1e-10);
        }
        assert_eq!(chi2_cdf(0.0, 3.0).unwrap(), 0.0);
        assert_eq!(chi2_cdf(-1.0, 3.0).unwrap(), 0.0);
    }

    #[test]
    fn critical_values() {
        struct Round {
            alpha: f64,
            df: f64,
            critical: f64,
        }

        let rounds = [
            Round {
                alpha: 0.05,
                df: 1.0,
                critical: 3.841459,
            },
            Round {
                alpha: 0.05,
                df: 2.0,
                critical: 5.991465,
            },
            Round {
                alpha: 0.05,
                df: 4.0,
                critical: 9.487729,
            },
            Round {
                alpha: 0.01,
                df: 3.0,
                critical: 11.344867,
            },
        ];

        for round in rounds {
            assert_approx_eq!(crit_chi(round.alpha, round.df).unwrap(), round.critical, 1e-4);
        }
    }

    #[test]
    fn noncentral_matches_two_sided_z_test() {
        // a 1 df chi squared test is a two sided z-test: with delta = z_{0.975} + z_{0.8}
        // the power is (almost exactly) 0.8
        let delta: f64 = 1.959964 + 0.841621;
        let power: f64 = 1.0 - ncx2_cdf(3.841459, 1.0, delta * delta).unwrap();
        assert_approx_eq!(power, 0.8, 1e-4);
    }

    #[test]
    fn noncentral_reduces_to_central() {
        for x in [0.5, 3.0, 9.0] {
            assert_approx_eq!(
                ncx2_cdf(x, 3.0, 0.0).unwrap(),
                chi2_cdf(x, 3.0).unwrap(),
                1e-12
            );
        }
    }

    #[test]
    fn noncentral_decreases_with_lambda() {
        let mut last: f64 = 1.0;
        for lambda in [0.0, 1.0, 5.0, 20.0, 80.0, 200.0] {
            let value: f64 = ncx2_cdf(10.0, 4.0, lambda).unwrap();
            assert!(value < last);
            last = value;
        }
    }

    #[test]
    fn invalid_parameters() {
        assert!(ChiSquared::new(0.0).is_err());
        assert!(NoncentralChiSquared::new(2.0, -1.0).is_err());
        assert!(crit_chi(1.5, 2.0).is_err());
        assert!(chi2_cdf(f64::NAN, 2.0).is_err());
    }
}
