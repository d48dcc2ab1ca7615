//! # The F distribution
//!
//! The [F distribution](https://en.wikipedia.org/wiki/F-distribution) is a
//! continuous probability distribution.
//!
//! It has 2 parameters: degrees_of_freedom_1 and degrees_of_freedom_2 (d1 and d2 reps.).
//!
//! If we have 2 IID random variables c_1 and c_2 wich have a [Chi Squared](crate::distributions::ChiSquared)
//! distribution with d1 and d2 degrees of freedom respectively, then:
//!
//! > (c_1 / d_1) / (c_2 / d2)
//!
//! Will have an F distribution. This statisitc plays a key role in the ANOVA test
//! and in the global test of a linear regression.
//!
//! If c_1 is a noncentral chi squared, the ratio has a
//! [noncentral F distribution](https://en.wikipedia.org/wiki/Noncentral_F-distribution)
//! ([NoncentralF]).
//!

use crate::{
    configuration::noncentral::{F_MAX_TERMS, F_WEIGHT_EPSILON},
    distribution_trait::Distribution,
    domain::ContinuousDomain,
    errors::PowerError,
    euclid,
};

use super::ChiSquared::check_noncentrality;
use super::Poisson::Poisson;

pub const F_DOMAIN: ContinuousDomain = ContinuousDomain::From(0.0);

#[derive(Debug, Clone, PartialEq)]
pub struct F {
    d1: f64,
    d2: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoncentralF {
    d1: f64,
    d2: f64,
    /// `None` if `lambda = 0.0` (the central case).
    mixing: Option<Poisson>,
    lambda: f64,
}

/// Validates the 2 degrees of freedom.
fn check_degrees_of_freedom(d1: f64, d2: f64) -> Result<(), PowerError> {
    if d1.is_nan() || d2.is_nan() {
        return Err(PowerError::NanErr);
    }
    if !d1.is_finite() || d1 <= 0.0 {
        return Err(PowerError::NonPositive { name: "d1", value: d1 });
    }
    if !d2.is_finite() || d2 <= 0.0 {
        return Err(PowerError::NonPositive { name: "d2", value: d2 });
    }
    return Ok(());
}

/// cdf of a central F, assuming valid degrees of freedom.
fn central_cdf(x: f64, d1: f64, d2: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let t: f64 = d1 * x / (d1 * x + d2);
    return euclid::reg_incomplete_beta_unchecked(t, 0.5 * d1, 0.5 * d2);
}

impl F {
    /// Creates a new [F] distribution with parameters `d1` and `d2`.
    /// Where `d1` is the degrees of freedom of the numerator and `d2` are
    /// the degrees of freedom of the denominator.
    ///
    /// It will return error under the following conditions:
    ///  - `d1` is `+-inf` or a NaN
    ///  - `d2` is `+-inf` or a NaN
    ///  - `d1 <= 0.0`
    ///  - `d2 <= 0.0`
    pub fn new(d1: f64, d2: f64) -> Result<F, PowerError> {
        check_degrees_of_freedom(d1, d2)?;
        return Ok(F { d1, d2 });
    }

    #[must_use]
    pub const fn get_d1(&self) -> f64 {
        return self.d1;
    }

    #[must_use]
    pub const fn get_d2(&self) -> f64 {
        return self.d2;
    }
}

impl Distribution for F {
    /// > cdf(x | d1, d2) = I_t(d1/2, d2/2) with t = d1 * x / (d1 * x + d2)
    fn cdf(&self, x: f64) -> f64 {
        return central_cdf(x, self.d1, self.d2);
    }

    fn get_domain(&self) -> &ContinuousDomain {
        return &F_DOMAIN;
    }
}

impl NoncentralF {
    /// Creates a new [NoncentralF] distribution with degrees of freedom `d1`
    /// and `d2` and noncentrality `lambda`.
    ///
    /// It will return error if any degree of freedom is not strictly positive
    /// or `lambda` is negative (or if any is not finite).
    pub fn new(d1: f64, d2: f64, lambda: f64) -> Result<NoncentralF, PowerError> {
        check_degrees_of_freedom(d1, d2)?;
        check_noncentrality(lambda)?;

        let mixing: Option<Poisson> = if lambda == 0.0 {
            None
        } else {
            Some(Poisson::new(0.5 * lambda)?)
        };

        return Ok(NoncentralF {
            d1,
            d2,
            mixing,
            lambda,
        });
    }

    #[must_use]
    pub const fn get_d1(&self) -> f64 {
        return self.d1;
    }

    #[must_use]
    pub const fn get_d2(&self) -> f64 {
        return self.d2;
    }

    #[must_use]
    pub const fn get_lambda(&self) -> f64 {
        return self.lambda;
    }
}

impl Distribution for NoncentralF {
    /// Poisson mixture of central F cdfs. The numerator of the i-th term has
    /// `d1 + 2i` degrees of freedom but is still divided by `d1`, so every term
    /// is evaluated at the same point of the beta function:
    ///
    /// > cdf(x | d1, d2, lambda) = sum_i Poisson(i | lambda/2) * I_t(d1/2 + i, d2/2)
    ///
    /// with `t = d1 * x / (d1 * x + d2)`.
    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }

        let (d1, d2): (f64, f64) = (self.d1, self.d2);
        return match &self.mixing {
            None => central_cdf(x, d1, d2),
            Some(poisson) => {
                let t: f64 = d1 * x / (d1 * x + d2);
                poisson.mixture(F_WEIGHT_EPSILON, F_MAX_TERMS, |i: usize| {
                    euclid::reg_incomplete_beta_unchecked(t, 0.5 * d1 + i as f64, 0.5 * d2)
                })
            }
        };
    }

    fn get_domain(&self) -> &ContinuousDomain {
        return &F_DOMAIN;
    }
}

/// The cdf of an F distribution with `df1` and `df2` degrees of freedom at `x`.
pub fn f_cdf(x: f64, df1: f64, df2: f64) -> Result<f64, PowerError> {
    if x.is_nan() {
        return Err(PowerError::NanErr);
    }
    return Ok(F::new(df1, df2)?.cdf(x));
}

/// The cdf of a noncentral F distribution with `df1` and `df2` degrees of
/// freedom and noncentrality `lambda` at `x`.
pub fn ncf_cdf(x: f64, df1: f64, df2: f64, lambda: f64) -> Result<f64, PowerError> {
    if x.is_nan() {
        return Err(PowerError::NanErr);
    }
    return Ok(NoncentralF::new(df1, df2, lambda)?.cdf(x));
}

/// Inverts the cdf of a central F distribution: returns `x` such that
/// `cdf(x | df1, df2) = p`.
///
/// With `p = 1 - alpha` it gives the critical value of an F-test.
pub fn inv_f_critical(p: f64, df1: f64, df2: f64) -> Result<f64, PowerError> {
    return F::new(df1, df2)?.quantile(p);
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn cdf_two_numerator_degrees_of_freedom() {
        // for d1 = 2: cdf(x) = 1 - (1 + 2x/d2)^(-d2/2)
        let d2: f64 = 12.0;
        for x in [0.2, 1.0, 3.0, 8.0] {
            let expected: f64 = 1.0 - (1.0 + 2.0 * x / d2).powf(-0.5 * d2);
            assert_approx_eq!(f_cdf(x, 2.0, d2).unwrap(), expected, 1e-10);
        }
        assert_eq!(f_cdf(0.0, 2.0, d2).unwrap(), 0.0);
    }

    #[test]
    fn critical_values() {
        struct Round {
            df1: f64,
            df2: f64,
            critical: f64,
        }

        let rounds = [
            Round {
                df1: 1.0,
                df2: 10.0,
                critical: 4.964603,
            },
            Round {
                df1: 2.0,
                df2: 12.0,
                critical: 3.885294,
            },
            Round {
                df1: 4.0,
                df2: 30.0,
                critical: 2.689628,
            },
        ];

        for round in rounds {
            let critical: f64 = inv_f_critical(0.95, round.df1, round.df2).unwrap();
            assert_approx_eq!(critical, round.critical, 1e-4);
        }
    }

    #[test]
    fn noncentral_reduces_to_central() {
        for x in [0.5, 2.0, 6.0] {
            assert_approx_eq!(
                ncf_cdf(x, 3.0, 20.0, 0.0).unwrap(),
                f_cdf(x, 3.0, 20.0).unwrap(),
                1e-12
            );
        }
    }

    #[test]
    fn noncentral_decreases_with_lambda() {
        let mut last: f64 = 1.0;
        for lambda in [0.0, 0.5, 4.0, 15.0, 60.0] {
            let value: f64 = ncf_cdf(3.0, 2.0, 40.0, lambda).unwrap();
            assert!(value < last);
            last = value;
        }
    }

    #[test]
    fn noncentral_matches_noncentral_chi_squared() {
        // with d2 -> inf, d1 * F tends to a noncentral chi squared with d1 df
        let (d1, lambda): (f64, f64) = (3.0, 6.0);
        let x: f64 = 2.5;
        let chi: f64 = crate::distributions::ChiSquared::ncx2_cdf(d1 * x, d1, lambda).unwrap();
        assert_approx_eq!(ncf_cdf(x, d1, 1e7, lambda).unwrap(), chi, 1e-4);
    }

    #[test]
    fn invalid_parameters() {
        assert!(F::new(0.0, 3.0).is_err());
        assert!(F::new(2.0, -3.0).is_err());
        assert!(NoncentralF::new(2.0, 3.0, -0.1).is_err());
        assert!(inv_f_critical(1.0, 2.0, 3.0).is_err());
    }
}
