//! # Hypothesys testing
//!
//! This module contains the definition of [Tail] and the pieces shared by all
//! the z-approximation tests of [crate::power].
//!
//! ## Introduction:
//!
//! *This section is a brief introduction to statistical concepts*
//!
//! The significance level (denoted by `alpha`) is the probability of commiting
//! a Type 1 error (rejecting `H0` when it is true):
//!
//!  > alpha = P( Rejecting H0 | H0 is true )
//!
//! The [power](https://en.wikipedia.org/wiki/Power_(statistics)) (`1 - beta`) is
//! the probability of rejecting `H0` when the alternative `Ha` is true. It
//! depends on the size of the effect and on the sample size: for a fixed
//! effect, more samples means more power.
//!
//! ## z-tests
//!
//! Most of the tests in this library use a normal approximation. Under `H0` the
//! test statistic is a standard normal, and under `Ha` it is a normal with mean
//! `delta` (the noncentrality) and standard deviation `1.0`. With the critical
//! value `z_alpha`, the power is:
//!
//!  - Two sided: `cdf(-z_alpha - delta) + (1 - cdf(z_alpha - delta))`
//!     with `z_alpha = quantile(1 - alpha / 2)`
//!  - One sided: `1 - cdf(z_alpha - delta)` with `z_alpha = quantile(1 - alpha)`
//!
//! where `cdf` and `quantile` are the ones of the [std normal](crate::distributions::Normal::StdNormal).
//!
//! Inverting the one sided formula gives the classical closed form for the
//! sample size:
//!
//!  > (z_alpha + z_beta)^2 = delta^2
//!
//! with `z_beta = quantile(power)`.
//!

use crate::{
    distribution_trait::Distribution,
    distributions::Normal::{Normal, STD_NORMAL},
    errors::PowerError,
};

/// Defines wich kind of test are we doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Tail {
    /// A [Tail::TwoSided] test rejects if the statisitc is *significantly*
    /// different (far away) of what `H0` claims.
    ///
    /// Divides the probability evenly between both sides.
    #[default]
    TwoSided,
    /// A [Tail::OneSided] test rejects only if the statistic is *significantly*
    /// bigger than what `H0` claims (in the direction of the effect).
    OneSided,
}

impl Tail {
    /// Returns the critical value of the z-test for the significance level `alpha`.
    ///
    ///  - Two sided: `quantile(1 - alpha / 2)`
    ///  - One sided: `quantile(1 - alpha)`
    pub fn z_alpha(self, alpha: f64) -> Result<f64, PowerError> {
        check_significance(alpha)?;
        let level: f64 = match self {
            Tail::TwoSided => 1.0 - 0.5 * alpha,
            Tail::OneSided => 1.0 - alpha,
        };
        return STD_NORMAL.quantile(level);
    }

    /// The probability of rejecting `H0` with the critical value `z_alpha`
    /// when the statistic has noncentrality `delta`.
    pub fn rejection_power(self, z_alpha: f64, delta: f64) -> Result<f64, PowerError> {
        let alternative: Normal = Normal::shifted(delta)?;
        let power: f64 = match self {
            Tail::TwoSided => alternative.cdf(-z_alpha) + alternative.sf(z_alpha),
            Tail::OneSided => alternative.sf(z_alpha),
        };
        return Ok(power);
    }

    /// Power of the z-test at significance `alpha` for the noncentrality `delta`.
    pub fn z_test_power(self, alpha: f64, delta: f64) -> Result<f64, PowerError> {
        let z_alpha: f64 = self.z_alpha(alpha)?;
        return self.rejection_power(z_alpha, delta);
    }
}

/// Returns `z_beta = quantile(power)` of the std normal.
pub fn z_beta(power: f64) -> Result<f64, PowerError> {
    check_power(power)?;
    return STD_NORMAL.quantile(power);
}

/// Checks that the significance level is a valid probability (`0 < alpha < 1`).
pub fn check_significance(alpha: f64) -> Result<(), PowerError> {
    #[allow(clippy::nonminimal_bool)]
    if !alpha.is_finite() || !(0.0 < alpha && alpha < 1.0) {
        return Err(PowerError::InvalidSignificance(alpha));
    }
    return Ok(());
}

/// Checks that the target power is a valid probability (`0 < power < 1`).
pub fn check_power(power: f64) -> Result<(), PowerError> {
    #[allow(clippy::nonminimal_bool)]
    if !power.is_finite() || !(0.0 < power && power < 1.0) {
        return Err(PowerError::InvalidPower(power));
    }
    return Ok(());
}

/// Unwraps the target power of a sample size computation.
///
/// Returns [PowerError::MissingPower] if there is no power and
/// [PowerError::InvalidPower] if it is not in `(0, 1)`.
pub fn require_power(power: Option<f64>) -> Result<f64, PowerError> {
    let power: f64 = power.ok_or(PowerError::MissingPower)?;
    check_power(power)?;
    return Ok(power);
}

/// Checks that `value` is a probability strictly inside `(0, 1)`.
pub fn check_probability(name: &'static str, value: f64) -> Result<(), PowerError> {
    #[allow(clippy::nonminimal_bool)]
    if !value.is_finite() || !(0.0 < value && value < 1.0) {
        return Err(PowerError::InvalidProbability { name, value });
    }
    return Ok(());
}

/// Checks that `value` is finite and strictly positive.
pub fn check_positive(name: &'static str, value: f64) -> Result<(), PowerError> {
    if value.is_nan() {
        return Err(PowerError::NanErr);
    }
    if !value.is_finite() || value <= 0.0 {
        return Err(PowerError::NonPositive { name, value });
    }
    return Ok(());
}

/// Checks that `value` is finite.
pub fn check_finite(name: &'static str, value: f64) -> Result<(), PowerError> {
    if value.is_nan() {
        return Err(PowerError::NanErr);
    }
    if !value.is_finite() {
        return Err(PowerError::OutOfRange { name, value });
    }
    return Ok(());
}

/// Checks that a sample size reaches the structural minimum of the test.
pub fn check_sample_size(name: &'static str, value: u64, minimum: u64) -> Result<(), PowerError> {
    if value < minimum {
        return Err(PowerError::NotEnoughSamples {
            name,
            value,
            minimum,
        });
    }
    return Ok(());
}
