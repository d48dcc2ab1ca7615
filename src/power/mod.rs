//! # Power and sample size calculators
//!
//! One module per family of tests. Each module has 2 functions, built with
//! [bon](https://docs.rs/bon/latest/bon/) so the parameters are named:
//!
//!  - `a_priori_n`: the smallest sample size reaching the target `power`.
//!  - `posthoc_power`: the power achieved with the given sample sizes.
//!
//! ```
//! use PowerAnalysis::power::two_means;
//!
//! let design = two_means::a_priori_n().alpha(0.05).power(0.8).d(0.5).call().unwrap();
//! assert_eq!(design.n1, design.n2);
//! assert!(0.8 <= design.power);
//! ```
//!
//! All the sizes are rounded up and the reported power is recomputed at the
//! rounded sizes, so it is never below the target.
//!
//! The [cluster] module is the exception: it does not compute power, it
//! inflates a sample size computed by any of the other modules.
//!

pub mod anova;
pub mod chi_squared;
pub mod cluster;
pub mod correlation;
pub mod equivalence;
pub mod logrank;
pub mod one_proportion;
pub mod paired_means;
pub mod poisson;
pub mod regression;
pub mod two_means;
pub mod two_proportions;

use crate::{
    configuration::root_finding::MAX_SAMPLE_SIZE,
    distribution_trait::Distribution,
    distributions::{
        ChiSquared::{NoncentralChiSquared, crit_chi},
        F::{NoncentralF, inv_f_critical},
    },
    errors::PowerError,
    hypothesis::{check_positive, check_significance},
};

/// Result of a test comparing 2 independent groups (arms).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoArmResult {
    /// Size of the first group.
    pub n1: u64,
    /// Size of the second group.
    pub n2: u64,
    /// `n1 + n2`
    pub total: u64,
    pub power: f64,
}

/// Result of a test with a single sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OneSampleResult {
    pub n: u64,
    pub power: f64,
}

/// Result of an F-test ([anova] and [regression]).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FTestResult {
    /// Total sample size.
    pub n: u64,
    /// Degrees of freedom of the numerator.
    pub df1: u64,
    /// Degrees of freedom of the denominator.
    pub df2: u64,
    pub power: f64,
}

/// Result of a [chi_squared] test.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChiSquaredResult {
    /// Total sample size.
    pub n: u64,
    /// Degrees of freedom of the test.
    pub df: u64,
    pub power: f64,
}

impl TwoArmResult {
    fn new(n1: u64, n2: u64, power: f64) -> TwoArmResult {
        return TwoArmResult {
            n1,
            n2,
            total: n1 + n2,
            power,
        };
    }
}

/// Checks the allocation ratio `k = n2 / n1`.
fn check_allocation_ratio(allocation_ratio: f64) -> Result<(), PowerError> {
    return check_positive("allocation_ratio", allocation_ratio);
}

/// Size of the second arm: `ceil(k * n1)`.
///
/// A tiny tolerance is removed before rounding up so that products like
/// `1.1 * 10.0 = 11.000000000000002` give `11`.
fn second_arm(n1: u64, allocation_ratio: f64) -> u64 {
    let n2: f64 = (allocation_ratio * n1 as f64 - 1e-9).ceil();
    return n2.max(0.0) as u64;
}

/// Smallest `n1` such that both arms have at least `minimum` subjects.
///
/// Returns [PowerError::BracketNotFound] if that `n1` is above
/// [MAX_SAMPLE_SIZE] (an allocation ratio too close to `0`).
fn two_arm_minimum(minimum: u64, allocation_ratio: f64) -> Result<u64, PowerError> {
    check_allocation_ratio(allocation_ratio)?;

    // second_arm(n1) >= minimum  <=>  n1 > (minimum - 1) / k, up to the rounding tolerance
    let guess: f64 = ((minimum as f64 - 1.0) / allocation_ratio).floor();
    if MAX_SAMPLE_SIZE as f64 <= guess {
        return Err(PowerError::BracketNotFound);
    }

    let mut n1: u64 = (guess as u64).max(minimum);
    while second_arm(n1, allocation_ratio) < minimum {
        n1 = n1.saturating_add(1);
        if MAX_SAMPLE_SIZE < n1 {
            return Err(PowerError::BracketNotFound);
        }
    }
    return Ok(n1);
}

/// Checks a count of groups, predictors or categories.
fn check_groups(name: &'static str, value: u64, minimum: u64) -> Result<(), PowerError> {
    if value < minimum {
        return Err(PowerError::TooFewGroups {
            name,
            value,
            minimum,
        });
    }
    return Ok(());
}

/// Power of an F-test: the probability that a noncentral F with `df1`, `df2`
/// degrees of freedom and noncentrality `lambda` exceeds the `1 - alpha`
/// quantile of the central F.
fn f_test_power(alpha: f64, df1: u64, df2: u64, lambda: f64) -> Result<f64, PowerError> {
    check_significance(alpha)?;
    let (df1, df2): (f64, f64) = (df1 as f64, df2 as f64);
    let critical: f64 = inv_f_critical(1.0 - alpha, df1, df2)?;
    return Ok(NoncentralF::new(df1, df2, lambda)?.sf(critical));
}

/// Power of a chi squared test with `df` degrees of freedom and noncentrality `lambda`.
fn chi_squared_test_power(alpha: f64, df: u64, lambda: f64) -> Result<f64, PowerError> {
    let critical: f64 = crit_chi(alpha, df as f64)?;
    return Ok(NoncentralChiSquared::new(df as f64, lambda)?.sf(critical));
}
