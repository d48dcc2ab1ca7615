//! # One way ANOVA
//!
//! Power of the global F-test of a fixed effects
//! [one way ANOVA](https://en.wikipedia.org/wiki/One-way_analysis_of_variance)
//! with `k` groups and `N` subjects in total.
//!
//! The effect size is [Cohen's f](crate::effect_size::f_from_eta2). Under the
//! alternative the statistic has a [noncentral F](crate::distributions::F::NoncentralF)
//! distribution with:
//!
//!  - `df1 = k - 1`
//!  - `df2 = N - k`
//!  - `lambda = f^2 * N`
//!
//! There is no closed form for `N`: the sample size is found with the bracket
//! and bisect search of [crate::solver].
//!

use crate::{
    errors::PowerError,
    hypothesis::{check_positive, check_sample_size, check_significance, require_power},
    solver::{SampleSizeModel, SolvedSize, solve_sample_size},
};

use super::{FTestResult, check_groups, f_test_power};

const MINIMUM_GROUPS: u64 = 2;

struct OneWayAnova {
    alpha: f64,
    groups: u64,
    f: f64,
}

impl OneWayAnova {
    fn new(alpha: f64, groups: u64, f: f64) -> Result<Self, PowerError> {
        check_significance(alpha)?;
        check_groups("groups", groups, MINIMUM_GROUPS)?;
        check_positive("f", f)?;
        return Ok(OneWayAnova { alpha, groups, f });
    }

    fn result(&self, n: u64, power: f64) -> FTestResult {
        return FTestResult {
            n,
            df1: self.groups - 1,
            df2: n - self.groups,
            power,
        };
    }
}

impl SampleSizeModel for OneWayAnova {
    /// At least 1 degree of freedom for the error.
    fn minimum_size(&self) -> u64 {
        return self.groups + 1;
    }

    fn power_at(&self, n: u64) -> Result<f64, PowerError> {
        let lambda: f64 = self.f * self.f * n as f64;
        return f_test_power(self.alpha, self.groups - 1, n - self.groups, lambda);
    }
}

/// Computes the total sample size needed to detect the effect `f` between
/// `groups` groups.
///
/// ## Inputs
///
/// 1. `alpha`: the significance level (`0 < alpha < 1`).
/// 2. `power`: the target power (`0 < power < 1`). Required.
/// 3. `groups`: the number of groups `k` (at least `2`).
/// 4. `f`: Cohen's f. Must be strictly positive.
///
/// ## Results
///
/// A [FTestResult] with the total sample size `N` (divide by the number of
/// groups to get the size of each group).
///
/// ```
/// use PowerAnalysis::power::anova;
///
/// let result = anova::a_priori_n().alpha(0.05).power(0.8).groups(3).f(0.25).call().unwrap();
/// assert!(158 <= result.n && result.n <= 160);
/// assert_eq!(result.df1, 2);
/// ```
#[bon::builder]
pub fn a_priori_n(
    alpha: f64,
    power: Option<f64>,
    groups: u64,
    f: f64,
) -> Result<FTestResult, PowerError> {
    let target: f64 = require_power(power)?;
    let model: OneWayAnova = OneWayAnova::new(alpha, groups, f)?;
    let solved: SolvedSize = solve_sample_size(&model, target)?;

    return Ok(model.result(solved.n, solved.power));
}

/// Computes the power of the ANOVA with `n` subjects in total (at least
/// `groups + 1`).
#[bon::builder]
pub fn posthoc_power(alpha: f64, n: u64, groups: u64, f: f64) -> Result<FTestResult, PowerError> {
    let model: OneWayAnova = OneWayAnova::new(alpha, groups, f)?;
    check_sample_size("n", n, model.minimum_size())?;
    let power: f64 = model.power_at(n)?;

    return Ok(model.result(n, power));
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn sample_sizes() {
        struct Round {
            groups: u64,
            f: f64,
            n: u64,
        }

        let rounds = [
            Round {
                groups: 3,
                f: 0.25,
                n: 158,
            },
            Round {
                groups: 4,
                f: 0.25,
                n: 179,
            },
            Round {
                groups: 3,
                f: 0.4,
                n: 64,
            },
        ];

        for round in rounds {
            let result: FTestResult = a_priori_n()
                .alpha(0.05)
                .power(0.8)
                .groups(round.groups)
                .f(round.f)
                .call()
                .unwrap();
            assert_eq!(result.n, round.n, "k = {}, f = {}", round.groups, round.f);
            assert_eq!(result.df1, round.groups - 1);
            assert_eq!(result.df2, round.n - round.groups);
            assert!(0.8 <= result.power);
        }
    }

    #[test]
    fn two_groups_match_the_z_test() {
        // with 2 groups f = d / 2 and the F-test is the square of the t-test
        let anova: FTestResult = posthoc_power()
            .alpha(0.05)
            .n(128)
            .groups(2)
            .f(0.25)
            .call()
            .unwrap();
        assert_approx_eq!(anova.power, 0.80, 0.01);
    }

    #[test]
    fn invalid_inputs() {
        assert_eq!(
            posthoc_power().alpha(0.05).n(100).groups(1).f(0.25).call(),
            Err(PowerError::TooFewGroups {
                name: "groups",
                value: 1,
                minimum: 2
            })
        );
        assert!(posthoc_power().alpha(0.05).n(3).groups(3).f(0.25).call().is_err());
        assert!(a_priori_n().alpha(0.05).power(0.8).groups(3).f(0.0).call().is_err());
    }
}
