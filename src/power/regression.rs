//! # Multiple linear regression
//!
//! Power of the global F-test of a
//! [multiple linear regression](https://en.wikipedia.org/wiki/Linear_regression)
//! (`H0: R^2 = 0`) with `p` predictors and `N` observations.
//!
//! The effect size is [Cohen's f^2](crate::effect_size::f2_from_r2). Under the
//! alternative the statistic has a noncentral F distribution with:
//!
//!  - `df1 = p`
//!  - `df2 = N - p - 1`
//!  - `lambda = f^2 * (N - p - 1)`
//!

use crate::{
    errors::PowerError,
    hypothesis::{check_positive, check_sample_size, check_significance, require_power},
    solver::{SampleSizeModel, SolvedSize, solve_sample_size},
};

use super::{FTestResult, check_groups, f_test_power};

const MINIMUM_PREDICTORS: u64 = 1;

struct GlobalRegression {
    alpha: f64,
    predictors: u64,
    f2: f64,
}

impl GlobalRegression {
    fn new(alpha: f64, predictors: u64, f2: f64) -> Result<Self, PowerError> {
        check_significance(alpha)?;
        check_groups("predictors", predictors, MINIMUM_PREDICTORS)?;
        check_positive("f2", f2)?;
        return Ok(GlobalRegression {
            alpha,
            predictors,
            f2,
        });
    }

    fn error_df(&self, n: u64) -> u64 {
        return n - self.predictors - 1;
    }

    fn result(&self, n: u64, power: f64) -> FTestResult {
        return FTestResult {
            n,
            df1: self.predictors,
            df2: self.error_df(n),
            power,
        };
    }
}

impl SampleSizeModel for GlobalRegression {
    fn minimum_size(&self) -> u64 {
        return self.predictors + 2;
    }

    fn power_at(&self, n: u64) -> Result<f64, PowerError> {
        let df2: u64 = self.error_df(n);
        let lambda: f64 = self.f2 * df2 as f64;
        return f_test_power(self.alpha, self.predictors, df2, lambda);
    }
}

/// Computes the number of observations needed to detect the effect `f2` with
/// `predictors` predictors.
///
/// ## Inputs
///
/// 1. `alpha`: the significance level (`0 < alpha < 1`).
/// 2. `power`: the target power (`0 < power < 1`). Required.
/// 3. `predictors`: the number of predictors `p` (at least `1`).
/// 4. `f2`: Cohen's f^2. Must be strictly positive.
#[bon::builder]
pub fn a_priori_n(
    alpha: f64,
    power: Option<f64>,
    predictors: u64,
    f2: f64,
) -> Result<FTestResult, PowerError> {
    let target: f64 = require_power(power)?;
    let model: GlobalRegression = GlobalRegression::new(alpha, predictors, f2)?;
    let solved: SolvedSize = solve_sample_size(&model, target)?;

    return Ok(model.result(solved.n, solved.power));
}

/// Computes the power of the global test with `n` observations (at least
/// `predictors + 2`).
#[bon::builder]
pub fn posthoc_power(
    alpha: f64,
    n: u64,
    predictors: u64,
    f2: f64,
) -> Result<FTestResult, PowerError> {
    let model: GlobalRegression = GlobalRegression::new(alpha, predictors, f2)?;
    check_sample_size("n", n, model.minimum_size())?;
    let power: f64 = model.power_at(n)?;

    return Ok(model.result(n, power));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_sizes() {
        struct Round {
            predictors: u64,
            f2: f64,
            n: u64,
        }

        let rounds = [
            Round {
                predictors: 3,
                f2: 0.15,
                n: 81,
            },
            Round {
                predictors: 5,
                f2: 0.15,
                n: 97,
            },
            Round {
                predictors: 2,
                f2: 0.35,
                n: 34,
            },
        ];

        for round in rounds {
            let result: FTestResult = a_priori_n()
                .alpha(0.05)
                .power(0.8)
                .predictors(round.predictors)
                .f2(round.f2)
                .call()
                .unwrap();
            assert_eq!(result.n, round.n, "p = {}, f2 = {}", round.predictors, round.f2);
            assert_eq!(result.df1, round.predictors);
            assert_eq!(result.df2, round.n - round.predictors - 1);
            assert!(0.8 <= result.power);
        }
    }

    #[test]
    fn posthoc_degrees_of_freedom() {
        let result: FTestResult = posthoc_power()
            .alpha(0.05)
            .n(100)
            .predictors(3)
            .f2(0.15)
            .call()
            .unwrap();
        assert_eq!((result.df1, result.df2), (3, 96));
        assert!(0.85 < result.power && result.power < 0.93);
    }

    #[test]
    fn invalid_inputs() {
        assert!(posthoc_power().alpha(0.05).n(4).predictors(3).f2(0.15).call().is_err());
        assert!(posthoc_power().alpha(0.05).n(40).predictors(0).f2(0.15).call().is_err());
        assert!(a_priori_n().alpha(0.05).power(0.8).predictors(3).f2(-0.1).call().is_err());
    }
}
