//! # Two independent means
//!
//! Power of the comparison of the means of 2 independent groups with a common
//! standard deviation (the [two sample t-test](https://en.wikipedia.org/wiki/Student%27s_t-test#Independent_two-sample_t-test)),
//! using the normal approximation of the test statistic.
//!
//! The effect size is [Cohen's d](https://en.wikipedia.org/wiki/Effect_size#Cohen's_d)
//! (see [crate::effect_size::d_from_means]). With `n1` and `n2` subjects, the
//! statistic has noncentrality:
//!
//! > delta = |d| / sqrt(1/n1 + 1/n2)
//!
//! The second group has `n2 = ceil(k * n1)` subjects, where `k` is the
//! allocation ratio.
//!

use crate::{
    errors::PowerError,
    hypothesis::{Tail, check_finite, check_positive, check_sample_size, require_power, z_beta},
    solver::{SampleSizeModel, SizeInverter, SolvedSize, solve_sample_size},
};

use super::{TwoArmResult, second_arm, two_arm_minimum};

/// Each group needs at least 2 subjects to estimate the variance.
const MINIMUM_ARM: u64 = 2;

struct TwoMeans {
    alpha: f64,
    d: f64,
    tail: Tail,
    allocation_ratio: f64,
    /// Smallest `n1` with both arms of at least `MINIMUM_ARM`
    minimum: u64,
}

impl TwoMeans {
    fn power(&self, n1: u64, n2: u64) -> Result<f64, PowerError> {
        let standard_error: f64 = (1.0 / n1 as f64 + 1.0 / n2 as f64).sqrt();
        let delta: f64 = self.d.abs() / standard_error;
        return self.tail.z_test_power(self.alpha, delta);
    }
}

impl SampleSizeModel for TwoMeans {
    fn minimum_size(&self) -> u64 {
        return self.minimum;
    }

    fn power_at(&self, n1: u64) -> Result<f64, PowerError> {
        return self.power(n1, second_arm(n1, self.allocation_ratio));
    }

    fn inverter(&self, target: f64) -> Result<SizeInverter, PowerError> {
        let z: f64 = self.tail.z_alpha(self.alpha)? + z_beta(target)?;
        let k: f64 = self.allocation_ratio;
        return Ok(SizeInverter::ClosedForm(
            z * z * (1.0 + 1.0 / k) / (self.d * self.d),
        ));
    }
}

/// Computes the sample sizes needed to detect a difference of means `d`.
///
/// ## Inputs
///
/// 1. `alpha`: the significance level (`0 < alpha < 1`).
/// 2. `power`: the target power (`0 < power < 1`). Required.
/// 3. `d`: Cohen's d. Must be strictly positive.
/// 4. `tail`: (optional) two sided (default) or one sided.
/// 5. `allocation_ratio`: (optional) `k = n2 / n1`. The default is `1.0`.
///
/// ## Results
///
/// A [TwoArmResult] with the smallest `n1` (and `n2 = ceil(k * n1)`) reaching
/// the target power.
///
/// ```
/// use PowerAnalysis::power::two_means;
///
/// let result = two_means::a_priori_n().alpha(0.05).power(0.8).d(0.5).call().unwrap();
/// assert_eq!(result.n1, 63);
/// assert_eq!(result.total, 126);
/// ```
#[bon::builder]
pub fn a_priori_n(
    alpha: f64,
    power: Option<f64>,
    d: f64,
    #[builder(default)] tail: Tail,
    #[builder(default = 1.0)] allocation_ratio: f64,
) -> Result<TwoArmResult, PowerError> {
    let target: f64 = require_power(power)?;
    check_positive("d", d)?;
    let minimum: u64 = two_arm_minimum(MINIMUM_ARM, allocation_ratio)?;

    let model: TwoMeans = TwoMeans {
        alpha,
        d,
        tail,
        allocation_ratio,
        minimum,
    };
    let solved: SolvedSize = solve_sample_size(&model, target)?;
    let n2: u64 = second_arm(solved.n, allocation_ratio);

    return Ok(TwoArmResult::new(solved.n, n2, solved.power));
}

/// Computes the power of the comparison of 2 means with `n1` and `n2` subjects.
///
/// ## Inputs
///
/// 1. `alpha`: the significance level (`0 < alpha < 1`).
/// 2. `n1` and `n2`: the size of each group. Both must be at least `2`.
/// 3. `d`: Cohen's d. Only the magnitude is used.
/// 4. `tail`: (optional) two sided (default) or one sided.
///
/// ## Results
///
/// A [TwoArmResult] with the achieved power.
#[bon::builder]
pub fn posthoc_power(
    alpha: f64,
    n1: u64,
    n2: u64,
    d: f64,
    #[builder(default)] tail: Tail,
) -> Result<TwoArmResult, PowerError> {
    check_sample_size("n1", n1, MINIMUM_ARM)?;
    check_sample_size("n2", n2, MINIMUM_ARM)?;
    check_finite("d", d)?;

    let model: TwoMeans = TwoMeans {
        alpha,
        d,
        tail,
        allocation_ratio: 1.0,
        minimum: MINIMUM_ARM,
    };
    let power: f64 = model.power(n1, n2)?;

    return Ok(TwoArmResult::new(n1, n2, power));
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn classical_sample_sizes() {
        struct Round {
            d: f64,
            tail: Tail,
            allocation_ratio: f64,
            n1: u64,
            n2: u64,
        }

        let rounds = [
            Round {
                d: 0.5,
                tail: Tail::TwoSided,
                allocation_ratio: 1.0,
                n1: 63,
                n2: 63,
            },
            Round {
                d: 0.8,
                tail: Tail::TwoSided,
                allocation_ratio: 1.0,
                n1: 25,
                n2: 25,
            },
            Round {
                d: 0.5,
                tail: Tail::OneSided,
                allocation_ratio: 1.0,
                n1: 50,
                n2: 50,
            },
            Round {
                d: 0.5,
                tail: Tail::TwoSided,
                allocation_ratio: 2.0,
                n1: 48,
                n2: 96,
            },
        ];

        for round in rounds {
            let result: TwoArmResult = a_priori_n()
                .alpha(0.05)
                .power(0.8)
                .d(round.d)
                .tail(round.tail)
                .allocation_ratio(round.allocation_ratio)
                .call()
                .unwrap();
            assert_eq!(result.n1, round.n1, "d = {}", round.d);
            assert_eq!(result.n2, round.n2, "d = {}", round.d);
            assert_eq!(result.total, round.n1 + round.n2);
            assert!(0.8 <= result.power);
        }
    }

    #[test]
    fn result_is_minimal() {
        let result: TwoArmResult = a_priori_n().alpha(0.05).power(0.9).d(0.3).call().unwrap();
        let smaller: TwoArmResult = posthoc_power()
            .alpha(0.05)
            .n1(result.n1 - 1)
            .n2(result.n2 - 1)
            .d(0.3)
            .call()
            .unwrap();
        assert!(smaller.power < 0.9);
    }

    #[test]
    fn posthoc() {
        let result: TwoArmResult = posthoc_power()
            .alpha(0.05)
            .n1(64)
            .n2(64)
            .d(0.5)
            .call()
            .unwrap();
        // delta = 0.5 * sqrt(32) = 2.828427
        assert_approx_eq!(result.power, 0.8074, 1e-3);
        assert_eq!(result.total, 128);

        let negative: TwoArmResult = posthoc_power()
            .alpha(0.05)
            .n1(64)
            .n2(64)
            .d(-0.5)
            .call()
            .unwrap();
        assert_eq!(negative.power, result.power);
    }

    #[test]
    fn invalid_inputs() {
        assert_eq!(
            a_priori_n().alpha(0.05).d(0.5).call(),
            Err(PowerError::MissingPower)
        );
        assert!(a_priori_n().alpha(0.05).power(0.8).d(0.0).call().is_err());
        assert!(
            a_priori_n()
                .alpha(0.05)
                .power(0.8)
                .d(0.5)
                .allocation_ratio(0.0)
                .call()
                .is_err()
        );
        assert!(a_priori_n().alpha(1.5).power(0.8).d(0.5).call().is_err());
        assert!(posthoc_power().alpha(0.05).n1(1).n2(10).d(0.5).call().is_err());
        assert!(posthoc_power().alpha(0.05).n1(10).n2(0).d(0.5).call().is_err());
    }
}
