//! # Two independent proportions
//!
//! Power of the comparison of 2 proportions with the unpooled
//! [Wald test](https://en.wikipedia.org/wiki/Wald_test):
//!
//! > delta = |p1 - p2| / sqrt(p1 * (1 - p1) / n1 + p2 * (1 - p2) / n2)
//!

use crate::{
    errors::PowerError,
    hypothesis::{Tail, check_probability, check_sample_size, require_power, z_beta},
    solver::{SampleSizeModel, SizeInverter, SolvedSize, solve_sample_size},
};

use super::{TwoArmResult, second_arm, two_arm_minimum};

const MINIMUM_ARM: u64 = 2;

struct TwoProportions {
    alpha: f64,
    p1: f64,
    p2: f64,
    tail: Tail,
    allocation_ratio: f64,
    minimum: u64,
}

impl TwoProportions {
    fn new(alpha: f64, p1: f64, p2: f64, tail: Tail, allocation_ratio: f64) -> Result<Self, PowerError> {
        check_probability("p1", p1)?;
        check_probability("p2", p2)?;
        let minimum: u64 = two_arm_minimum(MINIMUM_ARM, allocation_ratio)?;
        return Ok(TwoProportions {
            alpha,
            p1,
            p2,
            tail,
            allocation_ratio,
            minimum,
        });
    }

    fn power(&self, n1: u64, n2: u64) -> Result<f64, PowerError> {
        let variance: f64 =
            self.p1 * (1.0 - self.p1) / n1 as f64 + self.p2 * (1.0 - self.p2) / n2 as f64;
        let delta: f64 = (self.p1 - self.p2).abs() / variance.sqrt();
        return self.tail.z_test_power(self.alpha, delta);
    }
}

impl SampleSizeModel for TwoProportions {
    fn minimum_size(&self) -> u64 {
        return self.minimum;
    }

    fn power_at(&self, n1: u64) -> Result<f64, PowerError> {
        return self.power(n1, second_arm(n1, self.allocation_ratio));
    }

    fn inverter(&self, target: f64) -> Result<SizeInverter, PowerError> {
        let z: f64 = self.tail.z_alpha(self.alpha)? + z_beta(target)?;
        let variance: f64 =
            self.p1 * (1.0 - self.p1) + self.p2 * (1.0 - self.p2) / self.allocation_ratio;
        let difference: f64 = self.p1 - self.p2;
        return Ok(SizeInverter::ClosedForm(
            z * z * variance / (difference * difference),
        ));
    }
}

/// Computes the sample sizes needed to detect the difference between the
/// proportions `p1` and `p2`.
///
/// ## Inputs
///
/// 1. `alpha`: the significance level (`0 < alpha < 1`).
/// 2. `power`: the target power (`0 < power < 1`). Required.
/// 3. `p1` and `p2`: the proportions of each group. Both in `(0, 1)` and different.
/// 4. `tail`: (optional) two sided (default) or one sided.
/// 5. `allocation_ratio`: (optional) `k = n2 / n1`. The default is `1.0`.
#[bon::builder]
pub fn a_priori_n(
    alpha: f64,
    power: Option<f64>,
    p1: f64,
    p2: f64,
    #[builder(default)] tail: Tail,
    #[builder(default = 1.0)] allocation_ratio: f64,
) -> Result<TwoArmResult, PowerError> {
    let target: f64 = require_power(power)?;
    let model: TwoProportions = TwoProportions::new(alpha, p1, p2, tail, allocation_ratio)?;
    if p1 == p2 {
        return Err(PowerError::OutOfRange {
            name: "p2 - p1",
            value: 0.0,
        });
    }

    let solved: SolvedSize = solve_sample_size(&model, target)?;
    let n2: u64 = second_arm(solved.n, allocation_ratio);

    return Ok(TwoArmResult::new(solved.n, n2, solved.power));
}

/// Computes the power of the comparison of 2 proportions with `n1` and `n2`
/// subjects (each at least `2`).
#[bon::builder]
pub fn posthoc_power(
    alpha: f64,
    n1: u64,
    n2: u64,
    p1: f64,
    p2: f64,
    #[builder(default)] tail: Tail,
) -> Result<TwoArmResult, PowerError> {
    check_sample_size("n1", n1, MINIMUM_ARM)?;
    check_sample_size("n2", n2, MINIMUM_ARM)?;
    let model: TwoProportions = TwoProportions::new(alpha, p1, p2, tail, 1.0)?;
    let power: f64 = model.power(n1, n2)?;

    return Ok(TwoArmResult::new(n1, n2, power));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_sizes() {
        struct Round {
            p1: f64,
            p2: f64,
            allocation_ratio: f64,
            n1: u64,
            n2: u64,
        }

        let rounds = [
            Round {
                p1: 0.5,
                p2: 0.6,
                allocation_ratio: 1.0,
                n1: 385,
                n2: 385,
            },
            Round {
                p1: 0.2,
                p2: 0.4,
                allocation_ratio: 1.0,
                n1: 79,
                n2: 79,
            },
            Round {
                p1: 0.2,
                p2: 0.4,
                allocation_ratio: 2.0,
                n1: 55,
                n2: 110,
            },
        ];

        for round in rounds {
            let result: TwoArmResult = a_priori_n()
                .alpha(0.05)
                .power(0.8)
                .p1(round.p1)
                .p2(round.p2)
                .allocation_ratio(round.allocation_ratio)
                .call()
                .unwrap();
            assert_eq!(result.n1, round.n1, "p1 = {}, p2 = {}", round.p1, round.p2);
            assert_eq!(result.n2, round.n2);
            assert!(0.8 <= result.power);
        }
    }

    #[test]
    fn symmetric_in_the_proportions() {
        let a: TwoArmResult = posthoc_power()
            .alpha(0.05)
            .n1(100)
            .n2(100)
            .p1(0.3)
            .p2(0.45)
            .call()
            .unwrap();
        let b: TwoArmResult = posthoc_power()
            .alpha(0.05)
            .n1(100)
            .n2(100)
            .p1(0.45)
            .p2(0.3)
            .call()
            .unwrap();
        assert_eq!(a.power, b.power);
    }

    #[test]
    fn invalid_inputs() {
        assert!(a_priori_n().alpha(0.05).power(0.8).p1(0.0).p2(0.5).call().is_err());
        assert!(a_priori_n().alpha(0.05).power(0.8).p1(0.5).p2(0.5).call().is_err());
        assert!(posthoc_power().alpha(0.05).n1(1).n2(5).p1(0.2).p2(0.5).call().is_err());
    }
}
