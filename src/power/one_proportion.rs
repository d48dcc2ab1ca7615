//! # One proportion
//!
//! Power of the test of a single proportion `p` against the null value `p0`,
//! with the normal approximation (no continuity correction) and the standard
//! error computed under the alternative:
//!
//! > delta = |p - p0| / sqrt(p * (1 - p) / n)
//!

use crate::{
    errors::PowerError,
    hypothesis::{Tail, check_probability, check_sample_size, require_power, z_beta},
    solver::{SampleSizeModel, SizeInverter, SolvedSize, solve_sample_size},
};

use super::OneSampleResult;

const MINIMUM_SAMPLE: u64 = 2;

struct OneProportion {
    alpha: f64,
    p: f64,
    p0: f64,
    tail: Tail,
}

impl OneProportion {
    fn new(alpha: f64, p: f64, p0: f64, tail: Tail) -> Result<Self, PowerError> {
        check_probability("p", p)?;
        check_probability("p0", p0)?;
        return Ok(OneProportion { alpha, p, p0, tail });
    }
}

impl SampleSizeModel for OneProportion {
    fn minimum_size(&self) -> u64 {
        return MINIMUM_SAMPLE;
    }

    fn power_at(&self, n: u64) -> Result<f64, PowerError> {
        let standard_error: f64 = (self.p * (1.0 - self.p) / n as f64).sqrt();
        let delta: f64 = (self.p - self.p0).abs() / standard_error;
        return self.tail.z_test_power(self.alpha, delta);
    }

    fn inverter(&self, target: f64) -> Result<SizeInverter, PowerError> {
        let z: f64 = self.tail.z_alpha(self.alpha)? + z_beta(target)?;
        let difference: f64 = self.p - self.p0;
        return Ok(SizeInverter::ClosedForm(
            z * z * self.p * (1.0 - self.p) / (difference * difference),
        ));
    }
}

/// Computes the sample size needed to distinguish the proportion `p` from
/// the null proportion `p0`.
///
/// ## Inputs
///
/// 1. `alpha`: the significance level (`0 < alpha < 1`).
/// 2. `power`: the target power (`0 < power < 1`). Required.
/// 3. `p`: the proportion under the alternative, in `(0, 1)`.
/// 4. `p0`: the proportion under the null, in `(0, 1)` and different from `p`.
/// 5. `tail`: (optional) two sided (default) or one sided.
#[bon::builder]
pub fn a_priori_n(
    alpha: f64,
    power: Option<f64>,
    p: f64,
    p0: f64,
    #[builder(default)] tail: Tail,
) -> Result<OneSampleResult, PowerError> {
    let target: f64 = require_power(power)?;
    let model: OneProportion = OneProportion::new(alpha, p, p0, tail)?;
    if p == p0 {
        return Err(PowerError::OutOfRange {
            name: "p - p0",
            value: 0.0,
        });
    }

    let solved: SolvedSize = solve_sample_size(&model, target)?;
    return Ok(OneSampleResult {
        n: solved.n,
        power: solved.power,
    });
}

/// Computes the power of the test of a proportion with `n` subjects (at least `2`).
#[bon::builder]
pub fn posthoc_power(
    alpha: f64,
    n: u64,
    p: f64,
    p0: f64,
    #[builder(default)] tail: Tail,
) -> Result<OneSampleResult, PowerError> {
    check_sample_size("n", n, MINIMUM_SAMPLE)?;
    let model: OneProportion = OneProportion::new(alpha, p, p0, tail)?;
    let power: f64 = model.power_at(n)?;
    return Ok(OneSampleResult { n, power });
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn sample_sizes() {
        struct Round {
            p: f64,
            p0: f64,
            tail: Tail,
            n: u64,
        }

        let rounds = [
            Round {
                p: 0.6,
                p0: 0.5,
                tail: Tail::TwoSided,
                n: 189,
            },
            Round {
                p: 0.3,
                p0: 0.2,
                tail: Tail::TwoSided,
                n: 165,
            },
            Round {
                p: 0.6,
                p0: 0.5,
                tail: Tail::OneSided,
                n: 149,
            },
        ];

        for round in rounds {
            let result: OneSampleResult = a_priori_n()
                .alpha(0.05)
                .power(0.8)
                .p(round.p)
                .p0(round.p0)
                .tail(round.tail)
                .call()
                .unwrap();
            assert_eq!(result.n, round.n, "p = {}, p0 = {}", round.p, round.p0);
            assert!(0.8 <= result.power);
        }
    }

    #[test]
    fn posthoc() {
        // se = sqrt(0.24 / 96) = 0.05, delta = 2
        let result: OneSampleResult = posthoc_power()
            .alpha(0.05)
            .n(96)
            .p(0.6)
            .p0(0.5)
            .tail(Tail::OneSided)
            .call()
            .unwrap();
        assert_approx_eq!(result.power, 1.0 - crate::euclid::normal_cdf(1.644854 - 2.0), 1e-5);
    }

    #[test]
    fn invalid_inputs() {
        assert!(posthoc_power().alpha(0.05).n(1).p(0.6).p0(0.5).call().is_err());
        assert!(posthoc_power().alpha(0.05).n(50).p(1.0).p0(0.5).call().is_err());
        assert!(a_priori_n().alpha(0.05).power(0.8).p(0.4).p0(0.4).call().is_err());
    }
}
