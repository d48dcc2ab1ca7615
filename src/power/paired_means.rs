//! # Paired means
//!
//! Power of the [paired t-test](https://en.wikipedia.org/wiki/Student%27s_t-test#Dependent_t-test_for_paired_samples)
//! (normal approximation). The effect size is `dz`: the mean of the
//! differences divided by the standard deviation of the differences.
//!
//! > delta = |dz| * sqrt(n)
//!

use crate::{
    errors::PowerError,
    hypothesis::{Tail, check_finite, check_positive, check_sample_size, require_power, z_beta},
    solver::{SampleSizeModel, SizeInverter, SolvedSize, solve_sample_size},
};

use super::OneSampleResult;

const MINIMUM_PAIRS: u64 = 2;

struct PairedMeans {
    alpha: f64,
    dz: f64,
    tail: Tail,
}

impl SampleSizeModel for PairedMeans {
    fn minimum_size(&self) -> u64 {
        return MINIMUM_PAIRS;
    }

    fn power_at(&self, n: u64) -> Result<f64, PowerError> {
        let delta: f64 = self.dz.abs() * (n as f64).sqrt();
        return self.tail.z_test_power(self.alpha, delta);
    }

    fn inverter(&self, target: f64) -> Result<SizeInverter, PowerError> {
        let z: f64 = self.tail.z_alpha(self.alpha)? + z_beta(target)?;
        return Ok(SizeInverter::ClosedForm(z * z / (self.dz * self.dz)));
    }
}

/// Computes the number of pairs needed to detect the standardized mean
/// difference `dz`.
///
/// ## Inputs
///
/// 1. `alpha`: the significance level (`0 < alpha < 1`).
/// 2. `power`: the target power (`0 < power < 1`). Required.
/// 3. `dz`: standardized mean of the differences. Must be strictly positive.
/// 4. `tail`: (optional) two sided (default) or one sided.
#[bon::builder]
pub fn a_priori_n(
    alpha: f64,
    power: Option<f64>,
    dz: f64,
    #[builder(default)] tail: Tail,
) -> Result<OneSampleResult, PowerError> {
    let target: f64 = require_power(power)?;
    check_positive("dz", dz)?;

    let model: PairedMeans = PairedMeans { alpha, dz, tail };
    let solved: SolvedSize = solve_sample_size(&model, target)?;

    return Ok(OneSampleResult {
        n: solved.n,
        power: solved.power,
    });
}

/// Computes the power of a paired test with `n` pairs (at least `2`).
#[bon::builder]
pub fn posthoc_power(
    alpha: f64,
    n: u64,
    dz: f64,
    #[builder(default)] tail: Tail,
) -> Result<OneSampleResult, PowerError> {
    check_sample_size("n", n, MINIMUM_PAIRS)?;
    check_finite("dz", dz)?;

    let model: PairedMeans = PairedMeans { alpha, dz, tail };
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
            dz: f64,
            power: f64,
            n: u64,
        }

        let rounds = [
            Round {
                dz: 0.5,
                power: 0.8,
                n: 32,
            },
            Round {
                dz: 0.3,
                power: 0.8,
                n: 88,
            },
            Round {
                dz: 0.5,
                power: 0.9,
                n: 43,
            },
        ];

        for round in rounds {
            let result: OneSampleResult = a_priori_n()
                .alpha(0.05)
                .power(round.power)
                .dz(round.dz)
                .call()
                .unwrap();
            assert_eq!(result.n, round.n, "dz = {}", round.dz);
            assert!(round.power <= result.power);
        }
    }

    #[test]
    fn posthoc() {
        // delta = 0.5 * sqrt(36) = 3
        let result: OneSampleResult = posthoc_power().alpha(0.05).n(36).dz(0.5).call().unwrap();
        let expected: f64 =
            crate::euclid::normal_cdf(-1.959964 - 3.0) + 1.0 - crate::euclid::normal_cdf(1.959964 - 3.0);
        assert_approx_eq!(result.power, expected, 1e-5);
    }

    #[test]
    fn invalid_inputs() {
        assert!(posthoc_power().alpha(0.05).n(1).dz(0.5).call().is_err());
        assert!(a_priori_n().alpha(0.05).power(0.8).dz(-0.2).call().is_err());
        assert_eq!(
            a_priori_n().alpha(0.05).dz(0.5).call(),
            Err(PowerError::MissingPower)
        );
    }
}
