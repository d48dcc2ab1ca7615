//! # Correlation
//!
//! Power of the test of `H0: rho = 0` for a
//! [Pearson correlation](https://en.wikipedia.org/wiki/Pearson_correlation_coefficient),
//! using the [Fisher transformation](crate::effect_size::fisher_z): `atanh(r)`
//! is approximately normal with standard deviation `1 / sqrt(n - 3)`.
//!
//! > delta = |atanh(r)| * sqrt(n - 3)
//!

use crate::{
    effect_size::fisher_z,
    errors::PowerError,
    hypothesis::{Tail, check_sample_size, require_power, z_beta},
    solver::{SampleSizeModel, SizeInverter, SolvedSize, solve_sample_size},
};

use super::OneSampleResult;

/// `n - 3` must be positive.
const MINIMUM_SAMPLE: u64 = 4;

struct Correlation {
    alpha: f64,
    /// `|atanh(r)|`
    z_r: f64,
    tail: Tail,
}

impl Correlation {
    fn new(alpha: f64, r: f64, tail: Tail) -> Result<Self, PowerError> {
        let z_r: f64 = fisher_z(r)?.abs();
        return Ok(Correlation { alpha, z_r, tail });
    }
}

impl SampleSizeModel for Correlation {
    fn minimum_size(&self) -> u64 {
        return MINIMUM_SAMPLE;
    }

    fn power_at(&self, n: u64) -> Result<f64, PowerError> {
        let delta: f64 = self.z_r * (n as f64 - 3.0).sqrt();
        return self.tail.z_test_power(self.alpha, delta);
    }

    fn inverter(&self, target: f64) -> Result<SizeInverter, PowerError> {
        let z: f64 = self.tail.z_alpha(self.alpha)? + z_beta(target)?;
        return Ok(SizeInverter::ClosedForm(
            z * z / (self.z_r * self.z_r) + 3.0,
        ));
    }
}

/// Computes the sample size needed to detect the correlation `r`.
///
/// ## Inputs
///
/// 1. `alpha`: the significance level (`0 < alpha < 1`).
/// 2. `power`: the target power (`0 < power < 1`). Required.
/// 3. `r`: the correlation under the alternative. In `(-1, 1)` and not `0.0`.
/// 4. `tail`: (optional) two sided (default) or one sided.
#[bon::builder]
pub fn a_priori_n(
    alpha: f64,
    power: Option<f64>,
    r: f64,
    #[builder(default)] tail: Tail,
) -> Result<OneSampleResult, PowerError> {
    let target: f64 = require_power(power)?;
    let model: Correlation = Correlation::new(alpha, r, tail)?;
    if model.z_r == 0.0 {
        return Err(PowerError::NonPositive {
            name: "|r|",
            value: 0.0,
        });
    }

    let solved: SolvedSize = solve_sample_size(&model, target)?;
    return Ok(OneSampleResult {
        n: solved.n,
        power: solved.power,
    });
}

/// Computes the power of the test of a correlation with `n` pairs of
/// observations (at least `4`).
#[bon::builder]
pub fn posthoc_power(
    alpha: f64,
    n: u64,
    r: f64,
    #[builder(default)] tail: Tail,
) -> Result<OneSampleResult, PowerError> {
    check_sample_size("n", n, MINIMUM_SAMPLE)?;
    let model: Correlation = Correlation::new(alpha, r, tail)?;
    let power: f64 = model.power_at(n)?;
    return Ok(OneSampleResult { n, power });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_sizes() {
        struct Round {
            r: f64,
            n: u64,
        }

        let rounds = [
            Round { r: 0.3, n: 85 },
            Round { r: -0.3, n: 85 },
            Round { r: 0.5, n: 30 },
            Round { r: 0.1, n: 783 },
        ];

        for round in rounds {
            let result: OneSampleResult = a_priori_n()
                .alpha(0.05)
                .power(0.8)
                .r(round.r)
                .call()
                .unwrap();
            assert_eq!(result.n, round.n, "r = {}", round.r);
            assert!(0.8 <= result.power);
        }
    }

    #[test]
    fn invalid_inputs() {
        assert!(posthoc_power().alpha(0.05).n(3).r(0.3).call().is_err());
        assert!(posthoc_power().alpha(0.05).n(30).r(1.0).call().is_err());
        assert!(a_priori_n().alpha(0.05).power(0.8).r(0.0).call().is_err());
    }
}
