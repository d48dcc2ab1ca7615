//! # Poisson rates
//!
//! Power of the comparison of 2 event rates (a
//! [Poisson regression](https://en.wikipedia.org/wiki/Poisson_regression) with a
//! single binary covariate) using the normal approximation of the log rate ratio.
//!
//! If each subject of group `i` is followed for `exposure_i` units of time and
//! has events at rate `rate_i`, the expected number of events of the group is
//! `E_i = n_i * exposure_i * rate_i` and:
//!
//! > Var(ln(RR)) ~= 1/E_1 + 1/E_2
//! >
//! > delta = |ln(rate2 / rate1)| / sqrt(1/E_1 + 1/E_2)
//!

use crate::{
    errors::PowerError,
    hypothesis::{Tail, check_positive, check_sample_size, require_power, z_beta},
    solver::{SampleSizeModel, SizeInverter, SolvedSize, solve_sample_size},
};

use super::{TwoArmResult, second_arm, two_arm_minimum};

const MINIMUM_ARM: u64 = 2;

struct PoissonRates {
    alpha: f64,
    tail: Tail,
    /// `exposure1 * rate1`
    intensity1: f64,
    /// `exposure2 * rate2`
    intensity2: f64,
    /// `|ln(rate2 / rate1)|`
    log_ratio: f64,
    allocation_ratio: f64,
    minimum: u64,
}

impl PoissonRates {
    fn new(
        alpha: f64,
        tail: Tail,
        rates: (f64, f64),
        exposures: (f64, f64),
        allocation_ratio: f64,
    ) -> Result<Self, PowerError> {
        check_positive("rate1", rates.0)?;
        check_positive("rate2", rates.1)?;
        check_positive("exposure1", exposures.0)?;
        check_positive("exposure2", exposures.1)?;
        let minimum: u64 = two_arm_minimum(MINIMUM_ARM, allocation_ratio)?;

        return Ok(PoissonRates {
            alpha,
            tail,
            intensity1: exposures.0 * rates.0,
            intensity2: exposures.1 * rates.1,
            log_ratio: (rates.1 / rates.0).ln().abs(),
            allocation_ratio,
            minimum,
        });
    }

    fn power(&self, n1: u64, n2: u64) -> Result<f64, PowerError> {
        let variance: f64 =
            1.0 / (n1 as f64 * self.intensity1) + 1.0 / (n2 as f64 * self.intensity2);
        let delta: f64 = self.log_ratio / variance.sqrt();
        return self.tail.z_test_power(self.alpha, delta);
    }
}

impl SampleSizeModel for PoissonRates {
    fn minimum_size(&self) -> u64 {
        return self.minimum;
    }

    fn power_at(&self, n1: u64) -> Result<f64, PowerError> {
        return self.power(n1, second_arm(n1, self.allocation_ratio));
    }

    fn inverter(&self, target: f64) -> Result<SizeInverter, PowerError> {
        let z: f64 = self.tail.z_alpha(self.alpha)? + z_beta(target)?;
        let per_subject: f64 =
            1.0 / self.intensity1 + 1.0 / (self.allocation_ratio * self.intensity2);
        return Ok(SizeInverter::ClosedForm(
            z * z * per_subject / (self.log_ratio * self.log_ratio),
        ));
    }
}

/// Computes the number of subjects needed to detect the rate ratio `rate2 / rate1`.
///
/// ## Inputs
///
/// 1. `alpha`: the significance level (`0 < alpha < 1`).
/// 2. `power`: the target power (`0 < power < 1`). Required.
/// 3. `rate1` and `rate2`: event rates per unit of exposure. Positive and different.
/// 4. `exposure1` and `exposure2`: exposure (follow up) per subject of each group.
/// 5. `tail`: (optional) two sided (default) or one sided.
/// 6. `allocation_ratio`: (optional) `k = n2 / n1`. The default is `1.0`.
#[bon::builder]
pub fn a_priori_n(
    alpha: f64,
    power: Option<f64>,
    rate1: f64,
    rate2: f64,
    exposure1: f64,
    exposure2: f64,
    #[builder(default)] tail: Tail,
    #[builder(default = 1.0)] allocation_ratio: f64,
) -> Result<TwoArmResult, PowerError> {
    let target: f64 = require_power(power)?;
    let model: PoissonRates = PoissonRates::new(
        alpha,
        tail,
        (rate1, rate2),
        (exposure1, exposure2),
        allocation_ratio,
    )?;
    if model.log_ratio == 0.0 {
        return Err(PowerError::NonPositive {
            name: "|ln(rate2 / rate1)|",
            value: 0.0,
        });
    }

    let solved: SolvedSize = solve_sample_size(&model, target)?;
    let n2: u64 = second_arm(solved.n, allocation_ratio);

    return Ok(TwoArmResult::new(solved.n, n2, solved.power));
}

/// Computes the power of the comparison of 2 rates with `n1` and `n2`
/// subjects (each at least `2`).
#[bon::builder]
pub fn posthoc_power(
    alpha: f64,
    n1: u64,
    n2: u64,
    rate1: f64,
    rate2: f64,
    exposure1: f64,
    exposure2: f64,
    #[builder(default)] tail: Tail,
) -> Result<TwoArmResult, PowerError> {
    check_sample_size("n1", n1, MINIMUM_ARM)?;
    check_sample_size("n2", n2, MINIMUM_ARM)?;
    let model: PoissonRates =
        PoissonRates::new(alpha, tail, (rate1, rate2), (exposure1, exposure2), 1.0)?;
    let power: f64 = model.power(n1, n2)?;

    return Ok(TwoArmResult::new(n1, n2, power));
}
