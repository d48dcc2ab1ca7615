//! # Equivalence and non-inferiority of 2 means
//!
//! Power of the [two one-sided tests](https://en.wikipedia.org/wiki/Equivalence_test)
//! (TOST) procedure for 2 independent means with a common standard deviation.
//!
//! The margin `d0` and the true difference `true_d` are standardized (divided
//! by the standard deviation). With `se = sqrt(1/n1 + 1/n2)` and
//! `z_alpha = quantile(1 - alpha)`:
//!
//!  - Non-inferiority (`H0: mu1 - mu2 <= -d0`):
//!     > power = 1 - cdf(z_alpha - (true_d + d0) / se)
//!  - Equivalence (`H0: |mu1 - mu2| >= d0`): both one sided tests must reject.
//!     The power is approximated by the smallest of the 2 one sided powers:
//!     > power ~= min(1 - cdf(z_alpha - (d0 + true_d) / se), 1 - cdf(z_alpha - (d0 - true_d) / se))
//!
//! Each one sided test uses the full `alpha`.
//!

use crate::{
    errors::PowerError,
    hypothesis::{Tail, check_finite, check_positive, check_sample_size, require_power, z_beta},
    solver::{SampleSizeModel, SizeInverter, SolvedSize, solve_sample_size},
};

use super::{TwoArmResult, second_arm, two_arm_minimum};

const MINIMUM_ARM: u64 = 2;

/// Wich hypothesys is being tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TostKind {
    /// The difference is inside `(-d0, d0)`.
    #[default]
    Equivalence,
    /// The difference is above `-d0`.
    NonInferiority,
}

struct Tost {
    alpha: f64,
    d0: f64,
    true_d: f64,
    kind: TostKind,
    allocation_ratio: f64,
    minimum: u64,
}

impl Tost {
    fn power(&self, n1: u64, n2: u64) -> Result<f64, PowerError> {
        let standard_error: f64 = (1.0 / n1 as f64 + 1.0 / n2 as f64).sqrt();
        let z_alpha: f64 = Tail::OneSided.z_alpha(self.alpha)?;

        let lower: f64 =
            Tail::OneSided.rejection_power(z_alpha, (self.true_d + self.d0) / standard_error)?;
        let power: f64 = match self.kind {
            TostKind::NonInferiority => lower,
            TostKind::Equivalence => {
                let upper: f64 = Tail::OneSided
                    .rejection_power(z_alpha, (self.d0 - self.true_d) / standard_error)?;
                lower.min(upper)
            }
        };
        return Ok(power);
    }
}

impl SampleSizeModel for Tost {
    fn minimum_size(&self) -> u64 {
        return self.minimum;
    }

    fn power_at(&self, n1: u64) -> Result<f64, PowerError> {
        return self.power(n1, second_arm(n1, self.allocation_ratio));
    }

    /// Exact only for `true_d = 0`. Otherwise it is only a starting point.
    fn inverter(&self, target: f64) -> Result<SizeInverter, PowerError> {
        let z: f64 = Tail::OneSided.z_alpha(self.alpha)? + z_beta(target)?;
        let k: f64 = self.allocation_ratio;
        return Ok(SizeInverter::ClosedForm(
            z * z * (1.0 + 1.0 / k) / (self.d0 * self.d0),
        ));
    }
}

/// Computes the sample sizes needed to show equivalence (or non-inferiority)
/// within the margin `d0`.
///
/// ## Inputs
///
/// 1. `alpha`: the significance level of each one sided test (`0 < alpha < 1`).
/// 2. `power`: the target power (`0 < power < 1`). Required.
/// 3. `d0`: the standardized margin. Must be strictly positive.
/// 4. `true_d`: (optional) the true standardized difference. The default is `0.0`.
///      - For [TostKind::Equivalence] it must be in `(-d0, d0)`.
///      - For [TostKind::NonInferiority] it must be above `-d0`.
/// 5. `kind`: (optional) equivalence (default) or non-inferiority.
/// 6. `allocation_ratio`: (optional) `k = n2 / n1`. The default is `1.0`.
///
/// If the `true_d` is outside of the margin, no sample size can reach any
/// power and an error is returned.
#[bon::builder]
pub fn a_priori_n(
    alpha: f64,
    power: Option<f64>,
    d0: f64,
    #[builder(default)] true_d: f64,
    #[builder(default)] kind: TostKind,
    #[builder(default = 1.0)] allocation_ratio: f64,
) -> Result<TwoArmResult, PowerError> {
    let target: f64 = require_power(power)?;
    check_positive("d0", d0)?;
    check_finite("true_d", true_d)?;
    let minimum: u64 = two_arm_minimum(MINIMUM_ARM, allocation_ratio)?;

    let inside_margin: bool = match kind {
        TostKind::Equivalence => true_d.abs() < d0,
        TostKind::NonInferiority => -d0 < true_d,
    };
    if !inside_margin {
        return Err(PowerError::OutOfRange {
            name: "true_d",
            value: true_d,
        });
    }

    let model: Tost = Tost {
        alpha,
        d0,
        true_d,
        kind,
        allocation_ratio,
        minimum,
    };
    let solved: SolvedSize = solve_sample_size(&model, target)?;
    let n2: u64 = second_arm(solved.n, allocation_ratio);

    return Ok(TwoArmResult::new(solved.n, n2, solved.power));
}

/// Computes the power of the TOST procedure with `n1` and `n2` subjects
/// (each at least `2`).
#[bon::builder]
pub fn posthoc_power(
    alpha: f64,
    n1: u64,
    n2: u64,
    d0: f64,
    #[builder(default)] true_d: f64,
    #[builder(default)] kind: TostKind,
) -> Result<TwoArmResult, PowerError> {
    check_sample_size("n1", n1, MINIMUM_ARM)?;
    check_sample_size("n2", n2, MINIMUM_ARM)?;
    check_positive("d0", d0)?;
    check_finite("true_d", true_d)?;

    let model: Tost = Tost {
        alpha,
        d0,
        true_d,
        kind,
        allocation_ratio: 1.0,
        minimum: MINIMUM_ARM,
    };
    let power: f64 = model.power(n1, n2)?;

    return Ok(TwoArmResult::new(n1, n2, power));
}
