//! # Log-rank test
//!
//! Power of the [log-rank test](https://en.wikipedia.org/wiki/Logrank_test)
//! comparing the survival of 2 groups, with the Schoenfeld approximation.
//!
//! The power depends on the number of *events* `D`, not directly on the number
//! of subjects. If `p1` and `p2` are the proportions of subjects in each group
//! (`p1 = 1 / (1 + k)`, `p2 = k / (1 + k)` for the allocation ratio `k`):
//!
//! > delta = |ln(HR)| * sqrt(D * p1 * p2)
//!
//! If the expected fraction of subjects with an event during the study is
//! known, the number of subjects is `total_n = ceil(D / event_fraction)`.
//!

use crate::{
    configuration::root_finding::MAX_SAMPLE_SIZE,
    errors::PowerError,
    hypothesis::{Tail, check_positive, check_sample_size, require_power, z_beta},
    solver::{SampleSizeModel, SizeInverter, SolvedSize, solve_sample_size},
};

use super::check_allocation_ratio;

const MINIMUM_EVENTS: u64 = 1;

/// The result of a log-rank computation.
///
/// The number of subjects is only known if an `event_fraction` was given.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogRankResult {
    /// Number of events (deaths, relapses...) observed in both groups.
    pub events: u64,
    /// Total number of subjects.
    pub total_n: Option<u64>,
    /// Subjects in the first group.
    pub n1: Option<u64>,
    /// Subjects in the second group.
    pub n2: Option<u64>,
    pub power: f64,
}

struct LogRank {
    alpha: f64,
    tail: Tail,
    /// `|ln(HR)|`
    log_hazard_ratio: f64,
    /// Proportion of subjects in the first group
    p1: f64,
}

impl LogRank {
    fn new(alpha: f64, tail: Tail, hazard_ratio: f64, allocation_ratio: f64) -> Result<Self, PowerError> {
        check_positive("hazard_ratio", hazard_ratio)?;
        check_allocation_ratio(allocation_ratio)?;
        return Ok(LogRank {
            alpha,
            tail,
            log_hazard_ratio: hazard_ratio.ln().abs(),
            p1: 1.0 / (1.0 + allocation_ratio),
        });
    }

    /// `p1 * p2`
    fn balance(&self) -> f64 {
        return self.p1 * (1.0 - self.p1);
    }

    /// Builds the result, deriving the subjects from the `event_fraction`.
    ///
    /// Returns [PowerError::BracketNotFound] if more than [MAX_SAMPLE_SIZE]
    /// subjects are needed.
    fn result(
        &self,
        events: u64,
        power: f64,
        event_fraction: Option<f64>,
    ) -> Result<LogRankResult, PowerError> {
        let mut result: LogRankResult = LogRankResult {
            events,
            total_n: None,
            n1: None,
            n2: None,
            power,
        };

        if let Some(fraction) = event_fraction {
            let subjects: f64 = (events as f64 / fraction).ceil();
            if (MAX_SAMPLE_SIZE as f64) < subjects {
                return Err(PowerError::BracketNotFound);
            }
            let total_n: u64 = subjects as u64;
            let n1: u64 = ((total_n as f64 * self.p1).ceil() as u64).min(total_n);
            result.total_n = Some(total_n);
            result.n1 = Some(n1);
            result.n2 = Some(total_n - n1);
        }

        return Ok(result);
    }
}

impl SampleSizeModel for LogRank {
    fn minimum_size(&self) -> u64 {
        return MINIMUM_EVENTS;
    }

    fn power_at(&self, events: u64) -> Result<f64, PowerError> {
        let delta: f64 = self.log_hazard_ratio * (events as f64 * self.balance()).sqrt();
        return self.tail.z_test_power(self.alpha, delta);
    }

    fn inverter(&self, target: f64) -> Result<SizeInverter, PowerError> {
        let z: f64 = self.tail.z_alpha(self.alpha)? + z_beta(target)?;
        let log_hr: f64 = self.log_hazard_ratio;
        return Ok(SizeInverter::ClosedForm(
            z * z / (self.balance() * log_hr * log_hr),
        ));
    }
}

/// Checks that the event fraction (if any) is in `(0, 1]`.
fn check_event_fraction(event_fraction: Option<f64>) -> Result<(), PowerError> {
    if let Some(fraction) = event_fraction {
        #[allow(clippy::nonminimal_bool)]
        if !(0.0 < fraction && fraction <= 1.0) {
            return Err(PowerError::OutOfRange {
                name: "event_fraction",
                value: fraction,
            });
        }
    }
    return Ok(());
}

/// Computes the number of events (and subjects) needed to detect the hazard
/// ratio `hazard_ratio`.
///
/// ## Inputs
///
/// 1. `alpha`: the significance level (`0 < alpha < 1`).
/// 2. `power`: the target power (`0 < power < 1`). Required.
/// 3. `hazard_ratio`: the hazard ratio of the second group over the first.
///     Positive and different from `1.0`.
/// 4. `tail`: (optional) two sided (default) or one sided.
/// 5. `allocation_ratio`: (optional) `k = n2 / n1`. The default is `1.0`.
/// 6. `event_fraction`: (optional) the proportion of subjects expected to
///     have an event during the study, in `(0, 1]`.
///
/// ## Results
///
/// A [LogRankResult] with the events. The number of subjects is only
/// computed if `event_fraction` is given.
///
/// ```
/// use PowerAnalysis::power::logrank;
///
/// let result = logrank::a_priori_n()
///     .alpha(0.05)
///     .power(0.8)
///     .hazard_ratio(0.7)
///     .event_fraction(0.6)
///     .call()
///     .unwrap();
/// assert_eq!(result.events, 247);
/// assert_eq!(result.total_n, Some(412));
/// ```
#[bon::builder]
pub fn a_priori_n(
    alpha: f64,
    power: Option<f64>,
    hazard_ratio: f64,
    #[builder(default)] tail: Tail,
    #[builder(default = 1.0)] allocation_ratio: f64,
    event_fraction: Option<f64>,
) -> Result<LogRankResult, PowerError> {
    let target: f64 = require_power(power)?;
    check_event_fraction(event_fraction)?;
    let model: LogRank = LogRank::new(alpha, tail, hazard_ratio, allocation_ratio)?;
    if model.log_hazard_ratio == 0.0 {
        return Err(PowerError::NonPositive {
            name: "|ln(hazard_ratio)|",
            value: 0.0,
        });
    }

    let solved: SolvedSize = solve_sample_size(&model, target)?;
    return model.result(solved.n, solved.power, event_fraction);
}

/// Computes the power of the log-rank test once `events` events (at least
/// `1`) have been observed.
#[bon::builder]
pub fn posthoc_power(
    alpha: f64,
    events: u64,
    hazard_ratio: f64,
    #[builder(default)] tail: Tail,
    #[builder(default = 1.0)] allocation_ratio: f64,
    event_fraction: Option<f64>,
) -> Result<LogRankResult, PowerError> {
    check_sample_size("events", events, MINIMUM_EVENTS)?;
    check_event_fraction(event_fraction)?;
    let model: LogRank = LogRank::new(alpha, tail, hazard_ratio, allocation_ratio)?;
    let power: f64 = model.power_at(events)?;

    return model.result(events, power, event_fraction);
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn required_events() {
        struct Round {
            hazard_ratio: f64,
            allocation_ratio: f64,
            events: u64,
        }

        let rounds = [
            Round {
                hazard_ratio: 0.7,
                allocation_ratio: 1.0,
                events: 247,
            },
            Round {
                hazard_ratio: 1.0 / 0.7,
                allocation_ratio: 1.0,
                events: 247,
            },
            Round {
                hazard_ratio: 0.5,
                allocation_ratio: 1.0,
                events: 66,
            },
            Round {
                hazard_ratio: 0.7,
                allocation_ratio: 2.0,
                events: 278,
            },
        ];

        for round in rounds {
            let result: LogRankResult = a_priori_n()
                .alpha(0.05)
                .power(0.8)
                .hazard_ratio(round.hazard_ratio)
                .allocation_ratio(round.allocation_ratio)
                .call()
                .unwrap();
            assert_eq!(result.events, round.events, "HR = {}", round.hazard_ratio);
            assert_eq!(result.total_n, None);
            assert!(0.8 <= result.power);
        }
    }

    #[test]
    fn subjects_from_event_fraction() {
        let result: LogRankResult = a_priori_n()
            .alpha(0.05)
            .power(0.8)
            .hazard_ratio(0.7)
            .event_fraction(0.6)
            .call()
            .unwrap();
        assert_eq!(result.events, 247);
        assert_eq!(result.total_n, Some(412));
        assert_eq!(result.n1, Some(206));
        assert_eq!(result.n2, Some(206));
    }

    #[test]
    fn posthoc() {
        // delta = |ln(0.5)| * sqrt(100 / 4) = 3.465736
        let result: LogRankResult = posthoc_power()
            .alpha(0.05)
            .events(100)
            .hazard_ratio(0.5)
            .event_fraction(0.5)
            .call()
            .unwrap();
        let delta: f64 = 0.5_f64.ln().abs() * 5.0;
        assert_approx_eq!(
            result.power,
            1.0 - crate::euclid::normal_cdf(1.959964 - delta)
                + crate::euclid::normal_cdf(-1.959964 - delta),
            1e-5
        );
        assert_eq!(result.total_n, Some(200));
    }

    #[test]
    fn invalid_inputs() {
        assert!(a_priori_n().alpha(0.05).power(0.8).hazard_ratio(1.0).call().is_err());
        assert!(a_priori_n().alpha(0.05).power(0.8).hazard_ratio(-0.5).call().is_err());
        assert!(
            a_priori_n()
                .alpha(0.05)
                .power(0.8)
                .hazard_ratio(0.7)
                .event_fraction(1.5)
                .call()
                .is_err()
        );
        assert!(posthoc_power().alpha(0.05).events(0).hazard_ratio(0.7).call().is_err());
    }

    #[test]
    fn too_many_subjects() {
        // 247 events with 1 event every 10^300 subjects
        assert_eq!(
            a_priori_n()
                .alpha(0.05)
                .power(0.8)
                .hazard_ratio(0.7)
                .event_fraction(1e-300)
                .call(),
            Err(PowerError::BracketNotFound)
        );
        assert_eq!(
            posthoc_power()
                .alpha(0.05)
                .events(100)
                .hazard_ratio(0.5)
                .event_fraction(1e-6)
                .call(),
            Err(PowerError::BracketNotFound)
        );

        // exactly at the limit
        let result: LogRankResult = posthoc_power()
            .alpha(0.05)
            .events(100)
            .hazard_ratio(0.5)
            .event_fraction(1e-5)
            .call()
            .unwrap();
        assert_eq!(result.total_n, Some(10_000_000));
    }
}
