//! # Sample size solver
//!
//! Every test family answers the same 2 questions:
//!
//!  1. *A priori*: what is the smallest sample size that reaches a target power?
//!  2. *Post hoc*: what is the power for a given sample size?
//!
//! The second is a direct formula. The first is the inverse of the second,
//! and it is solved here once for all the families: a family describes itself
//! with the [SampleSizeModel] trait and [solve_sample_size] finds the size.
//!
//! The size is always measured in the *primary* unit of the family (`n1` for
//! the two arm tests, the total `N` for the F-tests, the number of events for
//! the log-rank test). The family derives the rest of the design from it.
//!
//! ## Strategy
//!
//! If the family has a closed form for the size (all the z-tests do) it is
//! rounded up and checked: the power is recomputed at the integer size. If it
//! is still under the target (the closed form of some tests is only an
//! approximation) the search continues as if there was no closed form.
//!
//! Without closed form, the classical 2 step idiom is used (see
//! [crate::root_finding]): the upper bound is doubled until the power reaches
//! the target and then the bracket is bisected. The root is rounded up and
//! adjusted by single steps, so the result is always the smallest integer of
//! the bracket whose power reaches the target.
//!

use crate::{
    configuration::root_finding::{
        DEFAULT_MAX_ITERATIONS, INITIAL_UPPER_BOUND, MAX_SAMPLE_SIZE, SAMPLE_SIZE_TOLERANCE,
    },
    errors::PowerError,
    hypothesis::check_power,
    root_finding::{RootResult, bisection},
};

/// How the sample size of a [SampleSizeModel] can be found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeInverter {
    /// The real valued solution of the closed form, before rounding.
    ClosedForm(f64),
    /// There is no closed form: bracket and bisect the power function.
    BracketAndBisect,
}

/// The description of a test that [solve_sample_size] can solve.
///
/// The power must be non-decreasing in the sample size.
pub trait SampleSizeModel {
    /// The smallest sample size for wich the test is defined.
    fn minimum_size(&self) -> u64;

    /// The power of the test with sample size `n`.
    ///
    /// `n` will always be `>= self.minimum_size()`.
    fn power_at(&self, n: u64) -> Result<f64, PowerError>;

    /// How to find the sample size for the `target` power.
    ///
    /// By deafult there is no closed form.
    fn inverter(&self, _target: f64) -> Result<SizeInverter, PowerError> {
        return Ok(SizeInverter::BracketAndBisect);
    }
}

/// A sample size and the power it achieves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolvedSize {
    pub n: u64,
    pub power: f64,
}

/// A point of a power curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerPoint {
    pub n: u64,
    pub power: f64,
}

/// Finds the smallest sample size of `model` with a power of at least `target`.
///
/// ## Results
///
/// The [SolvedSize] with the size and the power recomputed at that size
/// (always `>= target`).
///
/// Returns [PowerError::InvalidPower] if `target` is not in `(0, 1)` and
/// [PowerError::BracketNotFound] if the target can not be reached with
/// [MAX_SAMPLE_SIZE] subjects. Errors of the model are propagated.
pub fn solve_sample_size<M>(model: &M, target: f64) -> Result<SolvedSize, PowerError>
where
    M: SampleSizeModel + ?Sized,
{
    check_power(target)?;
    let minimum: u64 = model.minimum_size().max(1);

    let start: u64 = match model.inverter(target)? {
        SizeInverter::ClosedForm(x) => {
            if x.is_nan() {
                return Err(PowerError::NanErr);
            }
            if MAX_SAMPLE_SIZE as f64 <= x {
                return Err(PowerError::BracketNotFound);
            }
            // x may be negative or tiny for huge effects
            let n: u64 = (x.ceil().max(0.0) as u64).max(minimum);
            let power: f64 = model.power_at(n)?;
            if target <= power {
                log::debug!("closed form sample size {n} (power {power})");
                return Ok(SolvedSize { n, power });
            }
            log::debug!(
                "closed form sample size {n} only reaches power {power} < {target}, refining"
            );
            n
        }
        SizeInverter::BracketAndBisect => minimum,
    };

    return bracket_and_bisect(model, start, target);
}

/// Exponential search of the upper bound starting at `lower` followed by a
/// bisection of the integer power function.
fn bracket_and_bisect<M>(model: &M, lower: u64, target: f64) -> Result<SolvedSize, PowerError>
where
    M: SampleSizeModel + ?Sized,
{
    let power_lower: f64 = model.power_at(lower)?;
    if target <= power_lower {
        return Ok(SolvedSize {
            n: lower,
            power: power_lower,
        });
    }

    let mut lo: u64 = lower;
    let mut hi: u64 = lower.saturating_mul(2).max(INITIAL_UPPER_BOUND);
    loop {
        let power_hi: f64 = model.power_at(hi)?;
        if target <= power_hi {
            break;
        }
        if MAX_SAMPLE_SIZE <= hi {
            log::debug!("power {power_hi} at the search limit {hi} is below {target}");
            return Err(PowerError::BracketNotFound);
        }
        lo = hi;
        hi = hi.saturating_mul(2).min(MAX_SAMPLE_SIZE);
    }
    log::debug!("sample size bracketed in [{lo}, {hi}]");

    // sizes inside the bracket are valid, a failure would show up as NaN
    let objective = |x: f64| -> f64 {
        let n: u64 = (x.ceil() as u64).clamp(lo, hi);
        return match model.power_at(n) {
            Ok(power) => power - target,
            Err(_) => f64::NAN,
        };
    };
    let result: RootResult = bisection(
        objective,
        lo as f64,
        hi as f64,
        SAMPLE_SIZE_TOLERANCE,
        DEFAULT_MAX_ITERATIONS,
    )?;

    let mut n: u64 = (result.root.ceil() as u64).clamp(lo, hi);
    let mut power: f64 = model.power_at(n)?;
    while power < target && n < hi {
        n += 1;
        power = model.power_at(n)?;
    }
    while lo < n - 1 {
        let previous: f64 = model.power_at(n - 1)?;
        if previous < target {
            break;
        }
        n -= 1;
        power = previous;
    }

    log::debug!(
        "bisected sample size {n} (power {power}, {} iterations)",
        result.iterations
    );
    return Ok(SolvedSize { n, power });
}

/// Evaluates `power` at each of the `sizes`. The sizes where `power` returns an
/// error (for example, under the minimum of the test) are skipped.
///
/// ```
/// use PowerAnalysis::power::paired_means;
/// use PowerAnalysis::solver::{PowerPoint, power_curve};
///
/// let curve: Vec<PowerPoint> = power_curve(1..=60, |n| {
///     paired_means::posthoc_power().alpha(0.05).n(n).dz(0.4).call().map(|r| r.power)
/// });
/// assert_eq!(curve.len(), 59); // n = 1 is not a valid sample size
/// ```
pub fn power_curve<I, G>(sizes: I, power: G) -> Vec<PowerPoint>
where
    I: IntoIterator<Item = u64>,
    G: Fn(u64) -> Result<f64, PowerError>,
{
    return sizes
        .into_iter()
        .filter_map(|n: u64| power(n).ok().map(|power: f64| PowerPoint { n, power }))
        .collect();
}
