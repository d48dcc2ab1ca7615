//! # Root finding
//!
//! A bracketing [bisection](https://en.wikipedia.org/wiki/Bisection_method)
//! solver for scalar functions and the exponential search used to build the
//! bracket when only a lower bound is known.
//!
//! Every function in the library that has no closed-form inverse (critical
//! values of the chi squared and F distributions, sample sizes of the tests
//! based on noncentral distributions) is inverted with the 2 step idiom:
//!
//!  1. Expand the upper bound exponentially until the function changes sign
//!     ([expand_upper_bound]).
//!  2. Bisect the bracket ([bisection]).
//!

use crate::errors::{PowerError, RootFindError};

/// The result of [bisection].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootResult {
    /// The best approximation of the root.
    pub root: f64,
    /// Number of bisection steps performed.
    pub iterations: usize,
    /// `false` if the maximum number of iterations was reached before reaching
    /// the tolerance. The root is still the best midpoint found.
    pub converged: bool,
}

/// Finds a root of `f` in the bracket `[a, b]` with the bisection method.
///
/// ## Inputs
///
///  - `f`: the function. It must be continuous on `[a, b]` (or at least
///     monotone with a single sign change).
///  - `a` and `b`: the bracket. `f(a)` and `f(b)` must have opposite signs
///     (or one of them be exactly `0.0`).
///  - `tol`: the iteration stops once `|f(mid)| < tol` or the half width of
///     the bracket is smaller than `tol`.
///  - `max_iters`: maximum number of bisection steps.
///
/// ## Results
///
/// Returns a [RootResult]. If the tolerance is not reached after `max_iters`
/// steps, the midpoint is returned anyway with `converged = false`: the
/// caller decides if the value can be trusted.
///
/// Returns [RootFindError::NanEvaluation] if `f` is a NaN at any endpoint and
/// [RootFindError::NoSignChange] if `f(a)` and `f(b)` have the same sign.
pub fn bisection<F>(
    f: F,
    a: f64,
    b: f64,
    tol: f64,
    max_iters: usize,
) -> Result<RootResult, PowerError>
where
    F: Fn(f64) -> f64,
{
    let mut a: f64 = a;
    let mut b: f64 = b;
    let mut fa: f64 = f(a);
    let fb: f64 = f(b);

    if fa.is_nan() || fb.is_nan() {
        return Err(RootFindError::NanEvaluation.into());
    }
    if fa == 0.0 {
        return Ok(RootResult {
            root: a,
            iterations: 0,
            converged: true,
        });
    }
    if fb == 0.0 {
        return Ok(RootResult {
            root: b,
            iterations: 0,
            converged: true,
        });
    }
    if fa.signum() == fb.signum() {
        return Err(RootFindError::NoSignChange { a, b }.into());
    }

    let mut iterations: usize = 0;
    while iterations < max_iters {
        let c: f64 = 0.5 * (a + b);
        let fc: f64 = f(c);
        if fc.abs() < tol || 0.5 * (b - a).abs() < tol {
            return Ok(RootResult {
                root: c,
                iterations,
                converged: true,
            });
        }

        if fa.signum() != fc.signum() {
            b = c;
        } else {
            a = c;
            fa = fc;
        }
        iterations += 1;
    }

    log::warn!(
        "bisection did not converge after {iterations} iterations (bracket [{a}, {b}], tol {tol})"
    );

    return Ok(RootResult {
        root: 0.5 * (a + b),
        iterations,
        converged: false,
    });
}

/// Doubles `start` until `0.0 <= f(hi)` and returns `hi`.
///
/// `f` must be non-decreasing. Returns [PowerError::BracketNotFound] if the
/// sign does not change after `max_doublings` doublings and
/// [PowerError::NanErr] if `f` evaluates to NaN.
pub fn expand_upper_bound<F>(f: F, start: f64, max_doublings: usize) -> Result<f64, PowerError>
where
    F: Fn(f64) -> f64,
{
    if !(0.0 < start) || !start.is_finite() {
        return Err(PowerError::NonPositive {
            name: "start",
            value: start,
        });
    }

    let mut hi: f64 = start;
    for _ in 0..=max_doublings {
        let value: f64 = f(hi);
        if value.is_nan() {
            return Err(PowerError::NanErr);
        }
        if 0.0 <= value {
            return Ok(hi);
        }
        hi *= 2.0;
    }

    return Err(PowerError::BracketNotFound);
}
