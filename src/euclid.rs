//! Euclid contains uscefull math functions.
//!
//! These are the special functions the rest of the library is built on:
//!
//!  - The [error function](https://en.wikipedia.org/wiki/Error_function) and the
//!     cdf, pdf and quantile of the standard normal.
//!  - The [log-gamma function](https://en.wikipedia.org/wiki/Gamma_function) and
//!     the [beta function](https://en.wikipedia.org/wiki/Beta_function).
//!  - The regularized [incomplete gamma](https://en.wikipedia.org/wiki/Incomplete_gamma_function)
//!     and [incomplete beta](https://en.wikipedia.org/wiki/Beta_function#Incomplete_beta_function)
//!     functions.
//!
//! The algorithms, iteration caps and tolerances are fixed (see
//! [crate::configuration::special_functions]) so the results are reproducible.
//!

use std::f64::consts::{PI, SQRT_2};

use crate::configuration::special_functions::{
    BETA_EPSILON, FPMIN, GAMMA_EPSILON, LANCZOS_COEFFICIENTS, LANCZOS_G, MAX_ITERATIONS,
};
use crate::errors::PowerError;

// Abramowitz-Stegun 7.1.26
const ERF_A: [f64; 5] = [
    0.254829592,
    -0.284496736,
    1.421413741,
    -1.453152027,
    1.061405429,
];
const ERF_P: f64 = 0.3275911;

// Acklam's coefficients for the inverse of the std normal cdf.
const ACKLAM_A: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];
const ACKLAM_B: [f64; 5] = [
    -5.447609879822406e+01,
    1.615858368580409e+02,
    -1.556989798598866e+02,
    6.680131188771972e+01,
    -1.328068155288572e+01,
];
const ACKLAM_C: [f64; 6] = [
    -7.784894002430293e-03,
    -3.223964580411365e-01,
    -2.400758277161838e+00,
    -2.549732539343734e+00,
    4.374664141464968e+00,
    2.938163982698783e+00,
];
const ACKLAM_D: [f64; 4] = [
    7.784695709041462e-03,
    3.224671290700398e-01,
    2.445134137142996e+00,
    3.754408661907416e+00,
];

/// Boundary between the lower tail region and the central region of [inv_norm].
const ACKLAM_P_LOW: f64 = 0.02425;
const ACKLAM_P_HIGH: f64 = 1.0 - ACKLAM_P_LOW;

/// The [error function](https://en.wikipedia.org/wiki/Error_function).
///
/// Uses the Abramowitz-Stegun 7.1.26 rational approximation. The maximum
/// absolute error is about `1.5 * 10^-7`. The function is odd: `erf(-x) = -erf(x)`.
#[must_use]
pub fn erf(x: f64) -> f64 {
    let sign: f64 = if x < 0.0 { -1.0 } else { 1.0 };
    let x: f64 = x.abs();

    let t: f64 = 1.0 / (1.0 + ERF_P * x);
    let poly: f64 = ((((ERF_A[4] * t + ERF_A[3]) * t + ERF_A[2]) * t + ERF_A[1]) * t + ERF_A[0]) * t;
    let y: f64 = 1.0 - poly * (-x * x).exp();

    return sign * y;
}

/// The cdf of the standard normal distribution: `0.5 * (1 + erf(x / sqrt(2)))`.
#[must_use]
pub fn normal_cdf(x: f64) -> f64 {
    return 0.5 * (1.0 + erf(x / SQRT_2));
}

/// The pdf of the standard normal distribution.
#[must_use]
pub fn normal_pdf(x: f64) -> f64 {
    return (-0.5 * x * x).exp() / (2.0 * PI).sqrt();
}

/// The quantile function (inverse of the cdf) of the standard normal distribution.
///
/// Uses [Acklam's algorithm](https://web.archive.org/web/20151030215612/http://home.online.no/~pjacklam/notes/invnorm/),
/// wich splits the domain in 3 regions (lower tail, central region and
/// upper tail), each with it's own rational approximation.
///
///  - `inv_norm(0.0) = -inf`
///  - `inv_norm(1.0) = +inf`
///  - Returns [PowerError::InvalidProbability] if `p` is outside `[0, 1]` or a NaN.
pub fn inv_norm(p: f64) -> Result<f64, PowerError> {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return Err(PowerError::InvalidProbability { name: "p", value: p });
    }
    if p == 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    if p == 1.0 {
        return Ok(f64::INFINITY);
    }

    let c: &[f64; 6] = &ACKLAM_C;
    let d: &[f64; 4] = &ACKLAM_D;

    if p < ACKLAM_P_LOW {
        let q: f64 = (-2.0 * p.ln()).sqrt();
        let num: f64 = ((((c[0] * q + c[1]) * q + c[2]) * q + c[3]) * q + c[4]) * q + c[5];
        let den: f64 = (((d[0] * q + d[1]) * q + d[2]) * q + d[3]) * q + 1.0;
        return Ok(num / den);
    }

    if ACKLAM_P_HIGH < p {
        let q: f64 = (-2.0 * (1.0 - p).ln()).sqrt();
        let num: f64 = ((((c[0] * q + c[1]) * q + c[2]) * q + c[3]) * q + c[4]) * q + c[5];
        let den: f64 = (((d[0] * q + d[1]) * q + d[2]) * q + d[3]) * q + 1.0;
        return Ok(-num / den);
    }

    let a: &[f64; 6] = &ACKLAM_A;
    let b: &[f64; 5] = &ACKLAM_B;
    let q: f64 = p - 0.5;
    let r: f64 = q * q;
    let num: f64 = (((((a[0] * r + a[1]) * r + a[2]) * r + a[3]) * r + a[4]) * r + a[5]) * q;
    let den: f64 = ((((b[0] * r + b[1]) * r + b[2]) * r + b[3]) * r + b[4]) * r + 1.0;
    return Ok(num / den);
}

/// Computes the natural logarithm of the [gamma function](https://en.wikipedia.org/wiki/Gamma_function).
///
/// Uses the [Lanczos approximation](https://en.wikipedia.org/wiki/Lanczos_approximation)
/// with `g = 7` and 9 coefficients. For `z < 0.5` the reflection formula is used:
///
/// > ln(gamma(z)) = ln(pi) - ln(sin(pi * z)) - ln(gamma(1 - z))
///
/// At the poles (`z = 0, -1, -2...`) the result is `+inf`.
#[must_use]
pub fn ln_gamma(z: f64) -> f64 {
    if z < 0.5 {
        return PI.ln() - (PI * z).sin().ln() - ln_gamma(1.0 - z);
    }

    let z: f64 = z - 1.0;
    let mut x: f64 = LANCZOS_COEFFICIENTS[0];
    for (i, coef) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
        x += coef / (z + i as f64);
    }
    let t: f64 = z + LANCZOS_G + 0.5;

    return 0.5 * (2.0 * PI).ln() + (z + 0.5) * t.ln() - t + x.ln();
}

/// The [beta function](https://en.wikipedia.org/wiki/Beta_function), computed
/// trough [ln_gamma].
#[must_use]
pub fn beta_fn(a: f64, b: f64) -> f64 {
    return (ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)).exp();
}

/// The regularized lower [incomplete gamma function](https://en.wikipedia.org/wiki/Incomplete_gamma_function)
/// `P(a, x)`.
///
/// Returns [PowerError::NonPositive] if `a <= 0` and [PowerError::NanErr] if
/// any input is a NaN. For `x <= 0` the result is `0.0`.
pub fn reg_incomplete_gamma(a: f64, x: f64) -> Result<f64, PowerError> {
    if a.is_nan() || x.is_nan() {
        return Err(PowerError::NanErr);
    }
    if a <= 0.0 {
        return Err(PowerError::NonPositive { name: "a", value: a });
    }
    return Ok(reg_incomplete_gamma_unchecked(a, x));
}

/// [reg_incomplete_gamma] without checking the inputs. Assumes `0 < a`.
///
/// If `x < a + 1` the power series is used, otherwise `Q(a, x)` is computed
/// with a continued fraction (modified Lentz algorithm) and `1 - Q` is returned.
#[must_use]
pub(crate) fn reg_incomplete_gamma_unchecked(a: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }

    let prefactor: f64 = (-x + a * x.ln() - ln_gamma(a)).exp();

    if x < a + 1.0 {
        // series representation
        let mut ap: f64 = a;
        let mut sum: f64 = 1.0 / a;
        let mut del: f64 = sum;
        for _ in 1..=MAX_ITERATIONS {
            ap += 1.0;
            del *= x / ap;
            sum += del;
            if del.abs() < sum.abs() * GAMMA_EPSILON {
                break;
            }
        }
        return sum * prefactor;
    }

    // continued fraction
    let mut b: f64 = x + 1.0 - a;
    let mut c: f64 = 1.0 / FPMIN;
    let mut d: f64 = 1.0 / b;
    let mut h: f64 = d;
    for i in 1..=MAX_ITERATIONS {
        let i: f64 = i as f64;
        let an: f64 = -i * (i - a);
        b += 2.0;
        d = an * d + b;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = b + an / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let del: f64 = d * c;
        h *= del;
        if (del - 1.0).abs() < GAMMA_EPSILON {
            break;
        }
    }

    let q: f64 = prefactor * h;
    return 1.0 - q;
}

/// The regularized [incomplete beta function](https://en.wikipedia.org/wiki/Beta_function#Incomplete_beta_function)
/// `I_x(a, b)`.
///
/// Returns [PowerError::NonPositive] if `a <= 0` or `b <= 0` and
/// [PowerError::NanErr] if any input is a NaN. For `x <= 0` the result is
/// `0.0` and for `1 <= x` it is `1.0`.
pub fn reg_incomplete_beta(x: f64, a: f64, b: f64) -> Result<f64, PowerError> {
    if x.is_nan() || a.is_nan() || b.is_nan() {
        return Err(PowerError::NanErr);
    }
    if a <= 0.0 {
        return Err(PowerError::NonPositive { name: "a", value: a });
    }
    if b <= 0.0 {
        return Err(PowerError::NonPositive { name: "b", value: b });
    }
    return Ok(reg_incomplete_beta_unchecked(x, a, b));
}

/// [reg_incomplete_beta] without checking the inputs. Assumes `0 < a` and `0 < b`.
///
/// When `(a + 1) / (a + b + 2) <= x` the symmetry `I_x(a, b) = 1 - I_{1-x}(b, a)`
/// is used so the continued fraction converges quickly.
#[must_use]
pub(crate) fn reg_incomplete_beta_unchecked(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if 1.0 <= x {
        return 1.0;
    }

    let bt: f64 =
        (ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln()).exp();

    if x < (a + 1.0) / (a + b + 2.0) {
        return bt * beta_continued_fraction(a, b, x) / a;
    }
    return 1.0 - bt * beta_continued_fraction(b, a, 1.0 - x) / b;
}

/// Continued fraction for the incomplete beta (modified Lentz algorithm).
fn beta_continued_fraction(a: f64, b: f64, x: f64) -> f64 {
    let qab: f64 = a + b;
    let qap: f64 = a + 1.0;
    let qam: f64 = a - 1.0;

    let mut c: f64 = 1.0;
    let mut d: f64 = 1.0 - qab * x / qap;
    if d.abs() < FPMIN {
        d = FPMIN;
    }
    d = 1.0 / d;
    let mut h: f64 = d;

    for m in 1..=MAX_ITERATIONS {
        let m: f64 = m as f64;
        let m2: f64 = 2.0 * m;

        // even step
        let aa: f64 = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        h *= d * c;

        // odd step
        let aa: f64 = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let del: f64 = d * c;
        h *= del;

        if (del - 1.0).abs() < BETA_EPSILON {
            break;
        }
    }

    return h;
}
