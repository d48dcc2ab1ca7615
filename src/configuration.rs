//! This file contains the deafult values and other value choices used trough the library.
//!
//! Every iterative algorithm in the library is bounded by a fixed number of
//! iterations and a tolerance. Changing them changes the numerical results,
//! so the values below are the ones the reference results were computed with.

/// Caps and tolerances of the series and continued fractions used in
/// [crate::euclid].
pub mod special_functions {

    /// Maximum number of terms of the series of the lower incomplete gamma
    /// function and maximum iterations of the continued fractions (both for
    /// the incomplete gamma and the incomplete beta).
    pub const MAX_ITERATIONS: usize = 200;

    /// The series of the incomplete gamma stops when the increment is smaller
    /// than `GAMMA_EPSILON * sum`. It is also the stopping criteria of the
    /// continued fraction for the upper incomplete gamma.
    pub const GAMMA_EPSILON: f64 = 1e-14;

    /// Convergence tolerance of the continued fraction of the incomplete beta.
    pub const BETA_EPSILON: f64 = 3e-14;

    /// Floor value for the modified Lentz algorithm. Avoids divisions by
    /// (almost) 0.
    pub const FPMIN: f64 = 1e-300;

    /// The Lanczos approximation uses `g = 7`.
    pub const LANCZOS_G: f64 = 7.0;

    /// Lanczos coefficients for `g = 7`, 9 terms.
    pub const LANCZOS_COEFFICIENTS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];
}

/// Truncation of the Poisson mixtures of the noncentral distributions.
///
/// The mixture weights are a Poisson pmf with mean `lambda / 2`. Once past the
/// mode, the weights decay super-exponentially, so the sum can be stopped as
/// soon as the weight becomes small.
pub mod noncentral {
    /// Weight under wich the noncentral chi squared mixture stops.
    pub const CHI_SQUARED_WEIGHT_EPSILON: f64 = 1e-12;
    /// Maximum number of terms of the noncentral chi squared mixture.
    pub const CHI_SQUARED_MAX_TERMS: usize = 5000;

    /// Weight under wich the noncentral F mixture stops.
    pub const F_WEIGHT_EPSILON: f64 = 1e-10;
    /// Maximum number of terms of the noncentral F mixture.
    pub const F_MAX_TERMS: usize = 2000;
}

/// Values used by the root finder and by the sample size search.
pub mod root_finding {
    /// Default tolerance of [crate::root_finding::bisection].
    pub const DEFAULT_TOLERANCE: f64 = 1e-7;
    /// Default maximum number of iterations of [crate::root_finding::bisection].
    pub const DEFAULT_MAX_ITERATIONS: usize = 200;

    /// Tolerance used when inverting a cdf to get a critical value.
    pub const QUANTILE_TOLERANCE: f64 = 1e-8;

    /// Maximum number of times the upper bound is doubled while looking for
    /// a critical value. `2^64` is far beyond any critical value of interest.
    pub const QUANTILE_MAX_DOUBLINGS: usize = 64;

    /// Tolerance of the bisection over the sample size.
    pub const SAMPLE_SIZE_TOLERANCE: f64 = 1e-6;

    /// The sample size search gives up (with
    /// [crate::errors::PowerError::BracketNotFound]) if more than this
    /// amount of subjects would be needed.
    pub const MAX_SAMPLE_SIZE: u64 = 10_000_000;

    /// Smallest upper bound tried by the sample size search.
    pub const INITIAL_UPPER_BOUND: u64 = 20;
}
