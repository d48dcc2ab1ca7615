use thiserror::Error;

/// An enum that indicates what went wrong while computing a power or a
/// sample size.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PowerError {
    /// The significance level was set to an invalid value. (`0.0 < alpha < 1.0`)
    #[error("The significance level must be in (0, 1), got {0}. ")]
    InvalidSignificance(f64),
    /// The target power was set to an invalid value. (`0.0 < power < 1.0`)
    #[error("The target power must be in (0, 1), got {0}. ")]
    InvalidPower(f64),
    /// A probability (a proportion, a quantile level...) was outside `(0, 1)`.
    #[error("`{name}` must be a probability in (0, 1), got {value}. ")]
    InvalidProbability { name: &'static str, value: f64 },
    /// A correlation coefficient was outside `(-1, 1)`.
    #[error("The correlation must be in (-1, 1), got {0}. ")]
    InvalidCorrelation(f64),
    /// A ratio, rate or effect size that must be strictly positive was not.
    #[error("`{name}` must be strictly positive, got {value}. ")]
    NonPositive { name: &'static str, value: f64 },
    /// A parameter was outside the range where the computation makes sense.
    #[error("`{name}` is outside its valid range, got {value}. ")]
    OutOfRange { name: &'static str, value: f64 },
    /// Not enough groups, predictors or categories for the design.
    #[error("`{name}` must be at least {minimum}, got {value}. ")]
    TooFewGroups {
        name: &'static str,
        value: u64,
        minimum: u64,
    },
    /// The supplied sample size is below the structural minimum of the test.
    #[error("`{name}` must be at least {minimum}, got {value}. ")]
    NotEnoughSamples {
        name: &'static str,
        value: u64,
        minimum: u64,
    },
    /// A sample size was requested but no target power was given.
    #[error("A target power is required to compute the sample size. ")]
    MissingPower,
    /// A NaN (Not a Number) was found in the input.
    #[error("A NaN (Not a Number) was found in the input. ")]
    NanErr,
    /// The exponential search could not reach the target. This usually means
    /// that the effect size is too close to 0.
    #[error(
        "Could not find a sample size reaching the target power within the search limit. The effect size may be too small. "
    )]
    BracketNotFound,
    /// The root finder could not start.
    #[error(transparent)]
    RootFind(#[from] RootFindError),
}

/// Errors of [crate::root_finding::bisection].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RootFindError {
    /// The function returned NaN at one of the endpoints of the bracket.
    #[error("The function returned NaN at an endpoint of the bracket. ")]
    NanEvaluation,
    /// `f(a)` and `f(b)` have the same sign.
    #[error("f(a) and f(b) must have opposite signs (a = {a}, b = {b}). ")]
    NoSignChange { a: f64, b: f64 },
}
