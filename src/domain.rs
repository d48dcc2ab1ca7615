//! A Domain represents the set of points where a function is defined.
//!
//! In this library we use it for the support of the [Distribution](crate::distribution_trait::Distribution)s.
//! It also gives the lower end of the bracket used to invert a cdf (see
//! [Distribution::quantile](crate::distribution_trait::Distribution::quantile)).
//!

/// A [domain](https://en.wikipedia.org/wiki/Domain_of_a_function) of a region
/// of the real numbers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ContinuousDomain {
    /// All real numbers
    #[default]
    Reals,
    /// All the numbers from the given value onwards.
    From(f64),
}

impl ContinuousDomain {
    /// Returns the bounds of the domain. Unbounded sides are `+-inf`.
    #[must_use]
    pub const fn get_bounds(&self) -> (f64, f64) {
        return match *self {
            ContinuousDomain::Reals => (f64::NEG_INFINITY, f64::INFINITY),
            ContinuousDomain::From(min) => (min, f64::INFINITY),
        };
    }
}
