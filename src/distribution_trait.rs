//! This script contains the interface used to comunicate with the distributions.

use crate::configuration::root_finding::{
    DEFAULT_MAX_ITERATIONS, QUANTILE_MAX_DOUBLINGS, QUANTILE_TOLERANCE,
};
use crate::domain::ContinuousDomain;
use crate::errors::PowerError;
use crate::root_finding::{self, RootResult};

/// The trait for any continuous distribution used by the library.
///
/// The only requiered methods are [Distribution::cdf] and
/// [Distribution::get_domain]. The provided [Distribution::quantile] inverts
/// the cdf numerically, wich is enough for the critical values of the tests.
/// Implementing it directly is recommended if there is a closed form or a
/// good approximation.
pub trait Distribution {
    //Requiered methods:

    /// Evaluates the [CDF](https://en.wikipedia.org/wiki/Cumulative_distribution_function)
    /// (Cumulative distribution function) at `x`.
    ///
    /// If the function is evaluated outside the domain it will return
    /// either `0.0` or `1.0`.
    fn cdf(&self, x: f64) -> f64;

    /// Returns a reference to the [ContinuousDomain] (the support) of the distribution.
    fn get_domain(&self) -> &ContinuousDomain;

    // Provided methods:

    /// The [survival function](https://en.wikipedia.org/wiki/Survival_function): `1 - cdf(x)`.
    ///
    /// The power of a test with critical value `c` is `sf(c)` evaluated under
    /// the alternative distribution.
    fn sf(&self, x: f64) -> f64 {
        return 1.0 - self.cdf(x);
    }

    /// First upper bound tried by [Distribution::quantile] before it starts doubling.
    fn quantile_search_start(&self) -> f64 {
        return 1.0;
    }

    /// Evaluates the [quantile function](https://en.wikipedia.org/wiki/Quantile_function)
    /// at `p`.
    ///
    /// The deafult implementation only works for distributions whose domain
    /// has a finite lower bound. It first doubles the upper bound (starting
    /// at [Distribution::quantile_search_start]) until `p <= cdf(hi)` and then
    /// bisects `[lower_bound, hi]`.
    ///
    /// Returns [PowerError::InvalidProbability] if `p` is not in `[0, 1)` and
    /// [PowerError::BracketNotFound] if no bracket could be found.
    fn quantile(&self, p: f64) -> Result<f64, PowerError> {
        if p.is_nan() || !(0.0..1.0).contains(&p) {
            return Err(PowerError::InvalidProbability { name: "p", value: p });
        }

        let (lo, _): (f64, f64) = self.get_domain().get_bounds();
        if !lo.is_finite() {
            // the default implementation needs a lower bound
            return Err(PowerError::OutOfRange {
                name: "lower bound of the domain",
                value: lo,
            });
        }
        if p == 0.0 {
            return Ok(lo);
        }

        let target = |x: f64| self.cdf(x) - p;
        let start: f64 = lo.max(0.0) + self.quantile_search_start();
        let hi: f64 = root_finding::expand_upper_bound(target, start, QUANTILE_MAX_DOUBLINGS)?;
        let result: RootResult = root_finding::bisection(
            target,
            lo,
            hi,
            QUANTILE_TOLERANCE,
            DEFAULT_MAX_ITERATIONS,
        )?;

        return Ok(result.root);
    }
}
