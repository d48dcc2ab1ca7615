//! # Poisson distribution
//!
//! The [Poisson distribution](https://en.wikipedia.org/wiki/Poisson_distribution)
//! is a discrete distribution that counts the number of poisson events in a
//! given time with a given rate.
//!
//! In this library it is used as the mixing distribution of the noncentral
//! distributions: a noncentral chi squared (or F) with noncentrality `lambda`
//! is a Poisson mixture, with mean `lambda / 2`, of central chi squared (or F)
//! distributions with increasing degrees of freedom. See [Poisson::mixture].

use crate::{errors::PowerError, euclid::ln_gamma};

#[derive(Debug, Clone, PartialEq)]
pub struct Poisson {
    lambda: f64,
}

impl Poisson {
    /// Creates a new [Poisson] distribution.
    ///
    ///  - `lambda` indicates rate. And must fullfill:
    ///      - Must be finite (no `+-inf` nor NaNs)
    ///      - `0.0 < lambda`
    ///
    /// Otherwise an error will be returned.
    pub fn new(lambda: f64) -> Result<Poisson, PowerError> {
        if lambda.is_nan() {
            return Err(PowerError::NanErr);
        }
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(PowerError::NonPositive {
                name: "lambda",
                value: lambda,
            });
        }

        return Ok(Poisson { lambda });
    }

    /// Returns the value of `lambda`
    #[must_use]
    pub const fn get_lambda(&self) -> f64 {
        return self.lambda;
    }

    /// Evaluates the pmf at `i`.
    #[must_use]
    pub fn pmf(&self, i: usize) -> f64 {
        /* Usual definition:
         > P(i | lambda) = exp(-lambda) * lambda^i / i!

        But for better precision (and no underflow of exp(-lambda) for a
        large lambda), we will use the following alternative equivalent:

         > P(i | lambda) = exp( i * ln(lambda) - lambda - ln(Gamma(i + 1)) )
        */
        let i: f64 = i as f64;
        return (i * self.lambda.ln() - self.lambda - ln_gamma(i + 1.0)).exp();
    }

    /// Computes the mixture `sum_i pmf(i) * f(i)`.
    ///
    /// The sum stops after `max_terms` terms, or when the weight `pmf(i)` is
    /// smaller than `epsilon` once `i` is past the mode of the distribution.
    /// Before the mode the weights are increasing, so a small weight there
    /// does not mean the remaining mass is small.
    pub fn mixture<G>(&self, epsilon: f64, max_terms: usize, f: G) -> f64
    where
        G: Fn(usize) -> f64,
    {
        let mut sum: f64 = 0.0;
        for i in 0..max_terms {
            let weight: f64 = self.pmf(i);
            sum += weight * f(i);
            if weight < epsilon && self.lambda < i as f64 {
                return sum;
            }
        }

        log::trace!(
            "Poisson mixture truncated after {max_terms} terms (lambda = {})",
            self.lambda
        );
        return sum;
    }
}
