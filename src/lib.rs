#![allow(
    non_snake_case,
    clippy::needless_return,
    clippy::assign_op_pattern,
    clippy::excessive_precision
)]

#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
)]
// ^Disable warning "crate `PowerAnalysis` should have a snake case name convert the identifier to snake case: `power_analysis`"
// The rest of the names will follow the snake_case convention.

//! # Power Analysis
//!
//!
//! This library computes the [statistical power](https://en.wikipedia.org/wiki/Power_(statistics))
//! and the required sample sizes of the most common hypothesys tests:
//!
//! - [x] Special functions (error function, inverse normal, log-gamma, incomplete gamma and beta)
//! - [x] Central and noncentral chi squared and F distributions
//! - [x] Generic root finding
//! - [x] Effect size conversions
//! - [x] Sample size (a priori) and power (post hoc) for 12 families of tests
//! - [x] Design effect of cluster randomized trials
//! - [x] Updated to rust 2024 version
//!
//! ## Power and sample size
//!
//! Every family of tests in [power] has 2 functions:
//!
//!  - `a_priori_n`: given the significance level (`alpha`), the target
//!     `power` and the effect size, returns the smallest sample size reaching
//!     the target.
//!  - `posthoc_power`: given the significance level, the sample sizes and the
//!     effect size, returns the achieved power.
//!
//! The parameters are named (the functions are builders):
//!
//! ```
//! use PowerAnalysis::power::correlation;
//!
//! let result = correlation::a_priori_n().alpha(0.05).power(0.8).r(0.3).call().unwrap();
//! assert_eq!(result.n, 85);
//! ```
//!
//! The tests we have implemented:
//!
//!  - [x] [Two independent means](power::two_means) ([Wiki](https://en.wikipedia.org/wiki/Student%27s_t-test#Independent_two-sample_t-test))
//!  - [x] [Paired means](power::paired_means) ([Wiki](https://en.wikipedia.org/wiki/Student%27s_t-test#Dependent_t-test_for_paired_samples))
//!  - [x] [Two proportions](power::two_proportions) ([Wiki](https://en.wikipedia.org/wiki/Two-proportion_Z-test))
//!  - [x] [One proportion](power::one_proportion) ([Wiki](https://en.wikipedia.org/wiki/Binomial_proportion_confidence_interval))
//!  - [x] [Correlation](power::correlation) ([Wiki](https://en.wikipedia.org/wiki/Fisher_transformation))
//!  - [x] [One way ANOVA](power::anova) ([Wiki](https://en.wikipedia.org/wiki/One-way_analysis_of_variance))
//!  - [x] [Multiple regression](power::regression) ([Wiki](https://en.wikipedia.org/wiki/F-test#Regression_problems))
//!  - [x] [Chi squared tests](power::chi_squared) ([Wiki](https://en.wikipedia.org/wiki/Pearson%27s_chi-squared_test))
//!  - [x] [Poisson rates](power::poisson) ([Wiki](https://en.wikipedia.org/wiki/Poisson_regression))
//!  - [x] [Log-rank](power::logrank) ([Wiki](https://en.wikipedia.org/wiki/Logrank_test))
//!  - [x] [Equivalence (TOST)](power::equivalence) ([Wiki](https://en.wikipedia.org/wiki/Equivalence_test))
//!  - [x] [Cluster design effect](power::cluster) ([Wiki](https://en.wikipedia.org/wiki/Design_effect))
//!  - [ ] Two way ANOVA, repeated measures, McNemar, logistic regression
//!
//! ## Distributions
//!
//! The trait [Distribution](distribution_trait::Distribution) defines the
//! interface of the distributions. The only requiered methods are the
//! [cdf](distribution_trait::Distribution::cdf) and the
//! [domain](distribution_trait::Distribution::get_domain). The
//! [quantile](distribution_trait::Distribution::quantile) has a deafult
//! implementation by bisection.
//!
//!  - [x] [Normal distribution](crate::distributions::Normal) ([Wiki](https://en.wikipedia.org/wiki/Normal_distribution))
//!  - [x] [Chi-squared distribution](crate::distributions::ChiSquared) ([Wiki](https://en.wikipedia.org/wiki/Chi-squared_distribution))
//!  - [x] [F distribution](crate::distributions::F) ([Wiki](https://en.wikipedia.org/wiki/F-distribution))
//!  - [x] [Poisson distribution](crate::distributions::Poisson) ([Wiki](https://en.wikipedia.org/wiki/Poisson_distribution)) (as mixing weights)
//!
//! ## Logging
//!
//! The library logs trough the [log](https://docs.rs/log/latest/log/) facade
//! (the brackets and sample sizes found at `debug` level, non converging
//! bisections at `warn` level). No logger is installed: that is up to the
//! application.
//!
//! ## Serde
//!
//! With the `serde` feature, the results and the parameter enums implement
//! `Serialize` and `Deserialize`.
//!
//! ***
//!

pub mod configuration;
pub mod distribution_trait;
pub mod distributions;
pub mod domain;
pub mod effect_size;
pub mod errors;
pub mod euclid;
pub mod hypothesis;
pub mod power;
pub mod root_finding;
pub mod solver;
