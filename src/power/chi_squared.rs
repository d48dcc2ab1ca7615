//! # Chi squared tests
//!
//! Power of the [Pearson chi squared tests](https://en.wikipedia.org/wiki/Pearson%27s_chi-squared_test)
//! for a goodness of fit with `m` categories or for the independence of an
//! `r x c` contingency table.
//!
//! The effect size is Cohen's `w`. Under the alternative the statistic has a
//! [noncentral chi squared](crate::distributions::ChiSquared::NoncentralChiSquared)
//! distribution with noncentrality `lambda = w^2 * N` and:
//!
//!  - Goodness of fit: `df = m - 1`
//!  - Contingency table: `df = (r - 1) * (c - 1)`
//!

use crate::{
    errors::PowerError,
    hypothesis::{check_positive, check_sample_size, check_significance, require_power},
    solver::{SampleSizeModel, SolvedSize, solve_sample_size},
};

use super::{ChiSquaredResult, check_groups, chi_squared_test_power};

/// The layout of the data being tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ChiSquaredDesign {
    /// Compare the observed frequencies of `categories` categories
    /// (at least `2`) with the expected ones.
    GoodnessOfFit { categories: u64 },
    /// Independence of the rows and columns of a contingency table (at least
    /// `2 x 2`).
    Contingency { rows: u64, columns: u64 },
}

impl ChiSquaredDesign {
    fn validate(&self) -> Result<(), PowerError> {
        match *self {
            ChiSquaredDesign::GoodnessOfFit { categories } => {
                check_groups("categories", categories, 2)?;
            }
            ChiSquaredDesign::Contingency { rows, columns } => {
                check_groups("rows", rows, 2)?;
                check_groups("columns", columns, 2)?;
            }
        }
        return Ok(());
    }

    /// The degrees of freedom of the test.
    ///
    /// Empty designs (0 categories, rows or columns) have `0` degrees of
    /// freedom. They are rejected by the calculators.
    #[must_use]
    pub const fn degrees_of_freedom(&self) -> u64 {
        return match *self {
            ChiSquaredDesign::GoodnessOfFit { categories } => categories.saturating_sub(1),
            ChiSquaredDesign::Contingency { rows, columns } => rows
                .saturating_sub(1)
                .saturating_mul(columns.saturating_sub(1)),
        };
    }

    /// The number of cells of the table.
    #[must_use]
    pub const fn cells(&self) -> u64 {
        return match *self {
            ChiSquaredDesign::GoodnessOfFit { categories } => categories,
            ChiSquaredDesign::Contingency { rows, columns } => rows.saturating_mul(columns),
        };
    }
}

struct ChiSquaredTest {
    alpha: f64,
    w: f64,
    design: ChiSquaredDesign,
}

impl ChiSquaredTest {
    fn new(alpha: f64, w: f64, design: ChiSquaredDesign) -> Result<Self, PowerError> {
        check_significance(alpha)?;
        check_positive("w", w)?;
        design.validate()?;
        return Ok(ChiSquaredTest { alpha, w, design });
    }

    fn result(&self, n: u64, power: f64) -> ChiSquaredResult {
        return ChiSquaredResult {
            n,
            df: self.design.degrees_of_freedom(),
            power,
        };
    }
}

impl SampleSizeModel for ChiSquaredTest {
    /// At least 1 observation per cell.
    fn minimum_size(&self) -> u64 {
        return self.design.cells();
    }

    fn power_at(&self, n: u64) -> Result<f64, PowerError> {
        let lambda: f64 = self.w * self.w * n as f64;
        return chi_squared_test_power(self.alpha, self.design.degrees_of_freedom(), lambda);
    }
}

/// Computes the total sample size needed to detect the effect `w`.
///
/// ## Inputs
///
/// 1. `alpha`: the significance level (`0 < alpha < 1`).
/// 2. `power`: the target power (`0 < power < 1`). Required.
/// 3. `w`: Cohen's w. Must be strictly positive.
/// 4. `design`: goodness of fit or contingency table.
///
/// ```
/// use PowerAnalysis::power::chi_squared::{self, ChiSquaredDesign};
///
/// let result = chi_squared::a_priori_n()
///     .alpha(0.05)
///     .power(0.8)
///     .w(0.3)
///     .design(ChiSquaredDesign::Contingency { rows: 2, columns: 3 })
///     .call()
///     .unwrap();
/// assert_eq!(result.df, 2);
/// assert_eq!(result.n, 108);
/// ```
#[bon::builder]
pub fn a_priori_n(
    alpha: f64,
    power: Option<f64>,
    w: f64,
    design: ChiSquaredDesign,
) -> Result<ChiSquaredResult, PowerError> {
    let target: f64 = require_power(power)?;
    let model: ChiSquaredTest = ChiSquaredTest::new(alpha, w, design)?;
    let solved: SolvedSize = solve_sample_size(&model, target)?;

    return Ok(model.result(solved.n, solved.power));
}

/// Computes the power of the test with `n` observations (at least one per cell).
#[bon::builder]
pub fn posthoc_power(
    alpha: f64,
    n: u64,
    w: f64,
    design: ChiSquaredDesign,
) -> Result<ChiSquaredResult, PowerError> {
    let model: ChiSquaredTest = ChiSquaredTest::new(alpha, w, design)?;
    check_sample_size("n", n, model.minimum_size())?;
    let power: f64 = model.power_at(n)?;

    return Ok(model.result(n, power));
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn sample_sizes() {
        struct Round {
            design: ChiSquaredDesign,
            w: f64,
            df: u64,
            n: u64,
        }

        let rounds = [
            Round {
                design: ChiSquaredDesign::GoodnessOfFit { categories: 2 },
                w: 0.3,
                df: 1,
                n: 88,
            },
            Round {
                design: ChiSquaredDesign::GoodnessOfFit { categories: 4 },
                w: 0.3,
                df: 3,
                n: 122,
            },
            Round {
                design: ChiSquaredDesign::Contingency {
                    rows: 2,
                    columns: 4,
                },
                w: 0.3,
                df: 3,
                n: 122,
            },
            Round {
                design: ChiSquaredDesign::Contingency {
                    rows: 3,
                    columns: 3,
                },
                w: 0.5,
                df: 4,
                n: 48,
            },
        ];

        for round in rounds {
            let result: ChiSquaredResult = a_priori_n()
                .alpha(0.05)
                .power(0.8)
                .w(round.w)
                .design(round.design)
                .call()
                .unwrap();
            assert_eq!(result.df, round.df);
            assert_eq!(result.n, round.n, "{:?}", round.design);
            assert!(0.8 <= result.power);
        }
    }

    #[test]
    fn one_degree_of_freedom_is_a_z_test() {
        // lambda = 0.09 * 88 = 7.92, delta = sqrt(lambda)
        let result: ChiSquaredResult = posthoc_power()
            .alpha(0.05)
            .n(88)
            .w(0.3)
            .design(ChiSquaredDesign::GoodnessOfFit { categories: 2 })
            .call()
            .unwrap();
        let delta: f64 = 7.92_f64.sqrt();
        let z: f64 = crate::hypothesis::Tail::TwoSided
            .z_test_power(0.05, delta)
            .unwrap();
        assert_approx_eq!(result.power, z, 1e-5);
    }

    #[test]
    fn empty_designs() {
        struct Round {
            design: ChiSquaredDesign,
            df: u64,
            cells: u64,
        }

        let rounds = [
            Round {
                design: ChiSquaredDesign::GoodnessOfFit { categories: 0 },
                df: 0,
                cells: 0,
            },
            Round {
                design: ChiSquaredDesign::Contingency {
                    rows: 0,
                    columns: 3,
                },
                df: 0,
                cells: 0,
            },
            Round {
                design: ChiSquaredDesign::Contingency {
                    rows: u64::MAX,
                    columns: 3,
                },
                df: u64::MAX,
                cells: u64::MAX,
            },
        ];

        for round in rounds {
            assert_eq!(round.design.degrees_of_freedom(), round.df);
            assert_eq!(round.design.cells(), round.cells);
        }

        let empty: ChiSquaredDesign = ChiSquaredDesign::GoodnessOfFit { categories: 0 };
        assert!(a_priori_n().alpha(0.05).power(0.8).w(0.3).design(empty).call().is_err());
        assert_eq!(
            posthoc_power().alpha(0.05).n(100).w(0.3).design(empty).call(),
            Err(PowerError::TooFewGroups {
                name: "categories",
                value: 0,
                minimum: 2
            })
        );
    }

    #[test]
    fn invalid_inputs() {
        let table: ChiSquaredDesign = ChiSquaredDesign::Contingency {
            rows: 1,
            columns: 3,
        };
        assert!(posthoc_power().alpha(0.05).n(100).w(0.3).design(table).call().is_err());
        let fit: ChiSquaredDesign = ChiSquaredDesign::GoodnessOfFit { categories: 5 };
        assert!(posthoc_power().alpha(0.05).n(4).w(0.3).design(fit).call().is_err());
        assert!(a_priori_n().alpha(0.05).power(0.8).w(0.0).design(fit).call().is_err());
    }
}
