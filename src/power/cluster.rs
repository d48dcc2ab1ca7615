//! # Cluster randomized trials
//!
//! When whole clusters (schools, hospitals...) are randomized instead of
//! individuals, the observations inside a cluster are correlated and carry
//! less information. The sample size computed for an individually randomized
//! trial has to be inflated by the
//! [design effect](https://en.wikipedia.org/wiki/Design_effect):
//!
//! > DEFF = 1 + (m - 1) * ICC * (1 + CV^2)
//!
//! where `m` is the mean cluster size, `ICC` the intracluster correlation and
//! `CV` the coefficient of variation of the cluster sizes (`0.0` if all the
//! clusters have the same size).
//!

use crate::{errors::PowerError, hypothesis::check_positive};

/// Result of [adjust_for_clustering]. All the sizes are per arm.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterResult {
    /// The design effect.
    pub design_effect: f64,
    /// `ceil(n * DEFF)`: the individuals needed per arm.
    pub adjusted_n: u64,
    /// `ceil(adjusted_n / m)`: the clusters needed per arm.
    pub clusters: u64,
    /// `round(adjusted_n / DEFF)`: the information of the adjusted sample
    /// in units of independent individuals.
    pub effective_n: u64,
}

/// Inflates the sample size of an individually randomized design to a cluster
/// randomized one.
///
/// ## Inputs
///
/// 1. `n_per_arm`: the individuals per arm needed without clustering (from
///     any of the other calculators).
/// 2. `cluster_size`: the mean number of individuals per cluster (`m > 0`).
/// 3. `icc`: the intracluster correlation, in `[0, 1]`.
/// 4. `cv`: (optional) the coefficient of variation of the cluster size. The
///     default is `0.0`.
///
/// ```
/// use PowerAnalysis::power::cluster;
///
/// let result = cluster::adjust_for_clustering()
///     .n_per_arm(64)
///     .cluster_size(20.0)
///     .icc(0.05)
///     .call()
///     .unwrap();
/// assert_eq!(result.adjusted_n, 125);
/// assert_eq!(result.clusters, 7);
/// ```
#[bon::builder]
pub fn adjust_for_clustering(
    n_per_arm: u64,
    cluster_size: f64,
    icc: f64,
    #[builder(default)] cv: f64,
) -> Result<ClusterResult, PowerError> {
    check_positive("cluster_size", cluster_size)?;
    if icc.is_nan() || cv.is_nan() {
        return Err(PowerError::NanErr);
    }
    if !(0.0..=1.0).contains(&icc) {
        return Err(PowerError::OutOfRange {
            name: "icc",
            value: icc,
        });
    }
    if !cv.is_finite() || cv < 0.0 {
        return Err(PowerError::OutOfRange {
            name: "cv",
            value: cv,
        });
    }

    let design_effect: f64 = 1.0 + (cluster_size - 1.0) * icc * (1.0 + cv * cv);
    if design_effect <= 0.0 {
        // only possible for clusters smaller than 1 individual
        return Err(PowerError::NonPositive {
            name: "design_effect",
            value: design_effect,
        });
    }

    let adjusted_n: u64 = (n_per_arm as f64 * design_effect).ceil() as u64;
    let clusters: u64 = (adjusted_n as f64 / cluster_size).ceil() as u64;
    let effective_n: u64 = (adjusted_n as f64 / design_effect).round() as u64;

    log::debug!("design effect {design_effect}: {n_per_arm} -> {adjusted_n} per arm");

    return Ok(ClusterResult {
        design_effect,
        adjusted_n,
        clusters,
        effective_n,
    });
}
