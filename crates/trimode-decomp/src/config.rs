//! Configuration for decomposition runs
//!
//! All structs carry sensible defaults and builder-style setters, so the usual
//! entry point is `DecompositionConfig::default()` followed by the overrides
//! that matter.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the per-mode basis matrices are estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BasisMethod {
    /// Left singular vectors of each mode unfolding
    #[default]
    Svd,
    /// Eigenvectors of each mode covariance (unfolding × its transpose)
    ///
    /// Cheaper for very wide unfoldings but squares the condition number.
    Eigen,
}

/// Settings for HOOI (higher-order orthogonal iteration) refinement
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HooiConfig {
    /// Upper bound on refinement sweeps
    pub max_iters: usize,
    /// Stop once the relative change of the relative error drops below this
    pub tol: f64,
    /// Basis estimator used for the initial HOSVD and every sweep
    pub method: BasisMethod,
}

impl Default for HooiConfig {
    fn default() -> Self {
        Self {
            max_iters: 50,
            tol: 1e-8,
            method: BasisMethod::Svd,
        }
    }
}

impl HooiConfig {
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    pub fn with_method(mut self, method: BasisMethod) -> Self {
        self.method = method;
        self
    }
}

/// Full description of a decomposition run
///
/// # Examples
///
/// ```
/// use trimode_decomp::{BasisMethod, DecompositionConfig, HooiConfig};
///
/// let config = DecompositionConfig::default()
///     .with_method(BasisMethod::Eigen)
///     .with_refinement(HooiConfig::default().with_max_iters(10));
///
/// assert_eq!(config.method, BasisMethod::Eigen);
/// assert_eq!(config.refinement.unwrap().max_iters, 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecompositionConfig {
    /// Basis estimator for the HOSVD pass
    pub method: BasisMethod,
    /// Optional HOOI refinement after HOSVD
    pub refinement: Option<HooiConfig>,
}

impl DecompositionConfig {
    pub fn with_method(mut self, method: BasisMethod) -> Self {
        self.method = method;
        self
    }

    /// Enable HOOI refinement after the HOSVD pass
    pub fn with_refinement(mut self, refinement: HooiConfig) -> Self {
        self.refinement = Some(refinement);
        self
    }
}
