//! Error type for Tucker3 decompositions and the operators built on them

use thiserror::Error;
use trimode_kernels::KernelError;

/// Errors produced by [`Tucker3`](crate::Tucker3) construction, decomposition
/// and the rank/resolution operators.
///
/// Every variant except [`Tucker3Error::DecompositionFailure`] describes a
/// violated precondition; see [`Tucker3Error::is_precondition_violation`].
#[derive(Error, Debug)]
pub enum Tucker3Error {
    #[error("Invalid ranks: {0}")]
    InvalidRanks(String),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Invalid factor: {0}")]
    InvalidFactor(String),

    #[error("Decomposition failed for mode {mode}: {reason}")]
    DecompositionFailure { mode: usize, reason: String },

    #[error(transparent)]
    Kernel(#[from] KernelError),
}

impl Tucker3Error {
    /// True for errors caused by arguments the caller could have checked
    ///
    /// # Examples
    ///
    /// ```
    /// use trimode_decomp::Tucker3Error;
    ///
    /// assert!(Tucker3Error::InvalidFactor("0".into()).is_precondition_violation());
    /// let failure = Tucker3Error::DecompositionFailure { mode: 1, reason: "no convergence".into() };
    /// assert!(!failure.is_precondition_violation());
    /// ```
    pub fn is_precondition_violation(&self) -> bool {
        !matches!(self, Tucker3Error::DecompositionFailure { .. })
    }
}

/// Result alias for Tucker3 operations
pub type Tucker3Result<T> = Result<T, Tucker3Error>;
