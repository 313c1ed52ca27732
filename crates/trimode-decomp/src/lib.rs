//! # trimode-decomp - Tucker3 decomposition of 3-way tensors
//!
//! Computes and manipulates Tucker3 (higher-order SVD) factorizations:
//!
//! ```text
//! X ≈ G ×₁ U₁ ×₂ U₂ ×₃ U₃
//! ```
//!
//! with a J₁×J₂×J₃ core G and orthonormal Iₙ×Jₙ basis matrices Uₙ.
//!
//! ## Algorithms
//!
//! - [`tucker3_hosvd`] / [`Tucker3::decompose`]: one-pass SVD of each mode
//!   unfolding, then core projection
//! - [`tucker3_hosvd_eig`] / [`Tucker3::hosvd_on_eigs`]: bases from the
//!   eigendecomposition of each mode covariance
//! - [`tucker3_hooi`] / [`Tucker3::hooi`]: HOSVD refined by higher-order
//!   orthogonal iteration
//!
//! ## Rank and resolution operators
//!
//! Operators derive a new decomposition from an existing one, never touching
//! the full tensor:
//!
//! - [`Tucker3::progressive_rank_reduction`]: fewer latent components
//! - [`Tucker3::subsampling`] / [`Tucker3::subsampling_on_average`]: coarser
//!   ambient sampling, strided or block-averaged
//! - [`Tucker3::region_of_interest`]: a spatial window
//!
//! ## Quick Start
//!
//! ```
//! use trimode_core::Tensor3;
//! use trimode_decomp::tucker3_hosvd;
//!
//! let tensor = Tensor3::<f64>::random_uniform([20, 20, 20], 0.0, 1.0);
//!
//! let tucker = tucker3_hosvd(&tensor, [5, 5, 5])?;
//! println!("Compression: {:.2}x", tucker.compression_ratio());
//! println!("Error: {:.4}", tucker.relative_error(&tensor)?);
//!
//! // Half resolution, two latent components per mode
//! let coarse = tucker.progressive_rank_reduction([2, 2, 2])?.subsampling(2)?;
//! assert_eq!(coarse.reconstruct()?.shape(), [10, 10, 10]);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: compute the three per-mode bases concurrently
//! - `serde`: `Serialize`/`Deserialize` for the configuration types
//!
//! ## SciRS2 Integration
//!
//! SVD and symmetric eigendecomposition use `scirs2_linalg`. Arrays come from
//! `scirs2_core::ndarray_ext`. All numerics run in `f64` and are narrowed to the
//! storage scalar type at the end.
//!
//! ## References
//!
//! - Kolda & Bader (2009), "Tensor Decompositions and Applications"
//! - De Lathauwer et al. (2000), "A Multilinear Singular Value Decomposition"
//! - De Lathauwer et al. (2000), "On the Best Rank-1 and Rank-(R1,R2,...,RN)
//!   Approximation of Higher-Order Tensors"

pub mod config;
pub mod error;
pub mod hooi;
pub mod hosvd;
pub mod resample;
pub mod tucker3;


// Re-exports
pub use config::*;
pub use error::*;
pub use hooi::tucker3_hooi;
pub use hosvd::{mode_singular_values, tucker3_decompose, tucker3_hosvd, tucker3_hosvd_eig};
pub use tucker3::Tucker3;
