//! # trimode - Tucker3 decomposition of 3-way tensors
//!
//! This is the **meta crate** that re-exports all trimode components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use trimode::prelude::*;
//!
//! let tensor = Tensor3::<f64>::from_fn([4, 4, 4], |i, j, k| (16 * i + 4 * j + k) as f64);
//! let tucker = tucker3_hosvd(&tensor, [4, 4, 4])?;
//!
//! let recon = tucker.reconstruct()?;
//! assert!(recon.max_abs_diff(&tensor)? < 1e-5);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Tensors and matricization ([`core`])
//!
//! `Tensor3`, element access, norms and the lateral / frontal / horizontal
//! unfoldings.
//!
//! ```
//! use trimode::core::Tensor3;
//!
//! let tensor = Tensor3::<f64>::ones([2, 3, 4]);
//! assert_eq!(tensor.frontal_matricization().dim(), (3, 8));
//! ```
//!
//! ### Kernels ([`kernels`])
//!
//! Mode-n products, core projection and multilinear reconstruction.
//!
//! ```
//! use scirs2_core::ndarray_ext::Array2;
//! use trimode::core::{Mode, Tensor3};
//! use trimode::kernels::mode_product;
//!
//! let tensor = Tensor3::<f64>::ones([2, 3, 4]);
//! let y = mode_product(&tensor, &Array2::ones((5, 2)).view(), Mode::Lateral).unwrap();
//! assert_eq!(y.shape(), [5, 3, 4]);
//! ```
//!
//! ### Decompositions and operators ([`decomp`])
//!
//! HOSVD (SVD or eigen based), HOOI, rank reduction, subsampling and regions
//! of interest.
//!
//! ```
//! use trimode::core::Tensor3;
//! use trimode::decomp::tucker3_hosvd;
//!
//! let tensor = Tensor3::<f64>::random_uniform([8, 8, 8], 0.0, 1.0);
//! let tucker = tucker3_hosvd(&tensor, [3, 3, 3]).unwrap();
//! let half = tucker.subsampling(2).unwrap();
//! assert_eq!(half.ambient_shape(), [4, 4, 4]);
//! ```
//!
//! ## Features
//!
//! - `parallel`: per-mode bases computed concurrently
//! - `serde`: serialisable configuration types

pub use trimode_core as core;
pub use trimode_decomp as decomp;
pub use trimode_kernels as kernels;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use trimode::prelude::*;
    //!
    //! let tensor = Tensor3::<f64>::zeros([10, 20, 30]);
    //! ```

    // Core types
    pub use crate::core::{Mode, Shape3, Tensor3};

    // Decomposition
    pub use crate::decomp::{
        mode_singular_values, tucker3_decompose, tucker3_hooi, tucker3_hosvd, tucker3_hosvd_eig,
        BasisMethod, DecompositionConfig, HooiConfig, Tucker3, Tucker3Error, Tucker3Result,
    };

    // Common kernels
    pub use crate::kernels::{mode_product, multilinear_product, project_core};
}
