//! # trimode-kernels
//!
//! Numerical kernels behind Tucker3 decompositions of 3-way tensors.
//!
//! ## Modules
//!
//! - [`nmode`] - mode-n products (tensor times matrix)
//! - [`projection`] - core projection (direct and sequential) and multilinear
//!   reconstruction
//! - [`basis`] - column/row selection, row averaging, Gram matrices and
//!   column orthonormalisation for basis matrices
//! - [`error`] - [`KernelError`] and [`KernelResult`]
//!
//! ## Precision
//!
//! Every contraction accumulates in `f64`, whatever scalar type the operands
//! are stored in. Inputs are widened on entry and narrowed on exit.
//!
//! ## Example
//!
//! ```
//! use scirs2_core::ndarray_ext::Array2;
//! use trimode_core::Tensor3;
//! use trimode_kernels::{multilinear_product, project_core};
//!
//! let data = Tensor3::<f64>::from_fn([3, 3, 3], |i, j, k| (i + 2 * j + 3 * k) as f64);
//! let bases = [Array2::eye(3), Array2::eye(3), Array2::eye(3)];
//!
//! let core = project_core(&data, &bases).unwrap();
//! let back = multilinear_product(&core, &bases).unwrap();
//! assert!(back.max_abs_diff(&data).unwrap() < 1e-12);
//! ```
//!
//! ## Features
//!
//! - `parallel` - enables [`project_core_direct_parallel`] through
//!   `scirs2_core::parallel_ops`

pub mod basis;
pub mod error;
pub mod nmode;
pub mod projection;


pub use basis::*;
pub use error::{KernelError, KernelResult};
pub use nmode::*;
pub use projection::*;
