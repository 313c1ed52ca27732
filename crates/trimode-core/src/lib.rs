//! # trimode-core
//!
//! Core 3-way tensor type and matricization for the trimode Tucker3 stack.
//!
//! This crate provides the container layer every other trimode crate builds on:
//!
//! - **Dense 3-way tensor** ([`Tensor3`]) with runtime extents `(I1, I2, I3)`
//! - **Matricization** (lateral / frontal / horizontal unfoldings and their inverse)
//! - **Norms and elementwise helpers** used to measure approximation quality
//!
//! ## SciRS2 Integration
//!
//! Arrays come from `scirs2_core::ndarray_ext`, numeric traits from
//! `scirs2_core::numeric` and random numbers from `scirs2_core::random`.
//!
//! ## Quick Start
//!
//! ```
//! use trimode_core::Tensor3;
//!
//! let tensor = Tensor3::<f64>::from_fn([2, 3, 4], |i, j, k| (i * 12 + j * 4 + k) as f64);
//! assert_eq!(tensor.shape(), [2, 3, 4]);
//! assert_eq!(tensor[[1, 2, 3]], 23.0);
//! ```
//!
//! ## Matricization
//!
//! Each unfolding puts the selected mode on the rows and flattens the two
//! remaining modes, in their original order, row-major:
//!
//! | mode | name       | shape          | column index    |
//! |------|------------|----------------|-----------------|
//! | 0    | lateral    | `I1 × I2·I3`   | `i2·I3 + i3`    |
//! | 1    | frontal    | `I2 × I1·I3`   | `i1·I3 + i3`    |
//! | 2    | horizontal | `I3 × I1·I2`   | `i1·I2 + i2`    |
//!
//! ```
//! use trimode_core::Tensor3;
//!
//! let tensor = Tensor3::<f64>::ones([2, 3, 4]);
//!
//! let frontal = tensor.frontal_matricization();
//! assert_eq!(frontal.shape(), &[3, 8]);
//!
//! let folded = Tensor3::fold(&frontal, [2, 3, 4], 1).unwrap();
//! assert_eq!(folded, tensor);
//! ```
//!
//! ## Error Handling
//!
//! Container-level shape errors are reported as `anyhow::Result`:
//!
//! ```
//! use trimode_core::Tensor3;
//!
//! let tensor = Tensor3::<f64>::zeros([2, 3, 4]);
//! assert!(tensor.unfold(3).is_err());
//! assert!(Tensor3::from_vec(vec![1.0; 5], [2, 3, 4]).is_err());
//! ```

pub mod matricization;
pub mod ops;
pub mod tensor3;

#[cfg(test)]
mod property_tests;

pub use matricization::Mode;
pub use tensor3::{Shape3, Tensor3};
