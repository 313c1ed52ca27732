//! Mode-n product (TTM - Tensor Times Matrix) for 3-way tensors
//!
//! For X ∈ ℝ^(I₁×I₂×I₃) and M ∈ ℝ^(J×Iₙ), the product Y = X ×ₙ M replaces the
//! mode-n extent with J:
//!
//! Y₍ₙ₎ = M · X₍ₙ₎
//!
//! Products are evaluated in `f64` through the matricization of `trimode-core`
//! and folded back with the same convention.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::ArrayView2;
use trimode_core::{Mode, Tensor3};

/// Compute Y = X ×ₙ M
///
/// # Arguments
///
/// * `tensor` - Input tensor with extents (I₁, I₂, I₃)
/// * `matrix` - Matrix with shape (J, Iₙ)
/// * `mode` - The mode to contract
///
/// # Errors
///
/// Returns [`KernelError::DimensionMismatch`] if the matrix columns do not
/// match the mode-n extent.
///
/// # Complexity
///
/// Time: O(J · I₁I₂I₃)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use trimode_core::{Mode, Tensor3};
/// use trimode_kernels::mode_product;
///
/// let tensor = Tensor3::<f64>::ones([2, 3, 4]);
/// let matrix = array![[1.0, 1.0, 1.0]];
///
/// let y = mode_product(&tensor, &matrix.view(), Mode::Frontal).unwrap();
/// assert_eq!(y.shape(), [2, 1, 4]);
/// assert_eq!(y[[1, 0, 3]], 3.0);
/// ```
pub fn mode_product(
    tensor: &Tensor3<f64>,
    matrix: &ArrayView2<f64>,
    mode: Mode,
) -> KernelResult<Tensor3<f64>> {
    let shape = tensor.shape();
    let n = mode.index();

    if matrix.ncols() != shape[n] {
        return Err(KernelError::dimension_mismatch(
            "mode_product",
            vec![matrix.nrows(), shape[n]],
            vec![matrix.nrows(), matrix.ncols()],
            format!("Matrix columns must match the mode-{} extent", n),
        ));
    }

    let unfolded = tensor.unfold_mode(mode);
    let product = matrix.dot(&unfolded);

    let mut new_shape = shape;
    new_shape[n] = matrix.nrows();

    Tensor3::fold(&product, new_shape, n)
        .map_err(|e| KernelError::operation_error("mode_product", e.to_string()))
}

/// Compute Y = X ×ₙ Mᵀ without materialising the transpose
///
/// `matrix` has shape (Iₙ, J), i.e. it is a basis matrix as stored in a
/// Tucker3 factorization; this is the projection step of HOSVD.
pub fn mode_product_transposed(
    tensor: &Tensor3<f64>,
    matrix: &ArrayView2<f64>,
    mode: Mode,
) -> KernelResult<Tensor3<f64>> {
    mode_product(tensor, &matrix.t(), mode)
}

/// Mode-n product by a zero-based mode index
///
/// # Errors
///
/// Returns [`KernelError::InvalidMode`] if `mode >= 3`.
pub fn nmode_product(
    tensor: &Tensor3<f64>,
    matrix: &ArrayView2<f64>,
    mode: usize,
) -> KernelResult<Tensor3<f64>> {
    let mode = Mode::from_index(mode)
        .ok_or_else(|| KernelError::invalid_mode(mode, 3, "Tucker3 tensors have 3 modes"))?;
    mode_product(tensor, matrix, mode)
}
