//! Basis-matrix kernels: column/row selection, row averaging, Gram matrices,
//! block power steps and column orthonormalisation.
//!
//! Basis matrices are stored ambient-rows × latent-columns, so latent rank is
//! changed by selecting columns and spatial resolution by selecting rows.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{Array1, Array2, ArrayView2};
use scirs2_core::numeric::{Float, NumCast};

/// Copy the first `k` columns of `matrix`
///
/// # Errors
///
/// Returns an error if `k` exceeds the column count.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use trimode_kernels::leading_columns;
///
/// let m = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
/// let lead = leading_columns(&m.view(), 2).unwrap();
/// assert_eq!(lead, array![[1.0, 2.0], [4.0, 5.0]]);
/// ```
pub fn leading_columns<T: Clone>(matrix: &ArrayView2<T>, k: usize) -> KernelResult<Array2<T>> {
    if k > matrix.ncols() {
        return Err(KernelError::dimension_mismatch(
            "leading_columns",
            vec![matrix.nrows(), k],
            vec![matrix.nrows(), matrix.ncols()],
            "Cannot take more columns than the matrix has",
        ));
    }
    Ok(Array2::from_shape_fn((matrix.nrows(), k), |(i, j)| {
        matrix[[i, j]].clone()
    }))
}

/// Copy the rows listed in `rows`, in order
///
/// # Errors
///
/// Returns an error if any row index is out of range.
pub fn select_rows<T, I>(matrix: &ArrayView2<T>, rows: I) -> KernelResult<Array2<T>>
where
    T: Clone + scirs2_core::numeric::Zero,
    I: IntoIterator<Item = usize>,
{
    let rows: Vec<usize> = rows.into_iter().collect();
    if let Some(&bad) = rows.iter().find(|&&r| r >= matrix.nrows()) {
        return Err(KernelError::dimension_mismatch(
            "select_rows",
            vec![matrix.nrows()],
            vec![bad + 1],
            format!("Row {} out of range", bad),
        ));
    }

    let mut result = Array2::<T>::zeros((rows.len(), matrix.ncols()));
    for (dst, &src) in rows.iter().enumerate() {
        result.row_mut(dst).assign(&matrix.row(src));
    }
    Ok(result)
}

/// Average consecutive blocks of `factor` rows
///
/// Output row i is the mean of input rows `[i·factor, min(i·factor + factor, rows))`;
/// the last block holds fewer rows when `rows` is not a multiple of `factor`.
///
/// # Errors
///
/// Returns an error if `factor` is zero.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use trimode_kernels::average_rows;
///
/// let m = array![[1.0], [3.0], [5.0], [7.0], [10.0]];
/// let avg = average_rows(&m.view(), 2).unwrap();
/// assert_eq!(avg, array![[2.0], [6.0], [10.0]]);
/// ```
pub fn average_rows<T: Float>(matrix: &ArrayView2<T>, factor: usize) -> KernelResult<Array2<T>> {
    if factor == 0 {
        return Err(KernelError::operation_error(
            "average_rows",
            "Averaging factor must be at least 1",
        ));
    }

    let rows = matrix.nrows();
    let out_rows = rows.div_ceil(factor);
    let mut result = Array2::<T>::zeros((out_rows, matrix.ncols()));

    for (dst, start) in (0..rows).step_by(factor).enumerate() {
        let end = (start + factor).min(rows);
        let mut acc: Array1<T> = matrix.row(start).to_owned();
        for src in (start + 1)..end {
            acc = acc + matrix.row(src);
        }
        let count = <T as NumCast>::from(end - start).unwrap_or_else(T::one);
        result.row_mut(dst).assign(&acc.mapv(|x| x / count));
    }

    Ok(result)
}

/// Gram matrix M·Mᵀ (the mode covariance of an unfolding)
pub fn gram(matrix: &ArrayView2<f64>) -> Array2<f64> {
    matrix.dot(&matrix.t())
}

/// One block power step M·(Mᵀ·U), each column rescaled to unit length
///
/// Column j of the result depends only on column j of `basis`. Zero and
/// non-finite columns are returned unscaled.
///
/// # Errors
///
/// Returns an error if `basis` does not have one row per row of `matrix`.
pub fn power_step(matrix: &ArrayView2<f64>, basis: &ArrayView2<f64>) -> KernelResult<Array2<f64>> {
    if basis.nrows() != matrix.nrows() {
        return Err(KernelError::dimension_mismatch(
            "power_step",
            vec![matrix.nrows(), basis.ncols()],
            vec![basis.nrows(), basis.ncols()],
            "Basis rows must match matrix rows",
        ));
    }

    let mut product = matrix.dot(&matrix.t().dot(basis));
    for mut column in product.columns_mut() {
        let norm = column.dot(&column).sqrt();
        if norm > 0.0 && norm.is_finite() {
            column.mapv_inplace(|x| x / norm);
        }
    }
    Ok(product)
}

/// Largest absolute deviation of UᵀU from the identity
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array2;
/// use trimode_kernels::orthonormality_error;
///
/// let eye = Array2::<f64>::eye(4);
/// assert_eq!(orthonormality_error(&eye.view()), 0.0);
/// ```
pub fn orthonormality_error<T: Float>(matrix: &ArrayView2<T>) -> f64 {
    let wide = matrix.mapv(|x| x.to_f64().unwrap_or(f64::NAN));
    let product = wide.t().dot(&wide);
    product
        .indexed_iter()
        .map(|((i, j), &v)| {
            let target = if i == j { 1.0 } else { 0.0 };
            (v - target).abs()
        })
        .fold(0.0, f64::max)
}

/// Remove from `v` its components along the first `count` columns of `q`
fn orthogonalize_against(v: &mut Array1<f64>, q: &Array2<f64>, count: usize) {
    // Two passes of modified Gram-Schmidt
    for _ in 0..2 {
        for j in 0..count {
            let qj = q.column(j);
            let proj = qj.dot(&*v);
            v.scaled_add(-proj, &qj);
        }
    }
}

/// Orthonormalise the columns of `matrix` in order
///
/// Column j of the result depends only on input columns `0..=j`, so truncating
/// the output to its first k columns equals orthonormalising the first k input
/// columns. Columns that are numerically dependent on their predecessors (or not
/// finite) are replaced by the canonical unit vector with the largest component
/// outside the span built so far.
///
/// Returns the orthonormal matrix and the indices of replaced columns.
///
/// # Errors
///
/// Returns an error if the matrix has more columns than rows.
pub fn orthonormalize_columns(matrix: &ArrayView2<f64>) -> KernelResult<(Array2<f64>, Vec<usize>)> {
    let (rows, cols) = matrix.dim();
    if cols > rows {
        return Err(KernelError::dimension_mismatch(
            "orthonormalize_columns",
            vec![rows, rows],
            vec![rows, cols],
            "An orthonormal basis cannot have more columns than rows",
        ));
    }

    let mut q = Array2::<f64>::zeros((rows, cols));
    let mut replaced = Vec::new();

    for j in 0..cols {
        let mut v = matrix.column(j).to_owned();
        let finite = v.iter().all(|x| x.is_finite());
        let original_norm = if finite { v.dot(&v).sqrt() } else { 0.0 };

        if finite {
            orthogonalize_against(&mut v, &q, j);
        }
        let mut norm = if finite { v.dot(&v).sqrt() } else { 0.0 };

        if norm <= 1e-8 * original_norm.max(1.0) {
            let mut best: Option<(Array1<f64>, f64)> = None;
            for k in 0..rows {
                let mut e = Array1::<f64>::zeros(rows);
                e[k] = 1.0;
                orthogonalize_against(&mut e, &q, j);
                let e_norm = e.dot(&e).sqrt();
                if best.as_ref().map_or(true, |(_, n)| e_norm > *n) {
                    best = Some((e, e_norm));
                }
            }
            if let Some((e, e_norm)) = best {
                v = e;
                norm = e_norm;
            }
            replaced.push(j);
        }

        q.column_mut(j).assign(&v.mapv(|x| x / norm));
    }

    Ok((q, replaced))
}
