//! Core projection and multilinear reconstruction
//!
//! Given a tensor X (I₁×I₂×I₃) and basis matrices Uₙ (Iₙ×Jₙ):
//!
//! ```text
//! G = X ×₁ U₁ᵀ ×₂ U₂ᵀ ×₃ U₃ᵀ                       (projection, J₁×J₂×J₃)
//! X̂ = G ×₁ U₁ ×₂ U₂ ×₃ U₃                          (reconstruction, I₁×I₂×I₃)
//! ```
//!
//! Both directions accumulate in `f64` regardless of the storage scalar type.
//! [`project_core_direct`] evaluates the projection as one six-fold sum and is
//! the reference; [`project_core`] chains three mode products, which costs
//! O(I₁I₂I₃·max Jₙ) instead of O(I₁I₂I₃·J₁J₂J₃).

use crate::error::{KernelError, KernelResult};
use crate::nmode::{mode_product, mode_product_transposed};
use scirs2_core::ndarray_ext::Array2;
use scirs2_core::numeric::{Float, NumCast};
use trimode_core::{Mode, Shape3, Tensor3};

fn widen<T: Float>(matrix: &Array2<T>) -> Array2<f64> {
    matrix.mapv(|x| x.to_f64().unwrap_or(f64::NAN))
}

fn narrow<T: Float>(value: f64) -> T {
    <T as NumCast>::from(value).unwrap_or_else(T::nan)
}

/// Check that every factor has `rows[n]` rows and `cols[n]` columns
fn check_factors<T>(
    operation: &str,
    factors: &[Array2<T>; 3],
    rows: Shape3,
    cols: Shape3,
) -> KernelResult<()> {
    for (mode, factor) in factors.iter().enumerate() {
        if factor.dim() != (rows[mode], cols[mode]) {
            return Err(KernelError::factor_mismatch(
                operation,
                mode,
                (rows[mode], cols[mode]),
                factor.dim(),
            ));
        }
    }
    Ok(())
}

/// Latent extents implied by a set of basis matrices
pub fn factor_ranks<T>(factors: &[Array2<T>; 3]) -> Shape3 {
    [factors[0].ncols(), factors[1].ncols(), factors[2].ncols()]
}

/// Ambient extents implied by a set of basis matrices
pub fn factor_extents<T>(factors: &[Array2<T>; 3]) -> Shape3 {
    [factors[0].nrows(), factors[1].nrows(), factors[2].nrows()]
}

/// Project a tensor onto three bases by the direct contraction
///
/// `core[j1,j2,j3] = Σ U1[i1,j1]·U2[i2,j2]·U3[i3,j3]·data[i1,i2,i3]`
///
/// # Errors
///
/// Returns [`KernelError::FactorMismatch`] if a factor's row count differs
/// from the corresponding tensor extent.
///
/// # Complexity
///
/// Time: O(I₁I₂I₃ · J₁J₂J₃)
pub fn project_core_direct<T>(data: &Tensor3<T>, factors: &[Array2<T>; 3]) -> KernelResult<Tensor3<T>>
where
    T: Float,
{
    let ranks = factor_ranks(factors);
    check_factors("project_core_direct", factors, data.shape(), ranks)?;

    let x = data.to_f64();
    let [u1, u2, u3] = [widen(&factors[0]), widen(&factors[1]), widen(&factors[2])];
    let [i1_len, i2_len, i3_len] = data.shape();

    let core = Tensor3::from_fn(ranks, |j1, j2, j3| {
        let mut sum = 0.0f64;
        for i3 in 0..i3_len {
            for i1 in 0..i1_len {
                let outer = u1[[i1, j1]] * u3[[i3, j3]];
                for i2 in 0..i2_len {
                    sum += outer * u2[[i2, j2]] * x[[i1, i2, i3]];
                }
            }
        }
        narrow::<T>(sum)
    });

    Ok(core)
}

/// Project a tensor onto three bases by sequential mode products
///
/// Numerically equivalent to [`project_core_direct`] within rounding.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array2;
/// use trimode_core::Tensor3;
/// use trimode_kernels::project_core;
///
/// let data = Tensor3::<f64>::ones([3, 4, 5]);
/// let factors = [Array2::eye(3), Array2::eye(4), Array2::eye(5)];
/// let core = project_core(&data, &factors).unwrap();
/// assert_eq!(core, data);
/// ```
pub fn project_core<T>(data: &Tensor3<T>, factors: &[Array2<T>; 3]) -> KernelResult<Tensor3<T>>
where
    T: Float,
{
    check_factors("project_core", factors, data.shape(), factor_ranks(factors))?;

    let mut result = Tensor3::from_array(data.to_f64());
    for mode in Mode::ALL {
        let factor = widen(&factors[mode.index()]);
        result = mode_product_transposed(&result, &factor.view(), mode)?;
    }

    Ok(Tensor3::from_f64(result.as_array()))
}

/// Project onto every basis except `skip`
///
/// Returns X ×ₘ Uₘᵀ for m ≠ skip, in `f64`. The skipped mode keeps its
/// ambient extent; this is the intermediate HOOI unfolds to update one basis.
pub fn project_all_but<T>(
    data: &Tensor3<T>,
    factors: &[Array2<T>; 3],
    skip: Mode,
) -> KernelResult<Tensor3<f64>>
where
    T: Float,
{
    check_factors("project_all_but", factors, data.shape(), factor_ranks(factors))?;

    let mut result = Tensor3::from_array(data.to_f64());
    for mode in Mode::ALL.into_iter().filter(|&m| m != skip) {
        let factor = widen(&factors[mode.index()]);
        result = mode_product_transposed(&result, &factor.view(), mode)?;
    }
    Ok(result)
}

/// Expand a core through three bases: X̂ = G ×₁ U₁ ×₂ U₂ ×₃ U₃
///
/// # Errors
///
/// Returns [`KernelError::FactorMismatch`] if a factor's column count differs
/// from the corresponding core extent.
///
/// # Complexity
///
/// Time: O(I₁I₂I₃ · max Jₙ) for roughly cubic shapes
pub fn multilinear_product<T>(core: &Tensor3<T>, factors: &[Array2<T>; 3]) -> KernelResult<Tensor3<T>>
where
    T: Float,
{
    check_factors("multilinear_product", factors, factor_extents(factors), core.shape())?;

    let mut result = Tensor3::from_array(core.to_f64());
    for mode in Mode::ALL {
        let factor = widen(&factors[mode.index()]);
        result = mode_product(&result, &factor.view(), mode)?;
    }

    Ok(Tensor3::from_f64(result.as_array()))
}

/// Parallel variant of [`project_core_direct`], one task per core entry
#[cfg(feature = "parallel")]
pub fn project_core_direct_parallel<T>(
    data: &Tensor3<T>,
    factors: &[Array2<T>; 3],
) -> KernelResult<Tensor3<T>>
where
    T: Float + Send + Sync,
{
    use scirs2_core::parallel_ops::*;

    let ranks = factor_ranks(factors);
    check_factors("project_core_direct_parallel", factors, data.shape(), ranks)?;

    let x = data.to_f64();
    let [u1, u2, u3] = [widen(&factors[0]), widen(&factors[1]), widen(&factors[2])];
    let [i1_len, i2_len, i3_len] = data.shape();
    let [j1_len, j2_len, j3_len] = ranks;

    let values: Vec<f64> = (0..j1_len * j2_len * j3_len)
        .into_par_iter()
        .map(|flat| {
            let (j1, rem) = (flat / (j2_len * j3_len), flat % (j2_len * j3_len));
            let (j2, j3) = (rem / j3_len, rem % j3_len);
            let mut sum = 0.0f64;
            for i3 in 0..i3_len {
                for i1 in 0..i1_len {
                    let outer = u1[[i1, j1]] * u3[[i3, j3]];
                    for i2 in 0..i2_len {
                        sum += outer * u2[[i2, j2]] * x[[i1, i2, i3]];
                    }
                }
            }
            sum
        })
        .collect();

    Tensor3::from_vec(values.into_iter().map(narrow::<T>).collect(), ranks)
        .map_err(|e| KernelError::operation_error("project_core_direct_parallel", e.to_string()))
}
