//! HOSVD (higher-order SVD) basis estimation and decomposition
//!
//! For each mode n the basis Uₙ holds the Jₙ dominant left singular vectors of
//! the mode-n unfolding X₍ₙ₎. The core then follows by projection:
//!
//! ```text
//! G = X ×₁ U₁ᵀ ×₂ U₂ᵀ ×₃ U₃ᵀ
//! ```
//!
//! Two estimators are available (see [`BasisMethod`]): a direct SVD of the
//! unfolding, or the symmetric eigendecomposition of the mode covariance
//! X₍ₙ₎X₍ₙ₎ᵀ. Both run in `f64` whatever the storage scalar type.
//!
//! The leading vectors returned by either primitive are then refined by a
//! few block power sweeps, Uₙ ← orth(X₍ₙ₎·X₍ₙ₎ᵀ·Uₙ), which pulls them back
//! onto the dominant subspace when the primitive is only loosely converged.
//! Each sweep keeps column j a function of columns `0..=j`, so a basis of
//! rank k is the leading k columns of any higher-rank basis.
//!
//! All three bases are computed before anything is stored, so a failure in
//! any mode leaves the receiving [`Tucker3`] untouched.
//!
//! # SciRS2 Integration
//!
//! SVD and eigendecomposition come from `scirs2_linalg`; arrays from
//! `scirs2_core::ndarray_ext`.

use crate::config::{BasisMethod, DecompositionConfig};
use crate::error::{Tucker3Error, Tucker3Result};
use crate::hooi::refine;
use crate::tucker3::Tucker3;
use scirs2_core::ndarray_ext::Array2;
use scirs2_core::numeric::{Float, NumCast};
use scirs2_linalg::{eigh, svd};
use std::cmp::Ordering;
use trimode_core::{Mode, Shape3, Tensor3};
use trimode_kernels::{gram, leading_columns, orthonormalize_columns, power_step, project_core};

/// Number of leading singular values shown in debug logs
const LOGGED_VALUES: usize = 4;

/// Block power sweeps applied after the SVD or eigensolver
const POLISH_SWEEPS: usize = 2;

/// Full left basis of an unfolding, columns ordered by descending singular
/// value, together with those singular values
pub(crate) fn spectral_basis(
    unfolded: &Array2<f64>,
    mode: Mode,
    method: BasisMethod,
) -> Tucker3Result<(Array2<f64>, Vec<f64>)> {
    let failure = |reason: String| Tucker3Error::DecompositionFailure {
        mode: mode.index(),
        reason,
    };

    let (basis, values) = match method {
        BasisMethod::Svd => {
            // A tall unfolding needs the full U to expose all Iₙ columns
            let full_matrices = unfolded.ncols() < unfolded.nrows();
            let (u, s, _vt) = svd(&unfolded.view(), full_matrices, None)
                .map_err(|e| failure(format!("SVD failed: {}", e)))?;
            (u, s.to_vec())
        }
        BasisMethod::Eigen => {
            let covariance = gram(&unfolded.view());
            let (eigenvalues, eigenvectors) = eigh(&covariance.view(), None)
                .map_err(|e| failure(format!("Eigendecomposition failed: {}", e)))?;

            let mut order: Vec<usize> = (0..eigenvalues.len()).collect();
            order.sort_by(|&a, &b| {
                eigenvalues[b]
                    .partial_cmp(&eigenvalues[a])
                    .unwrap_or(Ordering::Equal)
            });

            let basis = Array2::from_shape_fn((eigenvectors.nrows(), order.len()), |(i, j)| {
                eigenvectors[[i, order[j]]]
            });
            let values = order.iter().map(|&j| eigenvalues[j].max(0.0).sqrt()).collect();
            (basis, values)
        }
    };

    if !values.iter().all(|v: &f64| v.is_finite()) {
        return Err(failure("non-finite singular values".to_string()));
    }

    Ok((basis, values))
}

/// Orthonormal rank-column basis of the column space of `unfolded`
fn polished_basis(
    unfolded: &Array2<f64>,
    mode: Mode,
    rank: usize,
    method: BasisMethod,
) -> Tucker3Result<Array2<f64>> {
    let (basis, values) = spectral_basis(unfolded, mode, method)?;

    log::debug!(
        "mode {}: unfolding {}x{}, rank {}, leading singular values {:?}",
        mode.index(),
        unfolded.nrows(),
        unfolded.ncols(),
        rank,
        &values[..values.len().min(LOGGED_VALUES)]
    );

    let mut basis = leading_columns(&basis.view(), rank)?;
    let mut replaced = Vec::new();
    for _ in 0..POLISH_SWEEPS {
        let power = power_step(&unfolded.view(), &basis.view())?;
        (basis, replaced) = orthonormalize_columns(&power.view())?;
    }
    if !replaced.is_empty() {
        log::warn!(
            "mode {}: completed null basis directions {:?} with canonical vectors",
            mode.index(),
            replaced
        );
    }

    Ok(basis)
}

/// Orthonormal Iₙ×rank basis for one mode of `data`
pub(crate) fn mode_basis(
    data: &Tensor3<f64>,
    mode: Mode,
    rank: usize,
    method: BasisMethod,
) -> Tucker3Result<Array2<f64>> {
    polished_basis(&data.unfold_mode(mode), mode, rank, method)
}

fn collect_bases(results: Vec<Tucker3Result<Array2<f64>>>) -> Tucker3Result<[Array2<f64>; 3]> {
    let bases = results.into_iter().collect::<Tucker3Result<Vec<_>>>()?;
    bases.try_into().map_err(|v: Vec<Array2<f64>>| {
        Tucker3Error::ShapeMismatch(format!("Expected 3 bases, got {}", v.len()))
    })
}

/// Bases for all three modes of `data`
#[cfg(not(feature = "parallel"))]
pub(crate) fn compute_bases(
    data: &Tensor3<f64>,
    ranks: Shape3,
    method: BasisMethod,
) -> Tucker3Result<[Array2<f64>; 3]> {
    collect_bases(
        Mode::ALL
            .iter()
            .map(|&mode| mode_basis(data, mode, ranks[mode.index()], method))
            .collect(),
    )
}

/// Bases for all three modes of `data`, one task per mode
#[cfg(feature = "parallel")]
pub(crate) fn compute_bases(
    data: &Tensor3<f64>,
    ranks: Shape3,
    method: BasisMethod,
) -> Tucker3Result<[Array2<f64>; 3]> {
    use scirs2_core::parallel_ops::*;

    collect_bases(
        Mode::ALL
            .to_vec()
            .into_par_iter()
            .map(|mode| mode_basis(data, mode, ranks[mode.index()], method))
            .collect(),
    )
}

pub(crate) fn narrow_factors<T: Float>(bases: &[Array2<f64>; 3]) -> [Array2<T>; 3] {
    let narrow = |b: &Array2<f64>| b.mapv(|x| <T as NumCast>::from(x).unwrap_or_else(T::nan));
    [narrow(&bases[0]), narrow(&bases[1]), narrow(&bases[2])]
}

impl<T> Tucker3<T>
where
    T: Float,
{
    fn estimate_bases(
        &self,
        data: &Tensor3<T>,
        method: BasisMethod,
    ) -> Tucker3Result<[Array2<f64>; 3]> {
        self.check_ambient(data)?;
        let wide = Tensor3::from_array(data.to_f64());
        compute_bases(&wide, self.latent_ranks(), method)
    }

    /// Estimate the three bases of `data` by SVD of its unfoldings
    ///
    /// Only the bases are replaced; call [`Tucker3::derive_core`] or use
    /// [`Tucker3::decompose`] to refresh the core as well.
    ///
    /// # Errors
    ///
    /// - [`Tucker3Error::ShapeMismatch`] if `data` does not have the ambient shape
    /// - [`Tucker3Error::DecompositionFailure`] if the SVD fails for any mode;
    ///   `self` is left unchanged
    pub fn hosvd(&mut self, data: &Tensor3<T>) -> Tucker3Result<()> {
        let bases = self.estimate_bases(data, BasisMethod::Svd)?;
        self.factors = narrow_factors(&bases);
        Ok(())
    }

    /// Estimate the three bases from eigendecompositions of the mode covariances
    ///
    /// Equivalent to [`Tucker3::hosvd`] up to the sign of each basis vector
    /// when the singular values are distinct.
    pub fn hosvd_on_eigs(&mut self, data: &Tensor3<T>) -> Tucker3Result<()> {
        let bases = self.estimate_bases(data, BasisMethod::Eigen)?;
        self.factors = narrow_factors(&bases);
        Ok(())
    }

    /// HOSVD followed by core projection
    ///
    /// # Examples
    ///
    /// ```
    /// use trimode_core::Tensor3;
    /// use trimode_decomp::Tucker3;
    ///
    /// let data = Tensor3::<f64>::from_fn([4, 4, 4], |i, j, k| (16 * i + 4 * j + k) as f64);
    /// let mut tucker = Tucker3::zeros([4, 4, 4], [4, 4, 4])?;
    /// tucker.decompose(&data)?;
    ///
    /// let recon = tucker.reconstruct()?;
    /// assert!(recon.max_abs_diff(&data)? < 1e-5);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn decompose(&mut self, data: &Tensor3<T>) -> Tucker3Result<()> {
        self.decompose_with(data, &DecompositionConfig::default())
            .map(|_| ())
    }

    /// Decompose `data` as described by `config`
    ///
    /// Returns the number of HOOI sweeps run (0 without refinement). Nothing is
    /// stored unless the whole run succeeds.
    pub fn decompose_with(
        &mut self,
        data: &Tensor3<T>,
        config: &DecompositionConfig,
    ) -> Tucker3Result<usize> {
        self.check_ambient(data)?;
        let wide = Tensor3::from_array(data.to_f64());
        let bases = compute_bases(&wide, self.latent_ranks(), config.method)?;

        match config.refinement {
            None => {
                let factors = narrow_factors(&bases);
                let core = project_core(data, &factors)?;
                self.core = core;
                self.factors = factors;
                Ok(0)
            }
            Some(hooi) => {
                let (bases, core, iters) = refine(&wide, bases, &hooi)?;
                self.core = Tensor3::from_f64(core.as_array());
                self.factors = narrow_factors(&bases);
                Ok(iters)
            }
        }
    }
}

/// Compute a rank-(J₁, J₂, J₃) Tucker3 decomposition by HOSVD
///
/// # Errors
///
/// Returns [`Tucker3Error::InvalidRanks`] if a rank is zero or exceeds its
/// mode extent, or [`Tucker3Error::DecompositionFailure`] if the SVD fails.
///
/// # Complexity
///
/// Time: O(Σₙ Iₙ² · I₁I₂I₃ / Iₙ) for the SVDs plus O(I₁I₂I₃ · max Jₙ) for
/// the projection
///
/// # Examples
///
/// ```
/// use trimode_core::Tensor3;
/// use trimode_decomp::tucker3_hosvd;
///
/// let tensor = Tensor3::<f64>::random_uniform([10, 10, 10], 0.0, 1.0);
/// let tucker = tucker3_hosvd(&tensor, [5, 5, 5]).unwrap();
///
/// assert_eq!(tucker.core().shape(), [5, 5, 5]);
/// assert!(tucker.orthonormality_error() < 1e-10);
/// ```
pub fn tucker3_hosvd<T>(data: &Tensor3<T>, ranks: Shape3) -> Tucker3Result<Tucker3<T>>
where
    T: Float,
{
    tucker3_decompose(data, ranks, &DecompositionConfig::default())
}

/// Like [`tucker3_hosvd`], with bases from covariance eigendecompositions
pub fn tucker3_hosvd_eig<T>(data: &Tensor3<T>, ranks: Shape3) -> Tucker3Result<Tucker3<T>>
where
    T: Float,
{
    tucker3_decompose(
        data,
        ranks,
        &DecompositionConfig::default().with_method(BasisMethod::Eigen),
    )
}

/// Decompose `data` to the given latent ranks using `config`
pub fn tucker3_decompose<T>(
    data: &Tensor3<T>,
    ranks: Shape3,
    config: &DecompositionConfig,
) -> Tucker3Result<Tucker3<T>>
where
    T: Float,
{
    let mut tucker = Tucker3::zeros(ranks, data.shape())?;
    tucker.decompose_with(data, config)?;
    Ok(tucker)
}

/// Singular values of each mode unfolding, in descending order
///
/// Useful for choosing latent ranks: the energy discarded by truncating mode n
/// to Jₙ columns is the sum of squares of the values past index Jₙ. Each value
/// is ‖X₍ₙ₎ᵀuⱼ‖ for a vector uⱼ of the full polished mode-n basis, so the
/// squares always sum to ‖X‖².
pub fn mode_singular_values<T>(data: &Tensor3<T>) -> Tucker3Result<[Vec<f64>; 3]>
where
    T: Float,
{
    let wide = Tensor3::from_array(data.to_f64());
    let values = |mode: Mode| -> Tucker3Result<Vec<f64>> {
        let unfolded = wide.unfold_mode(mode);
        let basis = polished_basis(&unfolded, mode, unfolded.nrows(), BasisMethod::Svd)?;
        let mut values: Vec<f64> = unfolded
            .t()
            .dot(&basis)
            .columns()
            .into_iter()
            .map(|c| c.dot(&c).sqrt())
            .collect();
        values.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
        Ok(values)
    };
    Ok([
        values(Mode::Lateral)?,
        values(Mode::Frontal)?,
        values(Mode::Horizontal)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flattened_index() -> Tensor3<f64> {
        Tensor3::from_fn([4, 4, 4], |i, j, k| (16 * i + 4 * j + k) as f64)
    }

    #[test]
    fn test_hosvd_full_rank_recovers_input() {
        let data = flattened_index();
        let tucker = tucker3_hosvd(&data, [4, 4, 4]).unwrap();

        let recon = tucker.reconstruct().unwrap();
        assert!(recon.max_abs_diff(&data).unwrap() < 1e-5);
        assert!(tucker.orthonormality_error() < 1e-6);
    }

    #[test]
    fn test_hosvd_truncated_shapes() {
        let data = Tensor3::<f64>::random_uniform_seeded([6, 5, 4], 0.0, 1.0, 7);
        let tucker = tucker3_hosvd(&data, [3, 2, 2]).unwrap();

        assert_eq!(tucker.core().shape(), [3, 2, 2]);
        assert_eq!(tucker.u1().dim(), (6, 3));
        assert_eq!(tucker.u2().dim(), (5, 2));
        assert_eq!(tucker.u3().dim(), (4, 2));
        assert!(tucker.orthonormality_error() < 1e-6);
    }

    #[test]
    fn test_tall_unfolding() {
        // Mode-1 unfolding is 8×2: the full U is required to get 3 columns
        let data = Tensor3::<f64>::random_uniform_seeded([8, 2, 1], -1.0, 1.0, 3);
        let tucker = tucker3_hosvd(&data, [3, 2, 1]).unwrap();
        assert_eq!(tucker.u1().dim(), (8, 3));
        assert!(tucker.orthonormality_error() < 1e-6);
        assert!(tucker.relative_error(&data).unwrap() < 1e-8);
    }

    #[test]
    fn test_eig_path_matches_svd_up_to_sign() {
        let data = Tensor3::<f64>::random_uniform_seeded([5, 4, 3], 0.0, 1.0, 11);
        let a = tucker3_hosvd(&data, [2, 2, 2]).unwrap();
        let b = tucker3_hosvd_eig(&data, [2, 2, 2]).unwrap();

        assert!(b.orthonormality_error() < 1e-6);
        for (fa, fb) in a.factors().iter().zip(b.factors().iter()) {
            for j in 0..fa.ncols() {
                let dot: f64 = fa.column(j).dot(&fb.column(j));
                assert!((dot.abs() - 1.0).abs() < 1e-6);
            }
        }
        let ea = a.relative_error(&data).unwrap();
        let eb = b.relative_error(&data).unwrap();
        assert!((ea - eb).abs() < 1e-6);
    }

    #[test]
    fn test_rank_deficient_input_stays_orthonormal() {
        // Rank-1 tensor decomposed at full rank: trailing directions are null
        let data = Tensor3::<f64>::from_fn([3, 3, 3], |i, j, k| {
            (1 + i) as f64 * (2 + j) as f64 * (3 + k) as f64
        });
        let tucker = tucker3_hosvd(&data, [3, 3, 3]).unwrap();
        assert!(tucker.orthonormality_error() < 1e-6);
        assert!(tucker.relative_error(&data).unwrap() < 1e-8);
    }

    #[test]
    fn test_exact_multilinear_rank_gives_exact_bases() {
        // Multilinear rank (2, 2, 1)
        let data = Tensor3::<f64>::from_fn([5, 4, 3], |i, j, k| {
            let a = (i as f64 + 1.0) * (j as f64 - 1.5);
            let b = (i as f64).cos() * (j as f64 + 0.5).sin();
            (a + b) * (k as f64 + 1.0)
        });

        for method in [BasisMethod::Svd, BasisMethod::Eigen] {
            for mode in Mode::ALL {
                let rank = [2, 2, 1][mode.index()];
                let basis = mode_basis(&data, mode, rank, method).unwrap();
                let unfolded = data.unfold_mode(mode);
                // X₍ₙ₎ lies in span(U): the residual of U·Uᵀ·X₍ₙ₎ vanishes
                let residual = &unfolded - &basis.dot(&basis.t().dot(&unfolded));
                let scale = unfolded.iter().map(|x| x * x).sum::<f64>().sqrt();
                let err = residual.iter().map(|x| x * x).sum::<f64>().sqrt();
                assert!(err < 1e-10 * scale, "mode {:?}: {:e}", mode, err / scale);
            }
        }

        let values = mode_singular_values(&data).unwrap();
        assert!(values[0][2] < 1e-10 * values[0][0]);
        assert!(values[2][1] < 1e-10 * values[2][0]);
    }

    #[test]
    fn test_invalid_ranks() {
        let data = flattened_index();
        assert!(matches!(
            tucker3_hosvd(&data, [5, 4, 4]),
            Err(Tucker3Error::InvalidRanks(_))
        ));
        assert!(matches!(
            tucker3_hosvd(&data, [4, 0, 4]),
            Err(Tucker3Error::InvalidRanks(_))
        ));
    }

    #[test]
    fn test_hosvd_only_replaces_bases() {
        let data = flattened_index();
        let mut tucker = Tucker3::zeros([2, 2, 2], [4, 4, 4]).unwrap();
        tucker.hosvd(&data).unwrap();

        assert!(tucker.core().as_array().iter().all(|&x| x == 0.0));
        assert!(tucker.orthonormality_error() < 1e-6);

        tucker.derive_core(&data).unwrap();
        assert!(tucker.core().frobenius_norm() > 0.0);
    }

    #[test]
    fn test_mode_singular_values_descending() {
        let data = Tensor3::<f64>::random_uniform_seeded([4, 3, 5], 0.0, 1.0, 5);
        let values = mode_singular_values(&data).unwrap();
        assert_eq!(values[0].len(), 4);
        assert_eq!(values[1].len(), 3);
        assert_eq!(values[2].len(), 5);
        for v in &values {
            assert!(v.windows(2).all(|w| w[0] >= w[1] - 1e-12));
        }
        // Each mode's squared singular values sum to ‖X‖²
        let norm_sq = data.frobenius_norm().powi(2);
        for v in &values {
            let energy: f64 = v.iter().map(|s| s * s).sum();
            assert!((energy - norm_sq).abs() < 1e-8 * norm_sq);
        }
    }

    #[test]
    fn test_f32_decomposition() {
        let data = Tensor3::<f32>::from_fn([4, 3, 2], |i, j, k| (i + 2 * j + 3 * k) as f32);
        let tucker = tucker3_hosvd(&data, [4, 3, 2]).unwrap();
        let recon = tucker.reconstruct().unwrap();
        assert!(recon.max_abs_diff(&data).unwrap() < 1e-3);
    }
}
