//! HOOI (higher-order orthogonal iteration)
//!
//! Starting from HOSVD bases, each sweep updates one basis at a time while the
//! other two are held fixed:
//!
//! ```text
//! Y  = X ×ₘ Uₘᵀ  for every m ≠ n
//! Uₙ ← leading Jₙ left singular vectors of Y₍ₙ₎
//! ```
//!
//! After the sweep the core is recomputed and the relative reconstruction error
//! compared with the previous sweep. Iteration stops when the relative change
//! falls below [`HooiConfig::tol`] or after [`HooiConfig::max_iters`] sweeps.
//! The error never increases from one sweep to the next.

use crate::config::HooiConfig;
use crate::error::Tucker3Result;
use crate::hosvd::{compute_bases, mode_basis, narrow_factors};
use crate::tucker3::Tucker3;
use scirs2_core::ndarray_ext::Array2;
use scirs2_core::numeric::Float;
use trimode_core::{Mode, Shape3, Tensor3};
use trimode_kernels::{factor_ranks, multilinear_product, project_all_but, project_core};

fn relative_error(
    data: &Tensor3<f64>,
    core: &Tensor3<f64>,
    bases: &[Array2<f64>; 3],
    norm: f64,
) -> Tucker3Result<f64> {
    let recon = multilinear_product(core, bases)?;
    let residual = (data - &recon).frobenius_norm();
    Ok(if norm > 0.0 { residual / norm } else { residual })
}

/// Refine `bases` for `data` by alternating per-mode updates
///
/// Returns the refined bases, the matching core and the number of sweeps run.
pub(crate) fn refine(
    data: &Tensor3<f64>,
    mut bases: [Array2<f64>; 3],
    config: &HooiConfig,
) -> Tucker3Result<([Array2<f64>; 3], Tensor3<f64>, usize)> {
    let ranks = factor_ranks(&bases);
    let norm = data.frobenius_norm();

    let mut core = project_core(data, &bases)?;
    let mut prev_error = relative_error(data, &core, &bases, norm)?;
    log::debug!("HOOI start: ranks {:?}, relative error {:.3e}", ranks, prev_error);

    let mut iters = 0;
    let mut converged = prev_error == 0.0;

    while !converged && iters < config.max_iters {
        iters += 1;

        for mode in Mode::ALL {
            let partial = project_all_but(data, &bases, mode)?;
            bases[mode.index()] = mode_basis(&partial, mode, ranks[mode.index()], config.method)?;
        }

        core = project_core(data, &bases)?;
        let error = relative_error(data, &core, &bases, norm)?;
        let change = (prev_error - error).abs() / prev_error;
        log::debug!(
            "HOOI sweep {}: relative error {:.6e}, change {:.3e}",
            iters,
            error,
            change
        );

        converged = error == 0.0 || change < config.tol;
        prev_error = error;
    }

    if !converged {
        log::warn!(
            "HOOI stopped after {} sweeps without reaching tolerance {:e} (relative error {:.6e})",
            iters,
            config.tol,
            prev_error
        );
    }

    Ok((bases, core, iters))
}

impl<T> Tucker3<T>
where
    T: Float,
{
    /// Decompose `data` by HOSVD followed by HOOI refinement
    ///
    /// Returns the number of refinement sweeps run. The receiver is only
    /// updated when the whole run succeeds.
    ///
    /// # Errors
    ///
    /// Same as [`Tucker3::hosvd`].
    pub fn hooi(&mut self, data: &Tensor3<T>, config: &HooiConfig) -> Tucker3Result<usize> {
        self.check_ambient(data)?;
        let wide = Tensor3::from_array(data.to_f64());
        let initial = compute_bases(&wide, self.latent_ranks(), config.method)?;

        let (bases, core, iters) = refine(&wide, initial, config)?;
        self.core = Tensor3::from_f64(core.as_array());
        self.factors = narrow_factors(&bases);
        Ok(iters)
    }
}

/// Compute a Tucker3 decomposition by HOOI
///
/// Returns the decomposition and the number of refinement sweeps run.
///
/// # Examples
///
/// ```no_run
/// use trimode_core::Tensor3;
/// use trimode_decomp::{tucker3_hooi, HooiConfig};
///
/// let tensor = Tensor3::<f64>::random_uniform([10, 10, 10], 0.0, 1.0);
/// let (tucker, iters) = tucker3_hooi(&tensor, [5, 5, 5], &HooiConfig::default()).unwrap();
/// println!("{} sweeps, error {:.4}", iters, tucker.relative_error(&tensor).unwrap());
/// ```
pub fn tucker3_hooi<T>(
    data: &Tensor3<T>,
    ranks: Shape3,
    config: &HooiConfig,
) -> Tucker3Result<(Tucker3<T>, usize)>
where
    T: Float,
{
    let mut tucker = Tucker3::zeros(ranks, data.shape())?;
    let iters = tucker.hooi(data, config)?;
    Ok((tucker, iters))
}
