//! The Tucker3 decomposition entity
//!
//! A [`Tucker3`] represents a 3-way tensor as
//!
//! ```text
//! X ≈ G ×₁ U₁ ×₂ U₂ ×₃ U₃
//! ```
//!
//! Where:
//! - G is the core tensor with latent extents (J₁, J₂, J₃)
//! - Uₙ are basis matrices with shape (Iₙ, Jₙ), Jₙ ≤ Iₙ
//! - (I₁, I₂, I₃) are the ambient extents of the represented tensor
//!
//! Every constructor and setter validates these extents, so a `Tucker3`
//! value is always internally consistent. Bases produced by decomposition
//! additionally satisfy Uₙᵀ Uₙ = I.

use crate::error::{Tucker3Error, Tucker3Result};
use scirs2_core::ndarray_ext::Array2;
use scirs2_core::numeric::Float;
use trimode_core::{Mode, Shape3, Tensor3};
use trimode_kernels::{factor_extents, factor_ranks, multilinear_product, project_core};

/// Tucker3 decomposition of a 3-way tensor
#[derive(Clone, Debug, PartialEq)]
pub struct Tucker3<T> {
    pub(crate) core: Tensor3<T>,
    pub(crate) factors: [Array2<T>; 3],
}

/// Check 1 ≤ Jₙ ≤ Iₙ for every mode
pub(crate) fn validate_ranks(latent: Shape3, ambient: Shape3) -> Tucker3Result<()> {
    for mode in 0..3 {
        if latent[mode] == 0 {
            return Err(Tucker3Error::InvalidRanks(format!("Rank {} is zero", mode)));
        }
        if latent[mode] > ambient[mode] {
            return Err(Tucker3Error::InvalidRanks(format!(
                "Rank {} ({}) exceeds mode-{} size ({})",
                mode, latent[mode], mode, ambient[mode]
            )));
        }
    }
    Ok(())
}

impl<T> Tucker3<T>
where
    T: Float,
{
    /// Assemble a decomposition from a core and three basis matrices
    ///
    /// # Errors
    ///
    /// - [`Tucker3Error::ShapeMismatch`] if a basis column count differs from
    ///   the matching core extent
    /// - [`Tucker3Error::InvalidRanks`] if a latent extent is zero or exceeds
    ///   the basis row count
    ///
    /// # Examples
    ///
    /// ```
    /// use scirs2_core::ndarray_ext::Array2;
    /// use trimode_core::Tensor3;
    /// use trimode_decomp::Tucker3;
    ///
    /// let core = Tensor3::<f64>::ones([2, 2, 1]);
    /// let factors = [Array2::eye(3), Array2::eye(2), Array2::eye(4)];
    /// assert!(Tucker3::new(core, factors).is_err());
    /// ```
    pub fn new(core: Tensor3<T>, factors: [Array2<T>; 3]) -> Tucker3Result<Self> {
        let latent = factor_ranks(&factors);
        if core.shape() != latent {
            return Err(Tucker3Error::ShapeMismatch(format!(
                "Core shape {:?} does not match basis column counts {:?}",
                core.shape(),
                latent
            )));
        }
        validate_ranks(latent, factor_extents(&factors))?;
        Ok(Self { core, factors })
    }

    /// Allocate a zero decomposition with the given latent and ambient extents
    ///
    /// The result is typically filled by [`Tucker3::decompose`].
    pub fn zeros(latent: Shape3, ambient: Shape3) -> Tucker3Result<Self> {
        validate_ranks(latent, ambient)?;
        Ok(Self {
            core: Tensor3::zeros(latent),
            factors: [
                Array2::zeros((ambient[0], latent[0])),
                Array2::zeros((ambient[1], latent[1])),
                Array2::zeros((ambient[2], latent[2])),
            ],
        })
    }

    /// Core tensor (J₁×J₂×J₃)
    pub fn core(&self) -> &Tensor3<T> {
        &self.core
    }

    /// Mode-1 basis (I₁×J₁)
    pub fn u1(&self) -> &Array2<T> {
        &self.factors[0]
    }

    /// Mode-2 basis (I₂×J₂)
    pub fn u2(&self) -> &Array2<T> {
        &self.factors[1]
    }

    /// Mode-3 basis (I₃×J₃)
    pub fn u3(&self) -> &Array2<T> {
        &self.factors[2]
    }

    pub fn factor(&self, mode: Mode) -> &Array2<T> {
        &self.factors[mode.index()]
    }

    pub fn factors(&self) -> &[Array2<T>; 3] {
        &self.factors
    }

    /// Latent extents (J₁, J₂, J₃)
    pub fn latent_ranks(&self) -> Shape3 {
        self.core.shape()
    }

    /// Ambient extents (I₁, I₂, I₃) of the represented tensor
    pub fn ambient_shape(&self) -> Shape3 {
        factor_extents(&self.factors)
    }

    pub fn into_parts(self) -> (Tensor3<T>, [Array2<T>; 3]) {
        (self.core, self.factors)
    }

    /// Replace the core; its shape must equal [`Tucker3::latent_ranks`]
    pub fn set_core(&mut self, core: Tensor3<T>) -> Tucker3Result<()> {
        if core.shape() != self.latent_ranks() {
            return Err(Tucker3Error::ShapeMismatch(format!(
                "Core shape {:?} does not match latent ranks {:?}",
                core.shape(),
                self.latent_ranks()
            )));
        }
        self.core = core;
        Ok(())
    }

    /// Replace one basis; its shape must equal the current one
    pub fn set_factor(&mut self, mode: Mode, factor: Array2<T>) -> Tucker3Result<()> {
        let n = mode.index();
        if factor.dim() != self.factors[n].dim() {
            return Err(Tucker3Error::ShapeMismatch(format!(
                "Basis for mode {} must be {:?}, got {:?}",
                n,
                self.factors[n].dim(),
                factor.dim()
            )));
        }
        self.factors[n] = factor;
        Ok(())
    }

    pub fn set_u1(&mut self, u1: Array2<T>) -> Tucker3Result<()> {
        self.set_factor(Mode::Lateral, u1)
    }

    pub fn set_u2(&mut self, u2: Array2<T>) -> Tucker3Result<()> {
        self.set_factor(Mode::Frontal, u2)
    }

    pub fn set_u3(&mut self, u3: Array2<T>) -> Tucker3Result<()> {
        self.set_factor(Mode::Horizontal, u3)
    }

    /// Reconstruct the represented tensor
    ///
    /// Computes X̂ = G ×₁ U₁ ×₂ U₂ ×₃ U₃ with `f64` accumulation.
    ///
    /// # Complexity
    ///
    /// Time: O(I₁I₂I₃ · max Jₙ)
    /// Space: O(I₁I₂I₃)
    pub fn reconstruct(&self) -> Tucker3Result<Tensor3<T>> {
        Ok(multilinear_product(&self.core, &self.factors)?)
    }

    /// Recompute the core from `data` using the current bases
    ///
    /// `core = data ×₁ U₁ᵀ ×₂ U₂ᵀ ×₃ U₃ᵀ`. Useful after installing bases
    /// through the setters.
    pub fn derive_core(&mut self, data: &Tensor3<T>) -> Tucker3Result<()> {
        self.check_ambient(data)?;
        self.core = project_core(data, &self.factors)?;
        Ok(())
    }

    /// Original elements divided by stored elements (core + bases)
    pub fn compression_ratio(&self) -> f64 {
        let original: usize = self.ambient_shape().iter().product();
        let core = self.core.len();
        let bases: usize = self.factors.iter().map(|f| f.len()).sum();
        original as f64 / (core + bases) as f64
    }

    /// ‖X − X̂‖ / ‖X‖, or ‖X̂‖ when X is zero
    pub fn relative_error(&self, original: &Tensor3<T>) -> Tucker3Result<f64> {
        self.check_ambient(original)?;
        let recon = self.reconstruct()?.to_f64();
        let data = original.to_f64();

        let (err_sq, norm_sq) = data
            .iter()
            .zip(recon.iter())
            .fold((0.0f64, 0.0f64), |(e, n), (&x, &y)| {
                (e + (x - y) * (x - y), n + x * x)
            });

        if norm_sq == 0.0 {
            Ok(err_sq.sqrt())
        } else {
            Ok((err_sq / norm_sq).sqrt())
        }
    }

    /// Largest deviation of any Uₙᵀ Uₙ from the identity
    pub fn orthonormality_error(&self) -> f64 {
        self.factors
            .iter()
            .map(|f| trimode_kernels::orthonormality_error(&f.view()))
            .fold(0.0, f64::max)
    }

    pub(crate) fn check_ambient(&self, data: &Tensor3<T>) -> Tucker3Result<()> {
        if data.shape() != self.ambient_shape() {
            return Err(Tucker3Error::ShapeMismatch(format!(
                "Tensor shape {:?} does not match ambient shape {:?}",
                data.shape(),
                self.ambient_shape()
            )));
        }
        Ok(())
    }
}
