//! Rank and resolution operators
//!
//! These derive a new [`Tucker3`] from an existing one without touching the
//! full tensor or re-running any SVD. Rows of a basis matrix index the ambient
//! (spatial) samples of a mode and columns index its latent components, so:
//!
//! - latent rank changes by keeping leading basis columns and the matching
//!   corner of the core ([`Tucker3::progressive_rank_reduction`])
//! - spatial resolution changes by selecting or averaging basis rows
//!   ([`Tucker3::subsampling`], [`Tucker3::subsampling_on_average`])
//! - a spatial window keeps a contiguous block of basis rows
//!   ([`Tucker3::region_of_interest`])
//!
//! Row operations leave the core unchanged. Every operator checks its
//! preconditions per mode and returns an error rather than a partial result.

use crate::error::{Tucker3Error, Tucker3Result};
use crate::tucker3::Tucker3;
use scirs2_core::ndarray_ext::Array2;
use scirs2_core::numeric::Float;
use std::ops::Range;
use trimode_core::Shape3;
use trimode_kernels::{average_rows, leading_columns, select_rows};

impl<T> Tucker3<T>
where
    T: Float,
{
    /// Keep the leading `ranks` latent components of every mode
    ///
    /// # Errors
    ///
    /// Returns [`Tucker3Error::InvalidRanks`] unless 1 ≤ ranks[n] ≤ Jₙ for
    /// every mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use trimode_core::Tensor3;
    /// use trimode_decomp::tucker3_hosvd;
    ///
    /// let data = Tensor3::<f64>::random_uniform([6, 6, 6], 0.0, 1.0);
    /// let full = tucker3_hosvd(&data, [4, 4, 4]).unwrap();
    /// let small = full.progressive_rank_reduction([2, 3, 1]).unwrap();
    ///
    /// assert_eq!(small.latent_ranks(), [2, 3, 1]);
    /// assert_eq!(small.ambient_shape(), [6, 6, 6]);
    /// ```
    pub fn progressive_rank_reduction(&self, ranks: Shape3) -> Tucker3Result<Self> {
        let current = self.latent_ranks();
        for mode in 0..3 {
            if ranks[mode] == 0 || ranks[mode] > current[mode] {
                return Err(Tucker3Error::InvalidRanks(format!(
                    "Rank {} must be in 1..={}, got {}",
                    mode, current[mode], ranks[mode]
                )));
            }
        }

        let core = self
            .core
            .sub_box(ranks)
            .map_err(|e| Tucker3Error::ShapeMismatch(e.to_string()))?;
        let factors = [
            leading_columns(&self.factors[0].view(), ranks[0])?,
            leading_columns(&self.factors[1].view(), ranks[1])?,
            leading_columns(&self.factors[2].view(), ranks[2])?,
        ];

        Self::new(core, factors)
    }

    /// Keep every `factor`-th ambient sample of every mode
    ///
    /// Equivalent to [`Tucker3::subsampling_by`] with the same factor for all
    /// three modes.
    pub fn subsampling(&self, factor: usize) -> Tucker3Result<Self> {
        self.subsampling_by([factor; 3])
    }

    /// Keep every `factors[n]`-th ambient sample of mode n
    ///
    /// Destination row i of Uₙ is source row i·fₙ, giving ⌈Iₙ / fₙ⌉ rows. The
    /// last one, (⌈Iₙ / fₙ⌉ − 1)·fₙ, always lies inside the mode, so any factor
    /// from 1 up is in range; a factor of Iₙ or more keeps only row 0.
    ///
    /// # Errors
    ///
    /// Returns [`Tucker3Error::InvalidFactor`] if a factor is zero or would
    /// leave fewer ambient samples than latent components in that mode.
    pub fn subsampling_by(&self, factors: [usize; 3]) -> Tucker3Result<Self> {
        self.resample_rows(factors, |basis, factor| {
            Ok(select_rows(&basis.view(), (0..basis.nrows()).step_by(factor))?)
        })
    }

    /// Like [`Tucker3::subsampling`], averaging each block of samples
    pub fn subsampling_on_average(&self, factor: usize) -> Tucker3Result<Self> {
        self.subsampling_on_average_by([factor; 3])
    }

    /// Like [`Tucker3::subsampling_by`], averaging each block of samples
    ///
    /// Destination row i of Uₙ is the mean of source rows
    /// `[i·fₙ, min(i·fₙ + fₙ, Iₙ))`; the last block is shorter when Iₙ is not
    /// a multiple of fₙ.
    pub fn subsampling_on_average_by(&self, factors: [usize; 3]) -> Tucker3Result<Self> {
        self.resample_rows(factors, |basis, factor| {
            Ok(average_rows(&basis.view(), factor)?)
        })
    }

    fn resample_rows<F>(&self, factors: [usize; 3], resample: F) -> Tucker3Result<Self>
    where
        F: Fn(&Array2<T>, usize) -> Tucker3Result<Array2<T>>,
    {
        let ambient = self.ambient_shape();
        let latent = self.latent_ranks();

        for mode in 0..3 {
            let factor = factors[mode];
            if factor == 0 {
                return Err(Tucker3Error::InvalidFactor(format!(
                    "Subsampling factor for mode {} must be at least 1",
                    mode
                )));
            }
            let extent = ambient[mode].div_ceil(factor);
            if extent < latent[mode] {
                return Err(Tucker3Error::InvalidFactor(format!(
                    "Factor {} leaves {} samples in mode {}, fewer than its rank {}",
                    factor, extent, mode, latent[mode]
                )));
            }
        }

        let bases = [
            resample(&self.factors[0], factors[0])?,
            resample(&self.factors[1], factors[1])?,
            resample(&self.factors[2], factors[2])?,
        ];
        Self::new(self.core.clone(), bases)
    }

    /// Restrict every mode to a window of ambient samples
    ///
    /// Rows `ranges[n]` (half-open) of each basis are kept; the core is copied
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Tucker3Error::InvalidRange`] unless `start < end ≤ Iₙ` and the
    /// window holds at least Jₙ rows, for every mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use trimode_core::Tensor3;
    /// use trimode_decomp::tucker3_hosvd;
    ///
    /// let data = Tensor3::<f64>::random_uniform([8, 8, 8], 0.0, 1.0);
    /// let tucker = tucker3_hosvd(&data, [2, 2, 2]).unwrap();
    /// let roi = tucker.region_of_interest([2..6, 0..8, 5..7]).unwrap();
    ///
    /// assert_eq!(roi.ambient_shape(), [4, 8, 2]);
    /// assert_eq!(roi.u1().row(0), tucker.u1().row(2));
    /// ```
    pub fn region_of_interest(&self, ranges: [Range<usize>; 3]) -> Tucker3Result<Self> {
        let ambient = self.ambient_shape();
        let latent = self.latent_ranks();

        for (mode, range) in ranges.iter().enumerate() {
            if range.start >= range.end || range.end > ambient[mode] {
                return Err(Tucker3Error::InvalidRange(format!(
                    "Range {:?} for mode {} must satisfy start < end <= {}",
                    range, mode, ambient[mode]
                )));
            }
            if range.len() < latent[mode] {
                return Err(Tucker3Error::InvalidRange(format!(
                    "Range {:?} for mode {} holds fewer rows than its rank {}",
                    range, mode, latent[mode]
                )));
            }
        }

        let bases = [
            select_rows(&self.factors[0].view(), ranges[0].clone())?,
            select_rows(&self.factors[1].view(), ranges[1].clone())?,
            select_rows(&self.factors[2].view(), ranges[2].clone())?,
        ];
        Self::new(self.core.clone(), bases)
    }
}
