//! Matricization (unfolding) of 3-way tensors and its inverse
//!
//! The mode-n unfolding arranges every element of an `I1 × I2 × I3` tensor into
//! a matrix whose rows are indexed by mode n and whose columns enumerate the
//! two remaining modes, in their original order, flattened row-major. `fold`
//! uses the identical convention, so `fold(unfold(x, n), shape, n) == x`.

use crate::tensor3::{Shape3, Tensor3};
use scirs2_core::ndarray_ext::Array2;
use scirs2_core::numeric::Num;

/// One of the three modes of a 3-way tensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Mode 1 (`I1`), unfolded into the lateral matricization
    Lateral,
    /// Mode 2 (`I2`), unfolded into the frontal matricization
    Frontal,
    /// Mode 3 (`I3`), unfolded into the horizontal matricization
    Horizontal,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Lateral, Mode::Frontal, Mode::Horizontal];

    /// Zero-based axis index
    pub fn index(self) -> usize {
        match self {
            Mode::Lateral => 0,
            Mode::Frontal => 1,
            Mode::Horizontal => 2,
        }
    }

    /// Inverse of [`Mode::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Mode::Lateral),
            1 => Some(Mode::Frontal),
            2 => Some(Mode::Horizontal),
            _ => None,
        }
    }

    /// The two remaining axes, in ascending order
    pub fn others(self) -> [usize; 2] {
        match self {
            Mode::Lateral => [1, 2],
            Mode::Frontal => [0, 2],
            Mode::Horizontal => [0, 1],
        }
    }
}

/// Shape `(rows, cols)` of the mode-n unfolding of a tensor with extents `shape`
pub fn unfolded_shape(shape: Shape3, mode: Mode) -> (usize, usize) {
    let [a, b] = mode.others();
    (shape[mode.index()], shape[a] * shape[b])
}

/// Map a matrix position of the mode-n unfolding back to a tensor index
fn tensor_index(shape: Shape3, mode: Mode, row: usize, col: usize) -> Shape3 {
    let [_, b] = mode.others();
    let inner = shape[b];
    let (outer_idx, inner_idx) = (col / inner, col % inner);
    match mode {
        Mode::Lateral => [row, outer_idx, inner_idx],
        Mode::Frontal => [outer_idx, row, inner_idx],
        Mode::Horizontal => [outer_idx, inner_idx, row],
    }
}

impl<T> Tensor3<T>
where
    T: Clone + Num,
{
    /// Mode-1 unfolding, `I1 × (I2·I3)`
    ///
    /// # Examples
    ///
    /// ```
    /// use trimode_core::Tensor3;
    ///
    /// let tensor = Tensor3::<f64>::from_fn([2, 3, 4], |i, j, k| (i * 12 + j * 4 + k) as f64);
    /// let lateral = tensor.lateral_matricization();
    /// assert_eq!(lateral.shape(), &[2, 12]);
    /// assert_eq!(lateral[[1, 5]], tensor[[1, 1, 1]]);
    /// ```
    pub fn lateral_matricization(&self) -> Array2<T> {
        self.unfold_mode(Mode::Lateral)
    }

    /// Mode-2 unfolding, `I2 × (I1·I3)`
    pub fn frontal_matricization(&self) -> Array2<T> {
        self.unfold_mode(Mode::Frontal)
    }

    /// Mode-3 unfolding, `I3 × (I1·I2)`
    pub fn horizontal_matricization(&self) -> Array2<T> {
        self.unfold_mode(Mode::Horizontal)
    }

    /// Unfold along a typed mode
    pub fn unfold_mode(&self, mode: Mode) -> Array2<T> {
        let shape = self.shape();
        let dims = unfolded_shape(shape, mode);
        Array2::from_shape_fn(dims, |(row, col)| {
            self.data[tensor_index(shape, mode, row, col)].clone()
        })
    }

    /// Unfold along a zero-based mode index
    ///
    /// # Errors
    ///
    /// Returns an error if `mode >= 3`.
    pub fn unfold(&self, mode: usize) -> anyhow::Result<Array2<T>> {
        let mode = Mode::from_index(mode)
            .ok_or_else(|| anyhow::anyhow!("Mode {} out of bounds for a 3-way tensor", mode))?;
        Ok(self.unfold_mode(mode))
    }

    /// Fold a mode-n unfolding back into a tensor with extents `shape`
    ///
    /// This is the inverse of [`Tensor3::unfold`].
    ///
    /// # Errors
    ///
    /// Returns an error if `mode >= 3` or the matrix shape does not match
    /// the unfolding of `shape` along `mode`.
    pub fn fold(matrix: &Array2<T>, shape: Shape3, mode: usize) -> anyhow::Result<Self> {
        let mode = Mode::from_index(mode).ok_or_else(|| {
            anyhow::anyhow!("Mode {} out of bounds for target shape {:?}", mode, shape)
        })?;

        let (rows, cols) = unfolded_shape(shape, mode);
        if matrix.nrows() != rows || matrix.ncols() != cols {
            anyhow::bail!(
                "Matrix shape {:?} incompatible with target shape {:?} at mode {}",
                matrix.shape(),
                shape,
                mode.index()
            );
        }

        let [_, b] = mode.others();
        let inner = shape[b];
        Ok(Self::from_fn(shape, |i, j, k| {
            let (row, col) = match mode {
                Mode::Lateral => (i, j * inner + k),
                Mode::Frontal => (j, i * inner + k),
                Mode::Horizontal => (k, i * inner + j),
            };
            matrix[[row, col]].clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexed(shape: Shape3) -> Tensor3<f64> {
        Tensor3::from_fn(shape, |i, j, k| (i * shape[1] * shape[2] + j * shape[2] + k) as f64)
    }

    #[test]
    fn test_unfold_shapes() {
        let tensor = indexed([2, 3, 4]);
        assert_eq!(tensor.lateral_matricization().shape(), &[2, 12]);
        assert_eq!(tensor.frontal_matricization().shape(), &[3, 8]);
        assert_eq!(tensor.horizontal_matricization().shape(), &[4, 6]);
    }

    #[test]
    fn test_column_ordering() {
        let tensor = indexed([2, 3, 4]);

        let lateral = tensor.lateral_matricization();
        assert_eq!(lateral[[1, 2 * 4 + 3]], tensor[[1, 2, 3]]);

        let frontal = tensor.frontal_matricization();
        assert_eq!(frontal[[2, 4 + 3]], tensor[[1, 2, 3]]);

        let horizontal = tensor.horizontal_matricization();
        assert_eq!(horizontal[[3, 3 + 2]], tensor[[1, 2, 3]]);
    }

    #[test]
    fn test_lateral_is_plain_reshape() {
        let tensor = indexed([3, 2, 2]);
        let lateral = tensor.lateral_matricization();
        let flat: Vec<f64> = lateral.iter().cloned().collect();
        assert_eq!(flat, (0..12).map(|x| x as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_fold_inverts_unfold() {
        let tensor = indexed([3, 4, 5]);
        for mode in 0..3 {
            let unfolded = tensor.unfold(mode).unwrap();
            let folded = Tensor3::fold(&unfolded, [3, 4, 5], mode).unwrap();
            assert_eq!(folded, tensor, "mode {}", mode);
        }
    }

    #[test]
    fn test_unfold_invalid_mode() {
        let tensor = indexed([2, 2, 2]);
        assert!(tensor.unfold(3).is_err());
    }

    #[test]
    fn test_fold_shape_mismatch() {
        let matrix = Array2::<f64>::zeros((3, 7));
        assert!(Tensor3::fold(&matrix, [2, 3, 4], 1).is_err());
        assert!(Tensor3::fold(&matrix, [2, 3, 4], 5).is_err());
    }

    #[test]
    fn test_mode_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_index(mode.index()), Some(mode));
        }
        assert_eq!(Mode::from_index(3), None);
    }
}
