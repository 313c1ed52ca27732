//! Dense 3-way tensor type definition and creation
//!
//! `Tensor3<T>` owns an `Array3<T>` from scirs2_core's ndarray layer and adds
//! the fixed-arity accessors the Tucker3 algorithms rely on. Extents are runtime
//! values; everything that combines tensors validates them explicitly.

use scirs2_core::ndarray_ext::{Array3, ArrayView3, ArrayViewMut3};
use scirs2_core::numeric::{Float, Num, NumCast};
use scirs2_core::random::{rngs::StdRng, Rng, SeedableRng};
use std::fmt;

/// Extents of a 3-way tensor, `[I1, I2, I3]`
pub type Shape3 = [usize; 3];

/// Dense 3-way tensor backed by scirs2_core's ndarray
///
/// # Type Parameters
///
/// * `T` - The element type (typically `f32` or `f64`)
///
/// # Examples
///
/// ```
/// use trimode_core::Tensor3;
///
/// let tensor = Tensor3::<f64>::zeros([2, 3, 4]);
/// assert_eq!(tensor.shape(), [2, 3, 4]);
/// assert_eq!(tensor.len(), 24);
/// ```
#[derive(Clone, PartialEq)]
pub struct Tensor3<T> {
    pub(crate) data: Array3<T>,
}

impl<T> Tensor3<T>
where
    T: Clone + Num,
{
    /// Wrap an existing `Array3`
    pub fn from_array(array: Array3<T>) -> Self {
        Self { data: array }
    }

    /// Create a tensor from flattened row-major data (`i3` varies fastest)
    ///
    /// # Examples
    ///
    /// ```
    /// use trimode_core::Tensor3;
    ///
    /// let tensor = Tensor3::from_vec((0..8).map(|x| x as f64).collect(), [2, 2, 2]).unwrap();
    /// assert_eq!(tensor[[1, 0, 1]], 5.0);
    /// ```
    pub fn from_vec(vec: Vec<T>, shape: Shape3) -> anyhow::Result<Self> {
        let total: usize = shape.iter().product();
        if vec.len() != total {
            anyhow::bail!(
                "Shape {:?} requires {} elements, but got {}",
                shape,
                total,
                vec.len()
            );
        }
        let array = Array3::from_shape_vec((shape[0], shape[1], shape[2]), vec)?;
        Ok(Self { data: array })
    }

    /// Create a tensor by evaluating `f(i1, i2, i3)` at every position
    pub fn from_fn<F>(shape: Shape3, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> T,
    {
        Self {
            data: Array3::from_shape_fn((shape[0], shape[1], shape[2]), |(i, j, k)| f(i, j, k)),
        }
    }

    /// Create a tensor filled with `value`
    pub fn from_elem(shape: Shape3, value: T) -> Self {
        Self {
            data: Array3::from_elem((shape[0], shape[1], shape[2]), value),
        }
    }

    /// Create a tensor of zeros
    pub fn zeros(shape: Shape3) -> Self {
        Self::from_elem(shape, T::zero())
    }

    /// Create a tensor of ones
    pub fn ones(shape: Shape3) -> Self {
        Self::from_elem(shape, T::one())
    }

    /// Extents `[I1, I2, I3]`
    pub fn shape(&self) -> Shape3 {
        let (a, b, c) = self.data.dim();
        [a, b, c]
    }

    /// Extent of a single mode (0, 1 or 2)
    ///
    /// # Panics
    ///
    /// Panics if `mode >= 3`.
    pub fn extent(&self, mode: usize) -> usize {
        self.shape()[mode]
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bounds-checked element access
    pub fn get(&self, index: Shape3) -> Option<&T> {
        self.data.get(index)
    }

    /// Bounds-checked mutable element access
    pub fn get_mut(&mut self, index: Shape3) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    pub fn view(&self) -> ArrayView3<'_, T> {
        self.data.view()
    }

    pub fn view_mut(&mut self) -> ArrayViewMut3<'_, T> {
        self.data.view_mut()
    }

    /// Borrow the underlying array
    pub fn as_array(&self) -> &Array3<T> {
        &self.data
    }

    /// Consume the tensor and return the underlying array
    pub fn into_array(self) -> Array3<T> {
        self.data
    }

    /// Copy the leading `[0, J1) × [0, J2) × [0, J3)` block into a new tensor
    ///
    /// # Errors
    ///
    /// Returns an error if any requested extent exceeds the tensor's extent.
    ///
    /// # Examples
    ///
    /// ```
    /// use trimode_core::Tensor3;
    ///
    /// let tensor = Tensor3::<f64>::from_fn([3, 3, 3], |i, j, k| (i * 9 + j * 3 + k) as f64);
    /// let block = tensor.sub_box([2, 1, 2]).unwrap();
    /// assert_eq!(block.shape(), [2, 1, 2]);
    /// assert_eq!(block[[1, 0, 1]], 10.0);
    /// ```
    pub fn sub_box(&self, extents: Shape3) -> anyhow::Result<Self> {
        let shape = self.shape();
        for mode in 0..3 {
            if extents[mode] > shape[mode] {
                anyhow::bail!(
                    "Sub-box extent {} exceeds mode-{} extent {}",
                    extents[mode],
                    mode,
                    shape[mode]
                );
            }
        }
        Ok(Self::from_fn(extents, |i, j, k| self.data[[i, j, k]].clone()))
    }

    /// Apply `f` elementwise, producing a tensor of another scalar type
    pub fn mapv<U, F>(&self, f: F) -> Tensor3<U>
    where
        F: FnMut(T) -> U,
        U: Clone + Num,
    {
        Tensor3 {
            data: self.data.mapv(f),
        }
    }
}

impl<T> Tensor3<T>
where
    T: Float,
{
    /// Widen every element to `f64`
    ///
    /// The Tucker3 kernels accumulate in double precision regardless of the
    /// storage type; this is the entry point into that representation.
    pub fn to_f64(&self) -> Array3<f64> {
        self.data.mapv(|x| x.to_f64().unwrap_or(f64::NAN))
    }

    /// Narrow an `f64` array back into the storage type
    pub fn from_f64(array: &Array3<f64>) -> Self {
        Self {
            data: array.mapv(|x| <T as NumCast>::from(x).unwrap_or_else(T::nan)),
        }
    }

    /// Create a tensor with values drawn uniformly from `[low, high)`
    ///
    /// Uses `scirs2_core::random` with a thread-local generator.
    pub fn random_uniform(shape: Shape3, low: f64, high: f64) -> Self {
        use scirs2_core::random::quick::random_f64;
        let range = high - low;
        Self::from_fn(shape, |_, _, _| {
            <T as NumCast>::from(low + random_f64() * range).unwrap_or_else(T::nan)
        })
    }

    /// Seeded variant of [`Tensor3::random_uniform`] for reproducible data
    ///
    /// # Examples
    ///
    /// ```
    /// use trimode_core::Tensor3;
    ///
    /// let a = Tensor3::<f64>::random_uniform_seeded([3, 3, 3], -1.0, 1.0, 7);
    /// let b = Tensor3::<f64>::random_uniform_seeded([3, 3, 3], -1.0, 1.0, 7);
    /// assert_eq!(a, b);
    /// ```
    pub fn random_uniform_seeded(shape: Shape3, low: f64, high: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::from_fn(shape, |_, _, _| {
            let sample: f64 = rng.random_range(low..high);
            <T as NumCast>::from(sample).unwrap_or_else(T::nan)
        })
    }
}

impl<T> std::ops::Index<Shape3> for Tensor3<T> {
    type Output = T;
    fn index(&self, index: Shape3) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> std::ops::IndexMut<Shape3> for Tensor3<T> {
    fn index_mut(&mut self, index: Shape3) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for Tensor3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b, c) = self.data.dim();
        f.debug_struct("Tensor3")
            .field("shape", &[a, b, c])
            .field("data", &self.data)
            .finish()
    }
}
