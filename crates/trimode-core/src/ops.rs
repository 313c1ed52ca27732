//! Norms and elementwise arithmetic on 3-way tensors
//!
//! These are the measurements the decomposition layer needs to talk about
//! approximation quality: Frobenius norms, differences and maximum deviation.

use crate::tensor3::Tensor3;
use scirs2_core::numeric::{Float, Num};

impl<T> Tensor3<T>
where
    T: Float,
{
    /// Frobenius norm, `sqrt(Σ x²)`
    ///
    /// # Examples
    ///
    /// ```
    /// use trimode_core::Tensor3;
    ///
    /// let tensor = Tensor3::<f64>::ones([2, 2, 2]);
    /// assert!((tensor.frobenius_norm() - 8.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T {
        self.data
            .iter()
            .fold(T::zero(), |acc, &x| acc + x * x)
            .sqrt()
    }

    /// Largest absolute elementwise difference to `other`
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes differ.
    pub fn max_abs_diff(&self, other: &Tensor3<T>) -> anyhow::Result<T> {
        if self.shape() != other.shape() {
            anyhow::bail!(
                "Cannot compare tensors of shape {:?} and {:?}",
                self.shape(),
                other.shape()
            );
        }
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc.max((a - b).abs())))
    }

    /// `true` when every element is within `tol` of `other`
    pub fn approx_eq(&self, other: &Tensor3<T>, tol: T) -> bool {
        self.max_abs_diff(other).map(|d| d <= tol).unwrap_or(false)
    }
}

impl<'b, T> std::ops::Sub<&'b Tensor3<T>> for &Tensor3<T>
where
    T: Clone + Num,
{
    type Output = Tensor3<T>;

    /// # Panics
    ///
    /// Panics if the two tensors have different shapes.
    fn sub(self, rhs: &'b Tensor3<T>) -> Self::Output {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "Shapes must match for subtraction"
        );
        Tensor3 {
            data: &self.data - &rhs.data,
        }
    }
}

impl<'b, T> std::ops::Add<&'b Tensor3<T>> for &Tensor3<T>
where
    T: Clone + Num,
{
    type Output = Tensor3<T>;

    /// # Panics
    ///
    /// Panics if the two tensors have different shapes.
    fn add(self, rhs: &'b Tensor3<T>) -> Self::Output {
        assert_eq!(self.shape(), rhs.shape(), "Shapes must match for addition");
        Tensor3 {
            data: &self.data + &rhs.data,
        }
    }
}
