//! Property-based tests for 3-way tensors and matricization
//!
//! These tests verify structural properties of the unfoldings that must hold
//! for every extent combination.

use crate::{Mode, Tensor3};
use proptest::prelude::*;

fn small_shape() -> impl Strategy<Value = [usize; 3]> {
    (1usize..6, 1usize..6, 1usize..6).prop_map(|(a, b, c)| [a, b, c])
}

fn tensor_with_shape() -> impl Strategy<Value = Tensor3<f64>> {
    small_shape().prop_flat_map(|shape| {
        let len = shape.iter().product::<usize>();
        prop::collection::vec(-10.0f64..10.0, len)
            .prop_map(move |data| Tensor3::from_vec(data, shape).unwrap())
    })
}

proptest! {
    /// Folding an unfolding returns the original tensor, for every mode
    #[test]
    fn fold_unfold_round_trip(tensor in tensor_with_shape()) {
        for mode in 0..3 {
            let unfolded = tensor.unfold(mode).unwrap();
            let folded = Tensor3::fold(&unfolded, tensor.shape(), mode).unwrap();
            prop_assert_eq!(&folded, &tensor);
        }
    }

    /// Unfoldings are pure reshapes: same multiset of values, same norm
    #[test]
    fn unfolding_preserves_norm(tensor in tensor_with_shape()) {
        let norm = tensor.frobenius_norm();
        for mode in Mode::ALL {
            let unfolded = tensor.unfold_mode(mode);
            prop_assert_eq!(unfolded.len(), tensor.len());
            let unfolded_norm = unfolded.iter().map(|x| x * x).sum::<f64>().sqrt();
            prop_assert!((unfolded_norm - norm).abs() < 1e-9);
        }
    }

    /// Row r of the mode-n unfolding holds exactly the slice with index r along mode n
    #[test]
    fn unfolding_rows_are_mode_slices(tensor in tensor_with_shape()) {
        let [a, b, c] = tensor.shape();
        let lateral = tensor.lateral_matricization();
        for i in 0..a {
            let row_sum: f64 = lateral.row(i).sum();
            let mut slice_sum = 0.0;
            for j in 0..b {
                for k in 0..c {
                    slice_sum += tensor[[i, j, k]];
                }
            }
            prop_assert!((row_sum - slice_sum).abs() < 1e-9);
        }
    }

    /// Subtracting a tensor from itself gives the zero tensor
    #[test]
    fn self_difference_is_zero(tensor in tensor_with_shape()) {
        let diff = &tensor - &tensor;
        prop_assert_eq!(diff.frobenius_norm(), 0.0);
    }
}
