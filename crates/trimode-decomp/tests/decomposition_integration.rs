//! Integration tests for trimode-decomp
//!
//! End-to-end workflows across decomposition, reconstruction and the
//! rank/resolution operators.

use scirs2_core::ndarray_ext::Array2;
use trimode_core::Tensor3;
use trimode_decomp::*;

fn flattened_index_4() -> Tensor3<f64> {
    Tensor3::from_fn([4, 4, 4], |i, j, k| (16 * i + 4 * j + k) as f64)
}

#[test]
fn test_flattened_index_full_rank_round_trip() {
    let data = flattened_index_4();
    let mut tucker = Tucker3::zeros([4, 4, 4], [4, 4, 4]).unwrap();
    tucker.decompose(&data).unwrap();

    let recon = tucker.reconstruct().unwrap();
    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                let expected = (16 * i + 4 * j + k) as f64;
                assert!(
                    (recon[[i, j, k]] - expected).abs() < 1e-5,
                    "entry ({}, {}, {}) = {} expected {}",
                    i,
                    j,
                    k,
                    recon[[i, j, k]],
                    expected
                );
            }
        }
    }
}

#[test]
fn test_low_rank_tensor_recovered_exactly() {
    // Multilinear rank (2, 2, 1)
    let data = Tensor3::<f64>::from_fn([5, 4, 3], |i, j, k| {
        let a = (i as f64 + 1.0) * (j as f64 - 1.5);
        let b = (i as f64).cos() * (j as f64 + 0.5).sin();
        (a + b) * (k as f64 + 1.0)
    });

    let tucker = tucker3_hosvd(&data, [2, 2, 1]).unwrap();
    assert!(tucker.relative_error(&data).unwrap() < 1e-8);
    assert!(tucker.compression_ratio() > 1.0);
}

#[test]
fn test_failed_decomposition_leaves_receiver_unchanged() {
    let data = flattened_index_4();
    let mut tucker = tucker3_hosvd(&data, [2, 2, 2]).unwrap();
    let before = tucker.clone();

    let wrong = Tensor3::<f64>::ones([4, 4, 5]);
    let err = tucker.decompose(&wrong).unwrap_err();
    assert!(err.is_precondition_violation());
    assert_eq!(tucker, before);

    assert!(tucker.hosvd(&wrong).is_err());
    assert!(tucker.hooi(&wrong, &HooiConfig::default()).is_err());
    assert_eq!(tucker, before);
}

#[test]
fn test_non_finite_input_is_decomposition_failure() {
    let clean = flattened_index_4();
    let data = Tensor3::<f64>::from_fn([4, 4, 4], |i, j, k| {
        if (i, j, k) == (1, 2, 3) {
            f64::NAN
        } else {
            (16 * i + 4 * j + k) as f64
        }
    });
    let mut tucker = tucker3_hosvd(&clean, [2, 2, 2]).unwrap();
    let before = tucker.clone();

    let failures = [
        tucker.decompose(&data).unwrap_err(),
        tucker.hosvd_on_eigs(&data).unwrap_err(),
        tucker.hooi(&data, &HooiConfig::default()).unwrap_err(),
    ];
    for err in &failures {
        assert!(
            matches!(err, Tucker3Error::DecompositionFailure { .. }),
            "unexpected error: {}",
            err
        );
        assert!(!err.is_precondition_violation());
    }
    assert_eq!(tucker, before);
}

#[test]
fn test_eigen_and_svd_paths_agree() {
    let data = Tensor3::<f64>::random_uniform_seeded([6, 5, 4], 0.0, 1.0, 2024);

    let mut svd = Tucker3::zeros([3, 3, 2], [6, 5, 4]).unwrap();
    svd.hosvd(&data).unwrap();
    svd.derive_core(&data).unwrap();

    let mut eig = Tucker3::zeros([3, 3, 2], [6, 5, 4]).unwrap();
    eig.hosvd_on_eigs(&data).unwrap();
    eig.derive_core(&data).unwrap();

    assert!(eig.orthonormality_error() < 1e-6);
    let a = svd.reconstruct().unwrap();
    let b = eig.reconstruct().unwrap();
    assert!(a.max_abs_diff(&b).unwrap() < 1e-6);
}

#[test]
fn test_hooi_improves_on_hosvd() {
    let data = Tensor3::<f64>::random_uniform_seeded([8, 7, 6], 0.0, 1.0, 99);

    let hosvd = tucker3_hosvd(&data, [3, 3, 3]).unwrap();
    let config = DecompositionConfig::default().with_refinement(HooiConfig::default());
    let mut refined = Tucker3::zeros([3, 3, 3], [8, 7, 6]).unwrap();
    let iters = refined.decompose_with(&data, &config).unwrap();

    assert!(iters >= 1);
    assert!(refined.orthonormality_error() < 1e-6);
    assert!(
        refined.relative_error(&data).unwrap() <= hosvd.relative_error(&data).unwrap() + 1e-10
    );
}

#[test]
fn test_region_of_interest_reconstructs_window() {
    let data = flattened_index_4();
    let tucker = tucker3_hosvd(&data, [2, 2, 2]).unwrap();

    let roi = tucker.region_of_interest([1..3, 0..4, 2..4]).unwrap();
    assert_eq!(roi.ambient_shape(), [2, 4, 2]);
    assert_eq!(roi.core(), tucker.core());

    // The window of the reconstruction is the reconstruction of the window
    let full = tucker.reconstruct().unwrap();
    let window = roi.reconstruct().unwrap();
    for i in 0..2 {
        for j in 0..4 {
            for k in 0..2 {
                assert!((window[[i, j, k]] - full[[i + 1, j, k + 2]]).abs() < 1e-10);
            }
        }
    }
}

#[test]
fn test_subsampling_reconstructs_strided_samples() {
    let data = Tensor3::<f64>::random_uniform_seeded([9, 6, 4], 0.0, 1.0, 5);
    let tucker = tucker3_hosvd(&data, [3, 3, 2]).unwrap();
    let coarse = tucker.subsampling_by([3, 2, 2]).unwrap();

    assert_eq!(coarse.ambient_shape(), [3, 3, 2]);
    let full = tucker.reconstruct().unwrap();
    let sampled = coarse.reconstruct().unwrap();
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..2 {
                assert!((sampled[[i, j, k]] - full[[3 * i, 2 * j, 2 * k]]).abs() < 1e-10);
            }
        }
    }
}

#[test]
fn test_multiresolution_pipeline() {
    let data = Tensor3::<f64>::random_uniform_seeded([12, 12, 12], 0.0, 1.0, 1);
    let tucker = tucker3_hosvd(&data, [4, 4, 4]).unwrap();

    let preview = tucker
        .progressive_rank_reduction([2, 2, 2])
        .unwrap()
        .subsampling_on_average(3)
        .unwrap()
        .region_of_interest([0..3, 1..4, 2..4])
        .unwrap();

    assert_eq!(preview.latent_ranks(), [2, 2, 2]);
    assert_eq!(preview.ambient_shape(), [3, 3, 2]);
    assert_eq!(preview.reconstruct().unwrap().shape(), [3, 3, 2]);
}

#[test]
fn test_setters_then_derive_core() {
    let data = flattened_index_4();
    let reference = tucker3_hosvd(&data, [2, 3, 2]).unwrap();

    let mut tucker = Tucker3::zeros([2, 3, 2], [4, 4, 4]).unwrap();
    tucker.set_u1(reference.u1().clone()).unwrap();
    tucker.set_u2(reference.u2().clone()).unwrap();
    tucker.set_u3(reference.u3().clone()).unwrap();
    tucker.derive_core(&data).unwrap();

    assert!(tucker.core().max_abs_diff(reference.core()).unwrap() < 1e-10);
    assert!(tucker.set_u1(Array2::zeros((4, 3))).is_err());
}

#[test]
fn test_mode_singular_values_guide_rank() {
    let data = flattened_index_4();
    let values = mode_singular_values(&data).unwrap();

    // The flattened index i·16 + j·4 + k has multilinear rank (2, 2, 2)
    for v in &values {
        assert!(v[0] > 1.0);
        assert!(v[2] < 1e-8 * v[0]);
    }
}
