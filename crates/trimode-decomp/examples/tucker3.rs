//! Tucker3 Decomposition Example
//!
//! Decomposes a smooth 3-way field by HOSVD and HOOI, then derives coarser
//! and smaller views from the factored form without touching the full tensor.
//!
//! Run with:
//! ```bash
//! RUST_LOG=debug cargo run --example tucker3
//! ```

use trimode_core::Tensor3;
use trimode_decomp::{mode_singular_values, tucker3_hooi, tucker3_hosvd, HooiConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("{}", "=".repeat(80));
    println!("Tucker3 Decomposition Example");
    println!("{}", "=".repeat(80));
    println!();

    // A smooth field plus a little noise compresses well
    let shape = [48, 40, 32];
    let noise = Tensor3::<f64>::random_uniform_seeded(shape, -0.01, 0.01, 7);
    let tensor = Tensor3::from_fn(shape, |i, j, k| {
        let (x, y, z) = (i as f64 / 48.0, j as f64 / 40.0, k as f64 / 32.0);
        (3.0 * x).sin() * (2.0 * y).cos() + x * y * z + (5.0 * z).sin() * x + noise[[i, j, k]]
    });

    // ========================================================================
    // Step 1: Inspect the mode spectra
    // ========================================================================
    println!("Step 1: Mode singular values");
    println!("{}", "-".repeat(80));
    for (mode, values) in mode_singular_values(&tensor)?.iter().enumerate() {
        let shown: Vec<String> = values.iter().take(5).map(|v| format!("{:.3}", v)).collect();
        println!("  Mode {}: [{}, ...]", mode, shown.join(", "));
    }
    println!();

    // ========================================================================
    // Step 2: HOSVD
    // ========================================================================
    println!("Step 2: Tucker3-HOSVD");
    println!("{}", "-".repeat(80));

    let ranks = [6, 6, 6];
    let start = std::time::Instant::now();
    let tucker = tucker3_hosvd(&tensor, ranks)?;
    let elapsed = start.elapsed();

    println!("  - Time: {:.2}ms", elapsed.as_secs_f64() * 1000.0);
    println!("  - Core shape: {:?}", tucker.core().shape());
    println!("  - Compression ratio: {:.2}x", tucker.compression_ratio());
    println!("  - Relative error: {:.6}", tucker.relative_error(&tensor)?);
    println!("  - Orthonormality error: {:.2e}", tucker.orthonormality_error());
    println!();

    // ========================================================================
    // Step 3: HOOI refinement
    // ========================================================================
    println!("Step 3: Tucker3-HOOI");
    println!("{}", "-".repeat(80));

    let config = HooiConfig::default().with_max_iters(20).with_tol(1e-10);
    let (refined, iters) = tucker3_hooi(&tensor, ranks, &config)?;
    println!("  - Sweeps: {}", iters);
    println!("  - Relative error: {:.6}", refined.relative_error(&tensor)?);
    println!();

    // ========================================================================
    // Step 4: Rank and resolution operators
    // ========================================================================
    println!("Step 4: Derived views");
    println!("{}", "-".repeat(80));

    let small = tucker.progressive_rank_reduction([3, 3, 3])?;
    println!(
        "  - Rank (3,3,3): relative error {:.6}",
        small.relative_error(&tensor)?
    );

    let coarse = tucker.subsampling_on_average(4)?;
    println!("  - Averaged 4x subsampling: ambient {:?}", coarse.ambient_shape());

    let strided = tucker.subsampling_by([2, 4, 4])?;
    println!("  - Strided (2,4,4) subsampling: ambient {:?}", strided.ambient_shape());

    let roi = tucker.region_of_interest([10..30, 0..40, 16..32])?;
    let window = roi.reconstruct()?;
    println!("  - Region of interest: reconstructed {:?}", window.shape());

    Ok(())
}
