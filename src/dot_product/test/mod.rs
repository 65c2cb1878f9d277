//! Exact-value tests shared by every dot product kernel.
//!
//! The inputs are chosen so every partial sum is representable, which makes
//! the result independent of summation order: all kernels must agree
//! bit for bit.

use crate::dot_product::code::*;
use crate::dot_product::{max_product_bound, tolerance, verify, VectorBuffer};

fn assert_all_variants_eq(buffer: &VectorBuffer, expected: f32, msg: &str) {
    for variant in available_variants() {
        let result = (variant.function)(buffer.as_slice());
        assert_eq!(
            result.to_bits(),
            expected.to_bits(),
            "{msg}: variant '{}' returned {result}, expected {expected}",
            variant.name
        );
    }
}

#[test]
fn test_tiny_exact() {
    let a = [1.0f32; 8];
    let b = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    let buffer = VectorBuffer::from_vectors(&a, &b).unwrap();
    assert_all_variants_eq(&buffer, 36.0, "tiny exact");
}

#[test]
fn test_sign_mix_cancels() {
    let a = [1.0f32, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
    let b = [1.0f32; 8];
    let buffer = VectorBuffer::from_vectors(&a, &b).unwrap();
    assert_all_variants_eq(&buffer, 0.0, "sign mix");
}

#[test]
fn test_alignment_stress() {
    let buffer = VectorBuffer::from_fn(32, |_| (0.5, 0.5)).unwrap();
    assert_all_variants_eq(&buffer, 8.0, "alignment stress");
}

#[test]
fn test_empty_vectors() {
    let buffer = VectorBuffer::zeroed(0).unwrap();
    assert_eq!(buffer.total_len(), 0);
    assert_all_variants_eq(&buffer, 0.0, "empty");
}

#[test]
fn test_original_basic() {
    // 1*5 + 2*6 + 3*7 + 4*8 = 5 + 12 + 21 + 32 = 70
    let buffer = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
    assert_eq!(dot_product_original(&buffer), 70.0);
}

#[test]
fn test_original_odd_length_ignores_last() {
    let buffer = [3.0, 4.0, 100.0];
    assert_eq!(dot_product_original(&buffer), 12.0);
}

#[test]
fn test_scalar_asm_matches_reference_bitwise() {
    let buffer = VectorBuffer::random(4096, 3).unwrap();
    let expected = dot_product_original(buffer.as_slice());
    let result = dot_product_scalar_asm(buffer.as_slice());
    assert_eq!(result.to_bits(), expected.to_bits());
}

#[test]
fn test_c_original_matches_reference() {
    if !C_IMPL_AVAILABLE {
        return;
    }
    let buffer = VectorBuffer::random(4096, 4).unwrap();
    let expected = dot_product_original(buffer.as_slice());
    let result = dot_product_c_original(buffer.as_slice());
    assert!((result - expected).abs() <= tolerance(&buffer));
}

#[test]
fn test_accumulation_rounding() {
    // 1024 * 0.1 * 0.1: the single accumulator drifts ~1.4e-4 from 10.24,
    // four 8-wide accumulators stay well within 1e-4.
    let buffer = VectorBuffer::from_fn(1024, |_| (0.1, 0.1)).unwrap();
    let reference = dot_product_original(buffer.as_slice());
    assert!((reference - 10.24).abs() < 2e-4, "reference = {reference}");

    #[cfg(target_arch = "x86_64")]
    {
        if avx2_fma_available() {
            let simd = dot_product_x86_64_avx2(buffer.as_slice());
            assert!((simd - 10.24).abs() < 1e-4, "simd = {simd}");

            let exact = buffer.exact_dot();
            let simd_residual = (simd as f64 - exact).abs();
            let reference_residual = (reference as f64 - exact).abs();
            assert!(
                simd_residual < reference_residual,
                "simd residual {simd_residual} should beat reference residual {reference_residual}"
            );
        }
    }
}

#[test]
fn test_verify_random_inputs() {
    for seed in 0..4 {
        let buffer = VectorBuffer::random(2048, seed).unwrap();
        verify(&buffer).unwrap();
    }
}

#[test]
fn test_tolerance_scales_with_input() {
    let small = VectorBuffer::from_fn(64, |_| (0.001, 0.001)).unwrap();
    let large = VectorBuffer::from_fn(64, |_| (0.01, 0.01)).unwrap();
    assert!(tolerance(&small) > 0.0);
    assert!(tolerance(&large) > tolerance(&small));
    assert_eq!(tolerance(&VectorBuffer::zeroed(0).unwrap()), 0.0);
}

#[test]
fn test_kernels_within_max_product_bound() {
    for seed in 0..4 {
        let buffer = VectorBuffer::random(1024, seed).unwrap();
        let expected = dot_product_original(buffer.as_slice());
        let bound = max_product_bound(&buffer);

        for variant in available_variants() {
            let result = (variant.function)(buffer.as_slice());
            assert!(
                (result - expected).abs() <= bound,
                "seed {seed}: variant '{}' returned {result}, reference {expected}, bound {bound}",
                variant.name
            );
        }
    }
}

#[test]
fn test_max_product_bound_rejects_zero_result() {
    let buffer = VectorBuffer::random(1024, 9).unwrap();
    let reference = dot_product_original(buffer.as_slice());
    // A kernel returning 0.0 would be off by the whole result
    assert!(reference > max_product_bound(&buffer));
    assert!(max_product_bound(&buffer) < tolerance(&buffer));
    assert_eq!(max_product_bound(&VectorBuffer::zeroed(0).unwrap()), 0.0);
}
