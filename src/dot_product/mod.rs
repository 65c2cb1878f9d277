//! # Dot Product Benchmark
//!
//! The dot product (also known as scalar product) computes the sum of products
//! of corresponding elements in two vectors:
//!
//! `dot(a, b) = Σ(a[i] * b[i])`
//!
//! Both vectors live in one aligned buffer, A then B, and every kernel takes
//! that buffer whole. The kernels differ only in how they walk it:
//!
//! - **original**: one accumulator, index order. Defines the expected value.
//! - **c-original**: the same loop compiled by the C compiler.
//! - **scalar-asm**: the same loop in assembly, one element per iteration.
//! - **x86_64-avx2-fma**: 8-wide FMA into 4 independent accumulators.
//! - **mkl**: Intel oneMKL `cblas_sdot` on one thread (`mkl` feature).
//!
//! Summation order differs between the scalar and SIMD kernels, so their
//! results differ by rounding; [`tolerance`] bounds how far.

pub mod bench;
pub mod code;
pub mod input;
#[cfg(test)]
pub mod test;

pub use code::*;
pub use input::VectorBuffer;

use crate::error::{BenchError, Result};

/// f32 lanes in one 256-bit register (`L`).
pub const LANES: usize = 8;

/// Independent accumulators in the SIMD kernel (`K`).
pub const UNROLL: usize = 4;

/// Elements consumed per iteration of the SIMD loop (`L·K`).
pub const BLOCK: usize = LANES * UNROLL;

/// Constant `C` of [`max_product_bound`], in units of `f32::EPSILON`.
pub const MAX_PRODUCT_ULPS: f32 = 8.0;

/// Largest difference two correct kernels may show on `buffer`.
///
/// Recursive summation of `n` terms is off by at most `n·u·Σ|x|` (unit
/// roundoff `u`), whatever the order; two kernels can each be off that much
/// in opposite directions. With `ε = 2u` this is `n·ε·Σ|A[i]·B[i]|`, at most
/// `n·ε·N·max|A[i]·B[i]|`.
///
/// This is the worst case. It grows with `N²` while the result grows with
/// `N`, so at millions of elements it exceeds the result itself and no
/// longer tells a correct kernel from one returning `0.0`. Use
/// [`max_product_bound`] for the tight check.
pub fn tolerance(buffer: &VectorBuffer) -> f32 {
    let n = buffer.vector_len() as f64;
    (n * f32::EPSILON as f64 * buffer.sum_abs_products()) as f32
}

/// `C·N·max|A[i]·B[i]|` with `C = MAX_PRODUCT_ULPS·ε`.
///
/// The typical distance between the SIMD kernel and the single-accumulator
/// reference on inputs up to a few thousand elements. Past that the
/// reference's own drift outgrows any fixed `C`.
pub fn max_product_bound(buffer: &VectorBuffer) -> f32 {
    MAX_PRODUCT_ULPS * f32::EPSILON * buffer.vector_len() as f32 * buffer.max_abs_product()
}

/// Run every available kernel on `buffer` and check it against the
/// reference within [`tolerance`].
pub fn verify(buffer: &VectorBuffer) -> Result<()> {
    let variants = available_variants();
    let expected = dot_product_original(buffer.as_slice());
    let tolerance = tolerance(buffer);

    for variant in variants.iter().filter(|v| v.name != REFERENCE_VARIANT) {
        let actual = (variant.function)(buffer.as_slice());
        if (actual - expected).abs() > tolerance {
            return Err(BenchError::Verification {
                variant: variant.name,
                expected,
                actual,
                tolerance,
            });
        }
    }

    Ok(())
}
