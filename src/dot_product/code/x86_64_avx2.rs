//! x86_64 AVX2 + FMA SIMD implementation.
//!
//! Processes 8 f32 values per register (256-bit `ymm`) and keeps
//! [`UNROLL`] independent accumulators so consecutive FMAs do not wait on
//! each other's latency: each block of [`BLOCK`] elements issues four
//! independent `vfmadd` into four different registers.
//!
//! ```text
//! acc0 += A[i+ 0..i+ 8] * B[i+ 0..i+ 8]
//! acc1 += A[i+ 8..i+16] * B[i+ 8..i+16]
//! acc2 += A[i+16..i+24] * B[i+16..i+24]
//! acc3 += A[i+24..i+32] * B[i+24..i+32]
//! ```
//!
//! # Preconditions
//! - The buffer base is 32-byte aligned (aligned loads).
//! - `n = len / 2` is a multiple of [`LANES`]. Blocks of [`BLOCK`] run in
//!   the unrolled loop; the 1 to 3 chunks of eight left over go into
//!   accumulators 0..2 afterwards.
//!
//! Violations panic before the loop starts.

use std::arch::x86_64::*;

use crate::dot_product::{BLOCK, LANES, UNROLL};
use crate::utils::aligned::VECTOR_ALIGN;

/// Whether the running CPU can execute [`dot_product_x86_64_avx2`].
pub fn is_available() -> bool {
    is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma")
}

/// Compute the dot product of the two halves of `buffer` using AVX2/FMA.
///
/// # Panics
/// Panics if the CPU lacks AVX2 or FMA, if the base is not 32-byte
/// aligned, or if `buffer.len() / 2` is not a multiple of 8.
pub fn dot_product_x86_64_avx2(buffer: &[f32]) -> f32 {
    let n = buffer.len() / 2;
    if n == 0 {
        return 0.0;
    }

    assert!(is_available(), "AVX2 and FMA are required");
    assert_eq!(
        buffer.as_ptr() as usize % VECTOR_ALIGN,
        0,
        "buffer must be {VECTOR_ALIGN}-byte aligned"
    );
    assert_eq!(n % LANES, 0, "vector length must be a multiple of {LANES}");

    // SAFETY: features checked above; both halves start 32-byte aligned
    // because n is a multiple of 8 floats, and every load stays below 2n.
    unsafe { dot_avx2_fma(buffer.as_ptr(), n) }
}

#[target_feature(enable = "avx2,fma")]
unsafe fn dot_avx2_fma(a: *const f32, n: usize) -> f32 {
    let b = a.add(n);

    let mut acc0 = _mm256_setzero_ps();
    let mut acc1 = _mm256_setzero_ps();
    let mut acc2 = _mm256_setzero_ps();
    let mut acc3 = _mm256_setzero_ps();

    let blocks = n / BLOCK;
    for block in 0..blocks {
        let i = block * BLOCK;

        let a0 = _mm256_load_ps(a.add(i));
        let a1 = _mm256_load_ps(a.add(i + LANES));
        let a2 = _mm256_load_ps(a.add(i + 2 * LANES));
        let a3 = _mm256_load_ps(a.add(i + 3 * LANES));

        let b0 = _mm256_load_ps(b.add(i));
        let b1 = _mm256_load_ps(b.add(i + LANES));
        let b2 = _mm256_load_ps(b.add(i + 2 * LANES));
        let b3 = _mm256_load_ps(b.add(i + 3 * LANES));

        acc0 = _mm256_fmadd_ps(a0, b0, acc0);
        acc1 = _mm256_fmadd_ps(a1, b1, acc1);
        acc2 = _mm256_fmadd_ps(a2, b2, acc2);
        acc3 = _mm256_fmadd_ps(a3, b3, acc3);
    }

    // At most UNROLL - 1 chunks remain
    let tail = blocks * BLOCK;
    let chunks = (n - tail) / LANES;
    debug_assert!(chunks < UNROLL);
    if chunks > 0 {
        acc0 = _mm256_fmadd_ps(_mm256_load_ps(a.add(tail)), _mm256_load_ps(b.add(tail)), acc0);
    }
    if chunks > 1 {
        let i = tail + LANES;
        acc1 = _mm256_fmadd_ps(_mm256_load_ps(a.add(i)), _mm256_load_ps(b.add(i)), acc1);
    }
    if chunks > 2 {
        let i = tail + 2 * LANES;
        acc2 = _mm256_fmadd_ps(_mm256_load_ps(a.add(i)), _mm256_load_ps(b.add(i)), acc2);
    }

    // Pairwise combine, then horizontal sum of the 256-bit register
    let sum = _mm256_add_ps(_mm256_add_ps(acc0, acc1), _mm256_add_ps(acc2, acc3));
    hsum256(sum)
}

/// Halve-and-add three times: 8 lanes -> 4 -> 2 -> 1.
#[target_feature(enable = "avx2")]
unsafe fn hsum256(v: __m256) -> f32 {
    // v = [a, b, c, d, e, f, g, h]
    let hi = _mm256_extractf128_ps(v, 1); // [e, f, g, h]
    let lo = _mm256_castps256_ps128(v); // [a, b, c, d]
    let sum128 = _mm_add_ps(lo, hi); // [a+e, b+f, c+g, d+h]

    let high64 = _mm_movehl_ps(sum128, sum128); // [c+g, d+h, ..]
    let sum64 = _mm_add_ps(sum128, high64); // [a+e+c+g, b+f+d+h, ..]

    let high32 = _mm_shuffle_ps(sum64, sum64, 0b01); // [b+f+d+h, ..]
    let sum32 = _mm_add_ss(sum64, high32);

    _mm_cvtss_f32(sum32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::aligned::AlignedBuffer;

    fn buffer_from(a: &[f32], b: &[f32]) -> AlignedBuffer {
        let mut buf = AlignedBuffer::zeroed(a.len() + b.len()).unwrap();
        let (lo, hi) = buf.as_mut_slice().split_at_mut(a.len());
        lo.copy_from_slice(a);
        hi.copy_from_slice(b);
        buf
    }

    #[test]
    fn test_hsum_order() {
        if !is_available() {
            return;
        }
        let values = [1.0f32, 2.0, 4.0, 8.0, 16.0, 32.0, 64.0, 128.0];
        let sum = unsafe { hsum256(_mm256_loadu_ps(values.as_ptr())) };
        assert_eq!(sum, 255.0);
    }

    #[test]
    fn test_each_tail_length() {
        if !is_available() {
            return;
        }
        // One full block plus 0..=3 leftover chunks
        for n in [32, 40, 48, 56, 64, 8, 16, 24] {
            let a: Vec<f32> = (0..n).map(|i| (i % 5) as f32).collect();
            let b: Vec<f32> = (0..n).map(|i| (i % 3) as f32).collect();
            let expected: f32 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
            let buf = buffer_from(&a, &b);
            assert_eq!(dot_product_x86_64_avx2(buf.as_slice()), expected, "n = {n}");
        }
    }

    #[test]
    #[should_panic(expected = "multiple of 8")]
    fn test_rejects_partial_lane() {
        if !is_available() {
            panic!("vector length must be a multiple of 8");
        }
        let buf = AlignedBuffer::zeroed(2 * 12).unwrap();
        dot_product_x86_64_avx2(buf.as_slice());
    }

    #[test]
    #[should_panic(expected = "aligned")]
    fn test_rejects_misaligned_base() {
        if !is_available() {
            panic!("buffer must be aligned");
        }
        let buf = AlignedBuffer::zeroed(2 * 32 + 1).unwrap();
        dot_product_x86_64_avx2(&buf.as_slice()[1..]);
    }
}
