//! Input builder: the two vectors packed into one aligned buffer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{BenchError, Result};
use crate::utils::aligned::{AlignedBuffer, VECTOR_ALIGN};

/// Upper bound (exclusive) of the generated input values.
pub const INPUT_MAX: f32 = 0.01;

/// Two equal-length f32 vectors stored back to back in a 32-byte aligned
/// allocation: `[A[0..n], B[0..n]]`.
///
/// Kernels only ever see `as_slice()`, the whole `2·n` buffer.
pub struct VectorBuffer {
    data: AlignedBuffer,
    vector_len: usize,
}

impl VectorBuffer {
    /// Both vectors filled with zeros.
    pub fn zeroed(vector_len: usize) -> Result<Self> {
        let total = vector_len
            .checked_mul(2)
            .ok_or(BenchError::Allocation {
                bytes: usize::MAX,
                align: VECTOR_ALIGN,
            })?;
        Ok(Self {
            data: AlignedBuffer::zeroed(total)?,
            vector_len,
        })
    }

    /// Both vectors filled with values in `[0, INPUT_MAX)` from a seeded
    /// generator. The same seed always yields the same buffer.
    pub fn random(vector_len: usize, seed: u64) -> Result<Self> {
        let mut buffer = Self::zeroed(vector_len)?;
        let mut rng = StdRng::seed_from_u64(seed);
        for x in buffer.data.as_mut_slice() {
            *x = rng.random_range(0.0..INPUT_MAX);
        }
        Ok(buffer)
    }

    /// Build from explicit vectors.
    ///
    /// # Panics
    /// Panics if `a` and `b` differ in length.
    pub fn from_vectors(a: &[f32], b: &[f32]) -> Result<Self> {
        assert_eq!(a.len(), b.len(), "Vectors must have the same length");
        let mut buffer = Self::zeroed(a.len())?;
        let (lo, hi) = buffer.data.as_mut_slice().split_at_mut(a.len());
        lo.copy_from_slice(a);
        hi.copy_from_slice(b);
        Ok(buffer)
    }

    /// Build from a generator called with each index in `0..vector_len`,
    /// returning `(A[i], B[i])`.
    pub fn from_fn<F>(vector_len: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize) -> (f32, f32),
    {
        let mut buffer = Self::zeroed(vector_len)?;
        let (lo, hi) = buffer.data.as_mut_slice().split_at_mut(vector_len);
        for (i, (a, b)) in lo.iter_mut().zip(hi.iter_mut()).enumerate() {
            (*a, *b) = f(i);
        }
        Ok(buffer)
    }

    /// Same contents with A and B exchanged.
    pub fn swapped(&self) -> Result<Self> {
        Self::from_vectors(self.b(), self.a())
    }

    /// Same layout with every element multiplied by `k`.
    pub fn scaled(&self, k: f32) -> Result<Self> {
        let mut buffer = Self::zeroed(self.vector_len)?;
        for (dst, src) in buffer.data.as_mut_slice().iter_mut().zip(self.as_slice()) {
            *dst = src * k;
        }
        Ok(buffer)
    }

    /// Element count of each vector (`N`)
    pub fn vector_len(&self) -> usize {
        self.vector_len
    }

    /// Element count of the whole buffer (`2·N`)
    pub fn total_len(&self) -> usize {
        self.data.len()
    }

    /// The whole buffer, as handed to kernels
    pub fn as_slice(&self) -> &[f32] {
        self.data.as_slice()
    }

    /// Vector A
    pub fn a(&self) -> &[f32] {
        &self.as_slice()[..self.vector_len]
    }

    /// Vector B
    pub fn b(&self) -> &[f32] {
        &self.as_slice()[self.vector_len..]
    }

    /// Largest `|A[i]·B[i]|`, the scale of [`max_product_bound`](crate::dot_product::max_product_bound).
    pub fn max_abs_product(&self) -> f32 {
        self.a()
            .iter()
            .zip(self.b())
            .map(|(x, y)| (x * y).abs())
            .fold(0.0, f32::max)
    }

    /// `Σ |A[i]·B[i]|` accumulated in f64.
    pub fn sum_abs_products(&self) -> f64 {
        self.a()
            .iter()
            .zip(self.b())
            .map(|(&x, &y)| (x as f64 * y as f64).abs())
            .sum()
    }

    /// `Σ A[i]·B[i]` accumulated in f64; exact for the f32 products of
    /// moderately sized inputs and the yardstick for rounding experiments.
    pub fn exact_dot(&self) -> f64 {
        self.a()
            .iter()
            .zip(self.b())
            .map(|(&x, &y)| x as f64 * y as f64)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        let buf = VectorBuffer::from_vectors(&[1.0, 2.0], &[3.0, 4.0]).unwrap();
        assert_eq!(buf.vector_len(), 2);
        assert_eq!(buf.total_len(), 4);
        assert_eq!(buf.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(buf.a(), &[1.0, 2.0]);
        assert_eq!(buf.b(), &[3.0, 4.0]);
    }

    #[test]
    fn test_random_range_and_alignment() {
        let buf = VectorBuffer::random(4096, 7).unwrap();
        assert_eq!(buf.as_slice().as_ptr() as usize % VECTOR_ALIGN, 0);
        assert!(buf.as_slice().iter().all(|&x| (0.0..INPUT_MAX).contains(&x)));
        assert!(buf.as_slice().iter().any(|&x| x > 0.0));
    }

    #[test]
    fn test_random_is_seeded() {
        let first = VectorBuffer::random(1024, 99).unwrap();
        let second = VectorBuffer::random(1024, 99).unwrap();
        let other = VectorBuffer::random(1024, 100).unwrap();
        assert_eq!(first.as_slice(), second.as_slice());
        assert_ne!(first.as_slice(), other.as_slice());
    }

    #[test]
    fn test_swapped_and_scaled() {
        let buf = VectorBuffer::from_fn(3, |i| (i as f32, 10.0 + i as f32)).unwrap();
        let swapped = buf.swapped().unwrap();
        assert_eq!(swapped.a(), buf.b());
        assert_eq!(swapped.b(), buf.a());

        let scaled = buf.scaled(2.0).unwrap();
        assert_eq!(scaled.a(), &[0.0, 2.0, 4.0]);
        assert_eq!(scaled.b(), &[20.0, 22.0, 24.0]);
    }

    #[test]
    fn test_product_statistics() {
        let buf = VectorBuffer::from_vectors(&[1.0, -3.0], &[2.0, 1.0]).unwrap();
        assert_eq!(buf.max_abs_product(), 3.0);
        assert_eq!(buf.sum_abs_products(), 5.0);
        assert_eq!(buf.exact_dot(), -1.0);
    }
}
