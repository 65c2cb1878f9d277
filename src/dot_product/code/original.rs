//! Original (reference) implementation of dot product.
//!
//! This is a clean, idiomatic Rust implementation that serves as the
//! baseline for correctness: its result is the "expected" value every
//! other kernel is compared against.

/// Compute the dot product of the two halves of `buffer`.
///
/// Sums `A[i] * B[i]` left to right into a single f32 accumulator, where
/// `A = buffer[..n]`, `B = buffer[n..2n]` and `n = buffer.len() / 2`.
/// A trailing odd element is ignored.
///
/// # Example
/// ```
/// use dot_bench::dot_product::dot_product_original;
///
/// // A = [1, 2, 3], B = [4, 5, 6]
/// let buffer = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// assert_eq!(dot_product_original(&buffer), 32.0);
/// ```
pub fn dot_product_original(buffer: &[f32]) -> f32 {
    let n = buffer.len() / 2;
    let (a, b) = buffer.split_at(n);

    // fold from +0.0: `Sum` for floats starts at -0.0
    a.iter().zip(&b[..n]).fold(0.0, |acc, (x, y)| acc + x * y)
}
