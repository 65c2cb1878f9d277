//! Error type shared by the input builder, the harness and the reporter.

use thiserror::Error;

/// Everything that can stop a benchmark run.
///
/// Numerical divergence between kernels is not represented here: the report
/// always prints the residual and leaves its interpretation to the reader.
/// Only the explicit [`verify`](crate::dot_product::verify) check turns it
/// into an error.
#[derive(Debug, Error)]
pub enum BenchError {
    /// The aligned input buffer could not be allocated.
    #[error("Memory allocation failed! ({bytes} bytes, {align}-byte aligned)")]
    Allocation { bytes: usize, align: usize },

    /// `N` is zero or not a multiple of the SIMD block.
    #[error("vector length {vector_len} must be a positive multiple of {block}")]
    InvalidVectorLen { vector_len: usize, block: usize },

    /// `M` is zero, so no mean per-call latency exists.
    #[error("iteration count must be positive")]
    ZeroIterations,

    /// A kernel strayed further from the reference than rounding allows.
    #[error("variant '{variant}' failed verification: expected {expected}, got {actual} (tolerance {tolerance})")]
    Verification {
        variant: &'static str,
        expected: f32,
        actual: f32,
        tolerance: f32,
    },

    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;
