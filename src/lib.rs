//! # dot-bench
//!
//! Single-core throughput benchmark of f32 dot product kernels: a scalar
//! reference, an unoptimized assembly loop, an AVX2/FMA kernel with four
//! accumulators and, with the `mkl` feature, Intel oneMKL.

// Pull in the MKL link directives; the bindings live in dot_product::code
#[cfg(feature = "mkl")]
extern crate intel_mkl_src as _;

pub mod config;
pub mod dot_product;
pub mod error;
pub mod utils;

pub use config::BenchConfig;
pub use error::{BenchError, Result};
pub use utils::runner::run_benchmarks;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::config::BenchConfig;
    pub use crate::dot_product::{available_variants, KernelFn, VectorBuffer};
    pub use crate::error::{BenchError, Result};
    pub use crate::utils::{MeasurementRecord, VariantInfo};
}
