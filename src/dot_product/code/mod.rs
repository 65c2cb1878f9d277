//! Dot product kernels.
//!
//! Every kernel takes the whole input buffer (vector A followed by vector B)
//! and returns `Σ A[i]·B[i]`, so the harness can treat them as one table of
//! interchangeable function pointers.

pub mod c_impl;
#[cfg(feature = "mkl")]
mod mkl;
mod original;
mod scalar_asm;
#[cfg(target_arch = "x86_64")]
mod x86_64_avx2;

pub use c_impl::{dot_product_c_original, C_IMPL_AVAILABLE};
#[cfg(feature = "mkl")]
pub use mkl::dot_product_mkl;
pub use original::dot_product_original;
pub use scalar_asm::dot_product_scalar_asm;
#[cfg(target_arch = "x86_64")]
pub use x86_64_avx2::{dot_product_x86_64_avx2, is_available as avx2_fma_available};

use crate::utils::VariantInfo;

/// Kernel signature shared by every implementation: `(buffer) -> Σ A·B`
/// with `buffer.len() == 2·N`.
pub type KernelFn = fn(&[f32]) -> f32;

/// Name of the variant whose result defines "expected".
pub const REFERENCE_VARIANT: &str = "original";

/// Get all kernels runnable on this CPU and build, in report order.
pub fn available_variants() -> Vec<VariantInfo<KernelFn>> {
    let mut variants: Vec<VariantInfo<KernelFn>> = vec![VariantInfo {
        name: REFERENCE_VARIANT,
        description: "Rust - scalar loop (reference)",
        function: dot_product_original,
    }];

    if C_IMPL_AVAILABLE {
        variants.push(VariantInfo {
            name: "c-original",
            description: "C - scalar loop",
            function: dot_product_c_original,
        });
    }

    variants.push(VariantInfo {
        name: "scalar-asm",
        description: "ASM - unoptimized - scalar loop",
        function: dot_product_scalar_asm,
    });

    #[cfg(target_arch = "x86_64")]
    {
        if avx2_fma_available() {
            variants.push(VariantInfo {
                name: "x86_64-avx2-fma",
                description: "Rust intrinsics - optimized - YMM registers SIMD loop",
                function: dot_product_x86_64_avx2,
            });
        }
    }

    #[cfg(feature = "mkl")]
    variants.push(VariantInfo {
        name: "mkl",
        description: "Intel Math Kernel Library (oneMKL)",
        function: dot_product_mkl,
    });

    variants
}
