//! FFI binding for the C reference kernel.
//!
//! `original.c` is compiled by the build script when a C compiler is found;
//! the kernel is then listed in the roster as `c-original`.

#[cfg(c_implementation_active)]
mod ffi {
    use std::os::raw::{c_float, c_longlong};

    extern "C" {
        pub fn dot_product_c_original(vectors: *const c_float, len: c_longlong) -> c_float;
    }
}

/// Call the C scalar loop on `buffer`
#[cfg(c_implementation_active)]
pub fn dot_product_c_original(buffer: &[f32]) -> f32 {
    // Slices never exceed isize::MAX bytes, so the length fits
    let len = buffer.len() as std::os::raw::c_longlong;
    unsafe { ffi::dot_product_c_original(buffer.as_ptr(), len) }
}

/// Check if C implementations are available
#[cfg(c_implementation_active)]
pub const C_IMPL_AVAILABLE: bool = true;

#[cfg(not(c_implementation_active))]
pub const C_IMPL_AVAILABLE: bool = false;

/// Name of the C compiler used
#[cfg(c_implementation_active)]
pub const COMPILER_NAME: Option<&str> = Some(env!("C_COMPILER_NAME"));

#[cfg(not(c_implementation_active))]
pub const COMPILER_NAME: Option<&str> = None;

// Stub for missing C compiler; never listed in the roster
#[cfg(not(c_implementation_active))]
pub fn dot_product_c_original(_buffer: &[f32]) -> f32 {
    panic!("C implementation not compiled (requires GCC, Clang or MSVC)")
}
