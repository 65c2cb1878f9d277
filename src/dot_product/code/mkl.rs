//! Intel oneMKL adapter.
//!
//! The only place the vendor library is visible. `intel-mkl-src` links the
//! static LP64 sequential MKL; the two entry points used here are declared
//! directly since that crate ships no bindings.

use std::os::raw::{c_float, c_int};

/// `MKL_INT` in the LP64 interface
type MklInt = c_int;

extern "C" {
    fn MKL_Set_Num_Threads(nt: c_int);
    fn cblas_sdot(
        n: MklInt,
        x: *const c_float,
        incx: MklInt,
        y: *const c_float,
        incy: MklInt,
    ) -> c_float;
}

/// Compute the dot product of the two halves of `buffer` with `cblas_sdot`,
/// restricted to a single MKL thread.
///
/// # Panics
/// Panics if `buffer.len() / 2` does not fit `MKL_INT`.
pub fn dot_product_mkl(buffer: &[f32]) -> f32 {
    let n = buffer.len() / 2;
    let n_mkl = MklInt::try_from(n).unwrap_or_else(|_| panic!("n = {n} exceeds MKL_INT"));

    unsafe {
        // Process-wide and idempotent, cheap enough to repeat per call
        MKL_Set_Num_Threads(1);
        let a = buffer.as_ptr();
        cblas_sdot(n_mkl, a, 1, a.add(n), 1)
    }
}
