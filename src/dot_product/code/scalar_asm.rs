//! Unoptimized scalar baseline written in assembly.
//!
//! One element per iteration, one accumulator, no unrolling and no packed
//! instructions. It exposes how much of the SIMD kernel's speed comes from
//! the wide registers rather than from the compiler.
//!
//! ```asm
//! xorps   acc, acc
//! 2:
//! movss   tmp, [a + i*4]      ; tmp = A[i]
//! mulss   tmp, [b + i*4]      ; tmp *= B[i]
//! addss   acc, tmp            ; acc += tmp
//! inc     i
//! cmp     i, n
//! jb      2b
//! ```
//!
//! The products are rounded before the add (no FMA), in index order, so the
//! result is bit-identical to [`dot_product_original`](super::dot_product_original).

#[cfg(target_arch = "x86_64")]
use std::arch::asm;

/// Compute the dot product of the two halves of `buffer` with a scalar
/// assembly loop.
#[cfg(target_arch = "x86_64")]
#[inline(never)]
pub fn dot_product_scalar_asm(buffer: &[f32]) -> f32 {
    let n = buffer.len() / 2;
    if n == 0 {
        return 0.0;
    }

    let a = buffer.as_ptr();
    let acc: f32;

    unsafe {
        let b = a.add(n);
        asm!(
            "xorps {acc}, {acc}",
            "2:",
            "movss {tmp}, dword ptr [{a} + {i}*4]",
            "mulss {tmp}, dword ptr [{b} + {i}*4]",
            "addss {acc}, {tmp}",
            "inc {i}",
            "cmp {i}, {n}",
            "jb 2b",
            a = in(reg) a,
            b = in(reg) b,
            n = in(reg) n,
            i = inout(reg) 0usize => _,
            acc = out(xmm_reg) acc,
            tmp = out(xmm_reg) _,
            options(nostack, readonly),
        );
    }

    acc
}

/// Scalar loop for targets without the assembly version.
///
/// Routing the accumulator through `black_box` keeps the optimizer from
/// unrolling or vectorizing it.
#[cfg(not(target_arch = "x86_64"))]
#[inline(never)]
pub fn dot_product_scalar_asm(buffer: &[f32]) -> f32 {
    let n = buffer.len() / 2;
    let mut acc = 0.0f32;
    for i in 0..n {
        acc = std::hint::black_box(acc + buffer[i] * buffer[n + i]);
    }
    acc
}
