//! Vector-aligned heap storage for the kernel inputs.

use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::ptr::NonNull;

use crate::error::{BenchError, Result};

/// Alignment of the buffer base, one 256-bit register.
pub const VECTOR_ALIGN: usize = 32;

/// RAII wrapper for a zero-initialized, 32-byte aligned `[f32]`.
///
/// The memory is released exactly once when the buffer is dropped, on every
/// exit path of the caller.
pub struct AlignedBuffer {
    ptr: NonNull<f32>,
    len: usize,
}

impl AlignedBuffer {
    /// Allocate `len` zeroed floats.
    ///
    /// Returns [`BenchError::Allocation`] if the size overflows or the
    /// allocator returns null.
    pub fn zeroed(len: usize) -> Result<Self> {
        let bytes = len
            .checked_mul(std::mem::size_of::<f32>())
            .ok_or(BenchError::Allocation {
                bytes: usize::MAX,
                align: VECTOR_ALIGN,
            })?;

        if bytes == 0 {
            // Zero-sized allocations are not allowed; an aligned dangling
            // pointer is enough for an empty slice.
            let ptr = NonNull::new(VECTOR_ALIGN as *mut f32).ok_or(BenchError::Allocation {
                bytes,
                align: VECTOR_ALIGN,
            })?;
            return Ok(Self { ptr, len: 0 });
        }

        let layout = Self::layout(bytes)?;
        let raw = unsafe { alloc_zeroed(layout) } as *mut f32;
        let ptr = NonNull::new(raw).ok_or(BenchError::Allocation {
            bytes,
            align: VECTOR_ALIGN,
        })?;
        Ok(Self { ptr, len })
    }

    fn layout(bytes: usize) -> Result<Layout> {
        Layout::from_size_align(bytes, VECTOR_ALIGN).map_err(|_| BenchError::Allocation {
            bytes,
            align: VECTOR_ALIGN,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[f32] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        if self.len == 0 {
            return;
        }
        let bytes = self.len * std::mem::size_of::<f32>();
        if let Ok(layout) = Self::layout(bytes) {
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout) };
        }
    }
}
