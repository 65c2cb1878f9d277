//! Hard CPU affinity for the measuring thread.
//!
//! Pinning keeps the thread from migrating mid-measurement and refilling a
//! cold cache inside the timing window. It is best-effort: when the OS
//! refuses, measurements still run and stay comparable among themselves.
//!
//! Implemented with platform APIs directly (libc on Linux, kernel32 on
//! Windows). Other platforms have no hard affinity and never pin.

// ============================================================================
// Linux implementation using libc
// ============================================================================

#[cfg(target_os = "linux")]
mod platform {
    pub type Mask = libc::cpu_set_t;

    pub fn core_count() -> Option<usize> {
        let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        (n > 0).then_some(n as usize)
    }

    pub fn current_mask() -> Option<Mask> {
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            (libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &mut set) == 0)
                .then_some(set)
        }
    }

    /// Pin to `core_id`, returning the mask to restore on success.
    pub fn pin(core_id: usize) -> Option<Mask> {
        // CPU_SET indexes past the end of the set otherwise
        if core_id >= libc::CPU_SETSIZE as usize {
            return None;
        }
        let previous = current_mask()?;
        unsafe {
            let mut set: libc::cpu_set_t = std::mem::zeroed();
            libc::CPU_ZERO(&mut set);
            libc::CPU_SET(core_id, &mut set);
            (libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set) == 0)
                .then_some(previous)
        }
    }

    pub fn restore(mask: &Mask) -> bool {
        unsafe { libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), mask) == 0 }
    }
}

// ============================================================================
// Windows implementation
// ============================================================================

#[cfg(target_os = "windows")]
mod platform {
    type Handle = *mut std::ffi::c_void;
    pub type Mask = usize;

    extern "system" {
        fn GetCurrentThread() -> Handle;
        fn SetThreadAffinityMask(thread: Handle, mask: usize) -> usize;
        fn GetActiveProcessorCount(group: u16) -> u32;
    }

    const ALL_PROCESSOR_GROUPS: u16 = 0xffff;

    pub fn core_count() -> Option<usize> {
        let n = unsafe { GetActiveProcessorCount(ALL_PROCESSOR_GROUPS) };
        (n > 0).then_some(n as usize)
    }

    /// Pin to `core_id`, returning the mask to restore on success.
    ///
    /// SetThreadAffinityMask hands back the previous mask, or 0 on failure.
    pub fn pin(core_id: usize) -> Option<Mask> {
        if core_id >= usize::BITS as usize {
            return None;
        }
        let previous = unsafe { SetThreadAffinityMask(GetCurrentThread(), 1usize << core_id) };
        (previous != 0).then_some(previous)
    }

    pub fn restore(mask: &Mask) -> bool {
        unsafe { SetThreadAffinityMask(GetCurrentThread(), *mask) != 0 }
    }
}

// ============================================================================
// Fallback for platforms without hard affinity (macOS included)
// ============================================================================

#[cfg(not(any(target_os = "linux", target_os = "windows")))]
mod platform {
    pub type Mask = ();

    pub fn core_count() -> Option<usize> {
        std::thread::available_parallelism().ok().map(|n| n.get())
    }

    pub fn pin(_core_id: usize) -> Option<Mask> {
        None
    }

    pub fn restore(_mask: &Mask) -> bool {
        true
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Number of online logical cores, if the platform reports it.
pub fn available_cores() -> Option<usize> {
    platform::core_count()
}

/// Pins the calling thread to one core for as long as the guard lives.
///
/// The affinity the thread had before is restored on drop, even if the code
/// in between panics.
///
/// # Example
/// ```
/// use dot_bench::utils::CpuPinGuard;
///
/// let pin = CpuPinGuard::with_core(0);
/// if !pin.is_pinned() {
///     // measurements proceed unpinned
/// }
/// ```
pub struct CpuPinGuard {
    pinned_core: Option<usize>,
    previous: Option<platform::Mask>,
}

impl CpuPinGuard {
    /// Pin the current thread to `core_id`.
    pub fn with_core(core_id: usize) -> Self {
        let previous = platform::pin(core_id);
        Self {
            pinned_core: previous.as_ref().map(|_| core_id),
            previous,
        }
    }

    /// Get the core ID this thread is pinned to, if any.
    pub fn core_id(&self) -> Option<usize> {
        self.pinned_core
    }

    /// Check if the thread was successfully pinned.
    pub fn is_pinned(&self) -> bool {
        self.pinned_core.is_some()
    }
}

impl Drop for CpuPinGuard {
    fn drop(&mut self) {
        if let Some(mask) = self.previous.take() {
            if !platform::restore(&mask) {
                tracing::debug!("could not restore the previous CPU affinity");
            }
        }
    }
}
