//! Utility modules for benchmarking and execution.

pub mod aligned;
pub mod cpu_affinity;
pub mod runner;
pub mod timer;
pub mod tui;

// Re-export commonly used items
pub use aligned::{AlignedBuffer, VECTOR_ALIGN};
pub use cpu_affinity::{available_cores, CpuPinGuard};
pub use timer::{measure_kernel, time_burst, MeasurementRecord, TimingConfig};

/// Information about a kernel variant.
/// Generic over F which is the function signature.
pub struct VariantInfo<F> {
    /// Unique identifier for this variant (e.g., "original", "x86_64-avx2-fma")
    pub name: &'static str,
    /// Human-readable label used in the report
    pub description: &'static str,
    /// The specific implementation function
    pub function: F,
}
