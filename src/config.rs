//! Compile-time benchmark configuration.
//!
//! The binary takes no arguments: change the constants below and rebuild.
//! Tests and benches build a [`BenchConfig`] with smaller values instead.

use crate::dot_product::BLOCK;
use crate::error::{BenchError, Result};

/// Per-vector element count `N`.
pub const VECTOR_LEN: usize = 10_000_000;

/// Back-to-back calls per measurement `M`.
pub const TEST_ITERS: usize = 100;

/// Logical core the measuring thread is pinned to.
pub const PIN_CORE: usize = 0;

/// Untimed calls per kernel before its timing window opens.
///
/// Applied to every kernel alike so the vendor library's one-time setup
/// does not land in its measurement.
pub const WARMUP_CALLS: usize = 1;

/// Configuration of one benchmark run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    /// Number of elements in each of the two vectors
    pub vector_len: usize,
    /// Number of timed calls per kernel
    pub iterations: usize,
    /// Core to pin the measuring thread to
    pub core_id: usize,
    /// Untimed calls before each measurement
    pub warmup_calls: usize,
    /// Seed for the input data; `None` seeds from the wall clock
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            vector_len: VECTOR_LEN,
            iterations: TEST_ITERS,
            core_id: PIN_CORE,
            warmup_calls: WARMUP_CALLS,
            seed: None,
        }
    }
}

impl BenchConfig {
    /// Check the preconditions every kernel relies on.
    ///
    /// The harness never invokes a kernel with a length the SIMD kernel's
    /// unrolled loop cannot consume.
    pub fn validate(&self) -> Result<()> {
        if self.vector_len == 0 || self.vector_len % BLOCK != 0 {
            return Err(BenchError::InvalidVectorLen {
                vector_len: self.vector_len,
                block: BLOCK,
            });
        }
        if self.iterations == 0 {
            return Err(BenchError::ZeroIterations);
        }
        Ok(())
    }

    /// Seed to fill the input with, resolving `None` from the clock.
    pub fn resolved_seed(&self) -> u64 {
        self.seed.unwrap_or_else(time_seed)
    }
}

/// Get a seed from current time for randomization
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x12345678)
}
