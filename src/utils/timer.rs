//! Timing of one kernel over a burst of back-to-back calls.
//!
//! Each measurement opens a single high-resolution window around `M`
//! consecutive calls and divides by `M`. Per-call timestamps would cost more
//! than the cache-resident calls of small inputs, and for large inputs the
//! burst settles into steady-state memory throughput after the first call.
//!
//! [`Instant`] is the monotonic OS counter (`clock_gettime(CLOCK_MONOTONIC)`
//! on Linux, `QueryPerformanceCounter` on Windows); `Instant::now` and
//! `Instant::elapsed` read and scale it as a matching pair.

use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::dot_product::KernelFn;
use crate::utils::VariantInfo;

/// Timing parameters for one measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    /// Timed calls per measurement (`M`)
    pub iterations: usize,
    /// Untimed calls before the window opens
    pub warmup_calls: usize,
}

/// Outcome of measuring one kernel.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasurementRecord {
    /// Short variant id (e.g. "x86_64-avx2-fma")
    pub name: &'static str,
    /// Label printed in the report
    pub label: &'static str,
    /// Whether this kernel defines the expected value
    pub is_reference: bool,
    /// Mean wall-clock seconds per call
    pub mean_seconds: f64,
    /// Result of the last timed call
    pub result: f32,
    /// Reference result computed before any measurement
    pub reference: f32,
}

impl MeasurementRecord {
    /// Mean time per call in milliseconds
    pub fn millis(&self) -> f64 {
        self.mean_seconds * 1_000.0
    }

    /// Mean time per call in microseconds
    pub fn micros(&self) -> f64 {
        self.mean_seconds * 1_000_000.0
    }

    /// Accumulated floating point error, `reference - result`
    pub fn error(&self) -> f32 {
        self.reference - self.result
    }

    /// Absolute error against the reference
    pub fn abs_error(&self) -> f32 {
        self.error().abs()
    }
}

/// Time `iterations` back-to-back calls of `f` and return the total elapsed
/// time with the last result.
///
/// Every result goes through `black_box`, so no call can be dropped as dead
/// code even though the kernels are pure.
///
/// # Panics
/// Panics if `iterations` is zero.
#[inline(never)]
pub fn time_burst<R, F>(iterations: usize, mut f: F) -> (Duration, R)
where
    F: FnMut() -> R,
{
    assert!(iterations > 0, "iterations must be positive");

    let start = Instant::now();
    let mut last = black_box(f());
    for _ in 1..iterations {
        last = black_box(f());
    }
    let elapsed = start.elapsed();

    (elapsed, last)
}

/// Measure one kernel on `buffer`.
///
/// The function pointer and the buffer are passed through `black_box` on
/// every call so the optimizer can neither inline the kernel into the loop
/// nor hoist the call out of it.
pub fn measure_kernel(
    variant: &VariantInfo<KernelFn>,
    is_reference: bool,
    buffer: &[f32],
    reference: f32,
    config: &TimingConfig,
) -> MeasurementRecord {
    let kernel = variant.function;

    for _ in 0..config.warmup_calls {
        black_box(black_box(kernel)(black_box(buffer)));
    }

    let (elapsed, result) = time_burst(config.iterations, || {
        black_box(kernel)(black_box(buffer))
    });
    let mean_seconds = elapsed.as_secs_f64() / config.iterations as f64;

    tracing::debug!(
        variant = variant.name,
        iterations = config.iterations,
        total_ms = elapsed.as_secs_f64() * 1_000.0,
        mean_us = mean_seconds * 1_000_000.0,
        result,
        "kernel measured"
    );

    MeasurementRecord {
        name: variant.name,
        label: variant.description,
        is_reference,
        mean_seconds,
        result,
        reference,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_time_burst_calls_exactly_m_times() {
        let calls = Cell::new(0usize);
        let (elapsed, last) = time_burst(17, || {
            calls.set(calls.get() + 1);
            calls.get()
        });
        assert_eq!(calls.get(), 17);
        assert_eq!(last, 17);
        assert!(elapsed >= Duration::ZERO);
    }

    #[test]
    #[should_panic(expected = "iterations must be positive")]
    fn test_time_burst_rejects_zero() {
        time_burst(0, || 1);
    }

    #[test]
    fn test_measure_kernel_record() {
        fn fixed(_buffer: &[f32]) -> f32 {
            std::thread::sleep(Duration::from_millis(2));
            3.5
        }

        let variant = VariantInfo {
            name: "fixed",
            description: "Fixed sleeper",
            function: fixed as KernelFn,
        };
        let config = TimingConfig {
            iterations: 3,
            warmup_calls: 1,
        };

        let record = measure_kernel(&variant, false, &[0.0; 4], 4.0, &config);
        assert_eq!(record.name, "fixed");
        assert_eq!(record.label, "Fixed sleeper");
        assert!(!record.is_reference);
        assert_eq!(record.result, 3.5);
        assert_eq!(record.reference, 4.0);
        assert_eq!(record.error(), 0.5);
        // Each call sleeps at least 2 ms, so the mean cannot be lower
        assert!(record.millis() >= 2.0, "mean = {} ms", record.millis());
        assert!((record.micros() - record.millis() * 1_000.0).abs() < 1e-6);
    }
}
