//! End-to-end benchmark run: pin, build input, measure, report.

use std::hint::black_box;
use std::io::Write;

use crate::config::BenchConfig;
use crate::dot_product::{self, bench, VectorBuffer};
use crate::error::Result;
use crate::utils::cpu_affinity::{available_cores, CpuPinGuard};
use crate::utils::timer::{MeasurementRecord, TimingConfig};
use crate::utils::tui;

/// Run every available kernel once through the harness and write the
/// report to `out`.
///
/// The configuration is validated before anything is allocated. The input
/// buffer and the CPU pin are released on every return path, including
/// errors.
pub fn run_benchmarks<W: Write>(
    config: &BenchConfig,
    out: &mut W,
    separator_width: usize,
) -> Result<Vec<MeasurementRecord>> {
    config.validate()?;

    if let Some(cores) = available_cores() {
        if config.core_id >= cores {
            tracing::warn!(
                core = config.core_id,
                cores,
                "pin core is not among the online cores"
            );
        }
    }

    let pin = CpuPinGuard::with_core(config.core_id);
    if pin.is_pinned() {
        tracing::debug!(core = config.core_id, "measuring thread pinned");
    } else {
        tracing::warn!(
            core = config.core_id,
            "could not pin the measuring thread; timings may include migrations"
        );
    }

    let seed = config.resolved_seed();
    let buffer = VectorBuffer::random(config.vector_len, seed)?;
    tracing::info!(
        vector_len = config.vector_len,
        iterations = config.iterations,
        seed,
        bytes = buffer.total_len() * std::mem::size_of::<f32>(),
        c_compiler = dot_product::code::c_impl::COMPILER_NAME.unwrap_or("none"),
        "input buffer ready"
    );

    // Computed once, before any timed kernel runs
    let reference = black_box(dot_product::dot_product_original(black_box(
        buffer.as_slice(),
    )));

    let timing = TimingConfig {
        iterations: config.iterations,
        warmup_calls: config.warmup_calls,
    };

    tui::print_header(out, separator_width, config.vector_len, config.iterations)?;
    let records = bench::run_all_benchmarks(&buffer, reference, &timing, |record| {
        tui::print_record(out, record)
    })?;
    tui::print_footer(out, separator_width)?;

    Ok(records)
}
