//! Benchmark driver for the dot product kernels.

use super::code::{available_variants, REFERENCE_VARIANT};
use super::VectorBuffer;
use crate::error::Result;
use crate::utils::timer::{measure_kernel, MeasurementRecord, TimingConfig};

/// Measure every available kernel on `buffer` in roster order.
///
/// `on_record` is called as soon as each record is ready, so a report can
/// stream while later kernels are still running. Each kernel's result stays
/// in its own record; an implausible result from one kernel has no effect
/// on the others.
pub fn run_all_benchmarks<F>(
    buffer: &VectorBuffer,
    reference: f32,
    timing: &TimingConfig,
    mut on_record: F,
) -> Result<Vec<MeasurementRecord>>
where
    F: FnMut(&MeasurementRecord) -> std::io::Result<()>,
{
    let variants = available_variants();
    let mut records = Vec::with_capacity(variants.len());

    for variant in &variants {
        let is_reference = variant.name == REFERENCE_VARIANT;
        let record = measure_kernel(variant, is_reference, buffer.as_slice(), reference, timing);
        on_record(&record)?;
        records.push(record);
    }

    Ok(records)
}
