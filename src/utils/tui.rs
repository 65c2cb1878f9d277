//! Text report of a benchmark run.
//!
//! Plain, line-oriented output framed by separator lines. Everything is
//! written to a caller-supplied `Write` so the report can be captured.

use std::io::{self, Write};

use terminal_size::{terminal_size, Width};

use crate::utils::timer::MeasurementRecord;

/// Widest separator line, also used when stdout is not a terminal.
pub const SEPARATOR_WIDTH: usize = 94;

/// Get the separator width, following the terminal but never wider than
/// [`SEPARATOR_WIDTH`]
pub fn separator_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, SEPARATOR_WIDTH)
    } else {
        SEPARATOR_WIDTH
    }
}

fn separator(width: usize) -> String {
    "=".repeat(width)
}

/// Print the framing line and the benchmark header
pub fn print_header<W: Write>(
    out: &mut W,
    width: usize,
    vector_len: usize,
    iterations: usize,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", separator(width))?;
    writeln!(out)?;
    writeln!(out, "DOT PRODUCT BENCHMARK")?;
    writeln!(
        out,
        "compute dot product of two vectors of n = {} float elements",
        vector_len
    )?;
    writeln!(out, "(average of n={} runs)", iterations)?;
    writeln!(out)?;
    Ok(())
}

/// Print one measurement record followed by a blank line
pub fn print_record<W: Write>(out: &mut W, record: &MeasurementRecord) -> io::Result<()> {
    writeln!(out, "Test: {}", record.label)?;
    writeln!(
        out,
        "Time: {:.3} ms, {:.1} us",
        record.millis(),
        record.micros()
    )?;
    writeln!(out, "Dot product result: {:.2}", record.result)?;
    writeln!(out, "Dot product test result: {:.2}", record.reference)?;
    writeln!(out, "Accumulated floating point error: {:.8}", record.error())?;
    writeln!(out)?;
    Ok(())
}

/// Print the closing framing line
pub fn print_footer<W: Write>(out: &mut W, width: usize) -> io::Result<()> {
    writeln!(out, "{}", separator(width))?;
    out.flush()
}
