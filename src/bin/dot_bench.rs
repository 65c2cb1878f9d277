//! Dot product benchmark binary.
//!
//! Usage:
//!   dot-bench               # run with the compile-time configuration
//!   RUST_LOG=debug dot-bench  # also log per-kernel details to stderr

use std::io::Write;
use std::process::ExitCode;

use dot_bench::utils::tui;
use dot_bench::{run_benchmarks, BenchConfig};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = BenchConfig::default();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match run_benchmarks(&config, &mut out, tui::separator_width()) {
        Ok(records) => {
            tracing::info!(kernels = records.len(), "benchmark finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "benchmark aborted");
            let _ = writeln!(out, "{e}");
            let _ = out.flush();
            ExitCode::FAILURE
        }
    }
}
