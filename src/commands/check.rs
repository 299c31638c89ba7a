//! Check command implementation.
//! Profiles a trace and compares it against the expected workload.

use super::models::CheckArgs;
use crate::aggregator::analyze_trace;
use crate::check::{check_trace, load_expectation, render_check_report, CheckReport};
use crate::output::write_check_report;
use crate::parser::{IoLevel, TraceLog};
use anyhow::{Context, Result};

/// Execute the check command
///
/// Returns an error when the trace does not match the expectation.
pub fn execute_check(args: CheckArgs) -> Result<CheckReport> {
    // Step 1: Load expectation
    let expectation = load_expectation(&args.expectation_file)
        .context("Failed to load expectation file")?;

    // Step 2: Profile trace
    let log = TraceLog::open(&args.log_file)
        .with_context(|| format!("Failed to open trace log {}", args.log_file.display()))?;
    let levels = analyze_trace(log, &[IoLevel::Vfs, IoLevel::Block])
        .context("Failed to analyze trace")?;

    // Step 3: Compare
    let report = check_trace(
        &args.log_file.display().to_string(),
        &levels,
        &expectation,
        args.direct_io,
    );

    // Step 4: Write output if requested
    if let Some(path) = &args.output_json {
        write_check_report(&report, path).context("Failed to write check report JSON")?;
    }

    // Step 5: Terminal summary
    println!("{}", render_check_report(&report));

    if !report.summary.passed() {
        return Err(anyhow::anyhow!(
            "Trace does not match expectation ({} findings)",
            report.summary.finding_count
        ));
    }

    Ok(report)
}
