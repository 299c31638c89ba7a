//! Profile command implementation.
//!
//! The profile command:
//! 1. Reads the tracer log
//! 2. Classifies events per level
//! 3. Aggregates statistics
//! 4. Writes output

use super::models::ProfileArgs;
use crate::aggregator::analyze_trace;
use crate::output::{render_levels, write_profile};
use crate::parser::{IoLevel, TraceLog, TraceProfile};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the profile command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace log cannot be opened or holds a malformed line
/// * File write errors
pub fn execute_profile(args: ProfileArgs) -> Result<TraceProfile> {
    let start_time = Instant::now();

    info!("Profiling trace: {}", args.log_file.display());

    // Step 1: Open trace
    info!("Step 1/3: Reading trace log...");
    let log = TraceLog::open(&args.log_file)
        .with_context(|| format!("Failed to open trace log {}", args.log_file.display()))?;

    // Step 2: Classify and aggregate
    info!("Step 2/3: Classifying accesses...");
    let levels: Vec<IoLevel> = match args.level {
        Some(level) => vec![level],
        None => IoLevel::ALL.to_vec(),
    };
    let stats = analyze_trace(log, &levels).context("Failed to analyze trace")?;

    for level in &levels {
        match stats.get(level) {
            Some(record) => debug!(
                "{}: {} events, {} KB/s, {} iops",
                level, record.event_count, record.data_transfer_rate, record.iops
            ),
            None => debug!("{}: no events", level),
        }
    }

    let profile = TraceProfile::new(args.log_file.display().to_string(), stats);

    // Step 3: Write outputs
    if let Some(path) = &args.output_json {
        info!("Step 3/3: Writing profile...");
        write_profile(&profile, path).context("Failed to write profile JSON")?;
        info!("✓ Profile written to: {}", path.display());
    } else {
        info!("Step 3/3: Skipping JSON output (not requested)");
    }

    if args.print_summary {
        if profile.levels.is_empty() {
            println!("No events found");
        } else {
            print!("{}", render_levels(&profile.levels));
        }
    }

    let elapsed = start_time.elapsed();
    info!("Profile completed in {:.2}s", elapsed.as_secs_f64());

    Ok(profile)
}

/// Validate profile arguments
///
/// **Public** - can be called before execute_profile for early validation
pub fn validate_args(args: &ProfileArgs) -> Result<()> {
    if args.log_file.as_os_str().is_empty() {
        anyhow::bail!("Trace log path cannot be empty");
    }

    if !args.log_file.is_file() {
        anyhow::bail!("Trace log not found: {}", args.log_file.display());
    }

    if let Some(output) = &args.output_json {
        if output == &args.log_file {
            anyhow::bail!("Output path would overwrite the trace log");
        }
    }

    Ok(())
}
