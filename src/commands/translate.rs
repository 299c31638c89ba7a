//! Translate command implementation.
//!
//! Echoes every trace event and, below each VFS event, the block
//! accesses it should have produced according to the file's extent map.

use super::models::TranslateArgs;
use crate::output::{read_extent_table, render_extent_summary, render_translation};
use crate::parser::{IoLevel, TraceLog};
use crate::translator::translate_event;
use anyhow::{Context, Result};
use log::{debug, info};

/// Execute the translate command
///
/// Stops at the first event that falls into a hole of the extent map.
pub fn execute_translate(args: TranslateArgs) -> Result<()> {
    info!("Loading extent table: {}", args.extent_file.display());
    let table = read_extent_table(&args.extent_file)
        .with_context(|| format!("Failed to read extent table {}", args.extent_file.display()))?;
    debug!("{}", render_extent_summary(&table));

    let log = TraceLog::open(&args.log_file)
        .with_context(|| format!("Failed to open trace log {}", args.log_file.display()))?;

    info!("Translating VFS accesses ({} I/O)", args.mode);

    let mut translated = 0usize;
    for event in log {
        let event = event.context("Failed to parse trace log")?;

        let accesses = if event.level == IoLevel::Vfs {
            translated += 1;
            translate_event(&table, &event, args.mode).with_context(|| {
                format!("Failed to translate access at {}", event.to_listing())
            })?
        } else {
            Vec::new()
        };

        println!("{}", render_translation(&event, &accesses));
    }

    info!("Translated {} VFS accesses", translated);

    Ok(())
}

/// Validate translate arguments
pub fn validate_args(args: &TranslateArgs) -> Result<()> {
    if !args.log_file.is_file() {
        anyhow::bail!("Trace log not found: {}", args.log_file.display());
    }

    if !args.extent_file.is_file() {
        anyhow::bail!("Extent table not found: {}", args.extent_file.display());
    }

    Ok(())
}
