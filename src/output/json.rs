//! JSON output writer and readers.
//!
//! Writes trace profiles and check reports to JSON files with proper
//! formatting, and reads profiles and extent tables back.

use crate::check::CheckReport;
use crate::extent::ExtentTable;
use crate::parser::schema::TraceProfile;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a trace profile to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let profile = TraceProfile::new("trace.log", levels);
/// write_profile(&profile, "profile.json")?;
/// ```
pub fn write_profile(
    profile: &TraceProfile,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_json(profile, output_path.as_ref(), "profile")
}

/// Write an expectation check report to a JSON file
pub fn write_check_report(
    report: &CheckReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    write_json(report, output_path.as_ref(), "check report")
}

fn write_json<T: Serialize>(value: &T, output_path: &Path, what: &str) -> Result<(), OutputError> {
    info!("Writing {} to: {}", what, output_path.display());

    // Validate path
    super::validate_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value).map_err(OutputError::SerializationFailed)?;

    info!(
        "{} written successfully ({} bytes)",
        what,
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a trace profile from a JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_profile(input_path: impl AsRef<Path>) -> Result<TraceProfile, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading profile from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let profile: TraceProfile = serde_json::from_reader(BufReader::new(file))
        .map_err(OutputError::SerializationFailed)?;

    debug!(
        "Profile loaded: version {}, source {}",
        profile.version, profile.source
    );

    Ok(profile)
}

/// Read an extent table from a JSON file
///
/// The block size is validated while deserializing.
pub fn read_extent_table(input_path: impl AsRef<Path>) -> Result<ExtentTable, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading extent table from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let table: ExtentTable = serde_json::from_reader(BufReader::new(file))
        .map_err(OutputError::SerializationFailed)?;

    debug!(
        "Extent table loaded: {} ({} extents, block size {})",
        table.source(),
        table.extents().len(),
        table.block_size()
    );

    Ok(table)
}
