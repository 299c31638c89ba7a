//! Output writers for statistics, translations and check reports.
//!
//! This module handles:
//! - JSON profiles and check reports (write and read back)
//! - Extent tables (read)
//! - Text summaries

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{read_extent_table, read_profile, write_check_report, write_profile};
pub use text::{render_extent_summary, render_levels, render_statistics, render_translation};

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
