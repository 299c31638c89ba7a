//! Expected workload descriptions.
//!
//! Describes the load that produced a trace (usually a benchmark job)
//! and how far the observed statistics may drift from it.
//!
//! ```toml
//! size = 1048576
//! block_size = 4096
//! read_bytes = 1048576
//! write_bytes = 0
//! percentage_random_read = 100
//! percentage_random_write = 0
//! percentage_ios_diff = 5
//! percentage_read_diff = 5
//! percentage_write_diff = 5
//! percentage_rate_diff = 10
//! ```

use crate::utils::error::CheckError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Workload the trace is expected to reflect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadExpectation {
    /// Total bytes transferred by the workload
    pub size: u64,

    /// Size of each request issued by the workload
    pub block_size: u64,

    pub read_bytes: u64,
    pub write_bytes: u64,

    /// Share of reads issued at random offsets [0-100]
    pub percentage_random_read: f64,

    /// Share of writes issued at random offsets [0-100]
    pub percentage_random_write: f64,

    /// Allowed overhead in number of events [0-100]
    pub percentage_ios_diff: f64,

    /// Allowed overhead in bytes read [0-100]
    pub percentage_read_diff: f64,

    /// Allowed overhead in bytes written [0-100]
    pub percentage_write_diff: f64,

    /// Allowed difference, both ways, for sequential/random rates [0-100]
    pub percentage_rate_diff: f64,
}

/// Statistics a trace of the workload should produce
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedStatistics {
    pub events: f64,
    pub read_bytes: f64,
    pub write_bytes: f64,
    pub read_sequential_rate: f64,
    pub read_random_rate: f64,
    pub write_sequential_rate: f64,
    pub write_random_rate: f64,
}

impl WorkloadExpectation {
    /// Reject descriptions that cannot produce meaningful bounds
    pub fn validate(&self) -> Result<(), CheckError> {
        if self.size == 0 {
            return Err(CheckError::InvalidExpectation(
                "size must be greater than 0".to_string(),
            ));
        }
        if self.block_size == 0 {
            return Err(CheckError::InvalidExpectation(
                "block_size must be greater than 0".to_string(),
            ));
        }

        let percentages = [
            ("percentage_random_read", self.percentage_random_read),
            ("percentage_random_write", self.percentage_random_write),
            ("percentage_ios_diff", self.percentage_ios_diff),
            ("percentage_read_diff", self.percentage_read_diff),
            ("percentage_write_diff", self.percentage_write_diff),
            ("percentage_rate_diff", self.percentage_rate_diff),
        ];
        for (name, value) in percentages {
            if !(0.0..=100.0).contains(&value) {
                return Err(CheckError::InvalidExpectation(format!(
                    "{} must be within [0, 100], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Statistics implied by the description
    ///
    /// Rates are shares of the whole workload: reads weigh
    /// `read_bytes / size`, split by the random percentage.
    pub fn expected_statistics(&self) -> ExpectedStatistics {
        let size = self.size as f64;
        let read_bytes = self.read_bytes as f64;
        let write_bytes = self.write_bytes as f64;

        ExpectedStatistics {
            events: size / self.block_size as f64,
            read_bytes,
            write_bytes,
            read_sequential_rate: (100.0 - self.percentage_random_read) * read_bytes
                / (size * 100.0),
            read_random_rate: self.percentage_random_read * read_bytes / (size * 100.0),
            write_sequential_rate: (100.0 - self.percentage_random_write) * write_bytes
                / (size * 100.0),
            write_random_rate: self.percentage_random_write * write_bytes / (size * 100.0),
        }
    }
}

/// Load and validate an expectation file
///
/// # Errors
/// * `CheckError::ReadFailed` - File cannot be read
/// * `CheckError::ParseFailed` - TOML is invalid
/// * `CheckError::InvalidExpectation` - Values are out of range
pub fn load_expectation(path: impl AsRef<Path>) -> Result<WorkloadExpectation, CheckError> {
    let contents = fs::read_to_string(path)?;
    let expectation: WorkloadExpectation = toml::from_str(&contents)?;
    expectation.validate()?;
    Ok(expectation)
}
