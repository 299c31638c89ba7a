//! Output JSON schema definitions for trace statistics.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use super::event::IoLevel;
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Access-pattern statistics for one observation level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    /// Number of events seen at the level
    pub event_count: u64,

    /// Time between first and last event (seconds)
    pub elapsed_seconds: f64,

    /// Data transfer rate in KB/s
    pub data_transfer_rate: u64,

    /// Throughput in nominal 4 KiB operations per second
    pub iops: u64,

    pub read_bytes: u64,
    pub write_bytes: u64,

    // Fractions of classified events, rounded to 4 decimals
    pub read_sequential_rate: f64,
    pub read_random_rate: f64,
    pub write_sequential_rate: f64,
    pub write_random_rate: f64,

    /// I/O size in bytes -> relative frequency
    pub size_histogram: BTreeMap<u64, f64>,
}

impl StatisticsRecord {
    pub fn total_bytes(&self) -> u64 {
        self.read_bytes.saturating_add(self.write_bytes)
    }

    /// Sum of the four sequential/random rates
    pub fn rate_sum(&self) -> f64 {
        self.read_sequential_rate
            + self.read_random_rate
            + self.write_sequential_rate
            + self.write_random_rate
    }
}

/// Top-level report written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceProfile {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace the statistics were computed from
    pub source: String,

    /// One record per level that had at least one event
    pub levels: BTreeMap<IoLevel, StatisticsRecord>,

    /// Timestamp when the profile was generated
    pub generated_at: String,
}

impl TraceProfile {
    /// Wrap per-level statistics into a versioned, timestamped report
    pub fn new(source: impl Into<String>, levels: BTreeMap<IoLevel, StatisticsRecord>) -> Self {
        use chrono::Utc;

        Self {
            version: SCHEMA_VERSION.to_string(),
            source: source.into(),
            levels,
            generated_at: Utc::now().to_rfc3339(),
        }
    }

    /// Statistics for `level`, or `None` if no event was seen there
    pub fn stats(&self, level: IoLevel) -> Option<&StatisticsRecord> {
        self.levels.get(&level)
    }

    pub fn total_events(&self) -> u64 {
        self.levels.values().map(|r| r.event_count).sum()
    }
}
