//! Schema definitions for expectation check reports.

use crate::parser::IoLevel;
use serde::{Deserialize, Serialize};

/// Result of checking a trace against an expected workload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Trace that was checked
    pub source: String,

    /// Whether the workload used direct I/O
    pub direct_io: bool,

    pub findings: Vec<Finding>,

    pub summary: CheckSummary,

    /// Timestamp when the check ran
    pub generated_at: String,
}

/// One disagreement between observed and expected statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// The trace holds no event at a level the check needs
    MissingLevel { level: IoLevel },

    /// An observed value lies outside its tolerance window
    OutOfRange {
        level: IoLevel,
        metric: String,
        actual: f64,
        min: f64,
        max: f64,
    },

    /// VFS and block byte counts differ although I/O was direct
    InconsistentBytes { metric: String, vfs: u64, block: u64 },
}

impl Finding {
    pub fn describe(&self) -> String {
        match self {
            Finding::MissingLevel { level } => format!("no {} data", level),
            Finding::OutOfRange {
                level,
                metric,
                actual,
                min,
                max,
            } => format!(
                "{} bad value for {}: {} not in [ {} , {} ]",
                level, metric, actual, min, max
            ),
            Finding::InconsistentBytes { metric, vfs, block } => format!(
                "inconsistent {}: VFS = {} BLK = {}",
                metric, vfs, block
            ),
        }
    }
}

/// Overall outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub finding_count: usize,

    /// "PASSED" or "FAILED"
    pub status: String,
}

impl CheckSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        Self {
            finding_count: findings.len(),
            status: if findings.is_empty() {
                "PASSED".to_string()
            } else {
                "FAILED".to_string()
            },
        }
    }

    pub fn passed(&self) -> bool {
        self.finding_count == 0
    }
}
