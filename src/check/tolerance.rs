//! Tolerance windows and the check itself.
//!
//! Each checked metric has an allowed (min%, max%) deviation from its
//! expected value. Metrics whose expected value is 0 are not checked.

use super::expectation::{ExpectedStatistics, WorkloadExpectation};
use super::schema::{CheckReport, CheckSummary, Finding};
use crate::parser::schema::StatisticsRecord;
use crate::parser::IoLevel;
use log::{debug, info};
use std::collections::BTreeMap;

/// Statistic that can be compared against an expectation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Events,
    ReadBytes,
    WriteBytes,
    ReadSequentialRate,
    ReadRandomRate,
    WriteSequentialRate,
    WriteRandomRate,
}

impl Metric {
    pub fn name(self) -> &'static str {
        match self {
            Metric::Events => "events",
            Metric::ReadBytes => "read_bytes",
            Metric::WriteBytes => "write_bytes",
            Metric::ReadSequentialRate => "r_seq_rate",
            Metric::ReadRandomRate => "r_rand_rate",
            Metric::WriteSequentialRate => "w_seq_rate",
            Metric::WriteRandomRate => "w_rand_rate",
        }
    }

    pub fn observed(self, record: &StatisticsRecord) -> f64 {
        match self {
            Metric::Events => record.event_count as f64,
            Metric::ReadBytes => record.read_bytes as f64,
            Metric::WriteBytes => record.write_bytes as f64,
            Metric::ReadSequentialRate => record.read_sequential_rate,
            Metric::ReadRandomRate => record.read_random_rate,
            Metric::WriteSequentialRate => record.write_sequential_rate,
            Metric::WriteRandomRate => record.write_random_rate,
        }
    }

    pub fn expected(self, expected: &ExpectedStatistics) -> f64 {
        match self {
            Metric::Events => expected.events,
            Metric::ReadBytes => expected.read_bytes,
            Metric::WriteBytes => expected.write_bytes,
            Metric::ReadSequentialRate => expected.read_sequential_rate,
            Metric::ReadRandomRate => expected.read_random_rate,
            Metric::WriteSequentialRate => expected.write_sequential_rate,
            Metric::WriteRandomRate => expected.write_random_rate,
        }
    }

    /// Event and byte counts only make sense at the level the workload ran at
    pub fn is_volume(self) -> bool {
        matches!(self, Metric::Events | Metric::ReadBytes | Metric::WriteBytes)
    }
}

/// Allowed deviation, in percent of the expected value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub metric: Metric,
    pub below_percent: f64,
    pub above_percent: f64,
}

impl Tolerance {
    /// `[min, max]` window around `expected`
    pub fn bounds(&self, expected: f64) -> (f64, f64) {
        (
            expected * (100.0 - self.below_percent) / 100.0,
            expected * (100.0 + self.above_percent) / 100.0,
        )
    }
}

/// Tolerances described by an expectation file
///
/// Counts may only exceed their expectation (tracing adds overhead),
/// rates may drift both ways.
pub fn tolerances(expectation: &WorkloadExpectation) -> Vec<Tolerance> {
    let one_sided = |metric, above_percent| Tolerance {
        metric,
        below_percent: 0.0,
        above_percent,
    };
    let rate = |metric| Tolerance {
        metric,
        below_percent: expectation.percentage_rate_diff,
        above_percent: expectation.percentage_rate_diff,
    };

    vec![
        one_sided(Metric::Events, expectation.percentage_ios_diff),
        one_sided(Metric::ReadBytes, expectation.percentage_read_diff),
        one_sided(Metric::WriteBytes, expectation.percentage_write_diff),
        rate(Metric::ReadRandomRate),
        rate(Metric::ReadSequentialRate),
        rate(Metric::WriteRandomRate),
        rate(Metric::WriteSequentialRate),
    ]
}

/// Compare one level's statistics against the expectation
pub fn check_statistics(
    level: IoLevel,
    record: &StatisticsRecord,
    expected: &ExpectedStatistics,
    tolerances: &[Tolerance],
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for tolerance in tolerances {
        let expected_value = tolerance.metric.expected(expected);
        if expected_value <= 0.0 {
            continue;
        }

        let actual = tolerance.metric.observed(record);
        let (min, max) = tolerance.bounds(expected_value);
        if actual < min || actual > max {
            debug!(
                "{} {} = {} outside [{}, {}]",
                level,
                tolerance.metric.name(),
                actual,
                min,
                max
            );
            findings.push(Finding::OutOfRange {
                level,
                metric: tolerance.metric.name().to_string(),
                actual,
                min,
                max,
            });
        }
    }

    findings
}

/// Check a profiled trace against the workload that produced it
///
/// VFS statistics are always checked. With direct I/O the block level
/// must carry exactly the VFS bytes, and its rates are checked too.
pub fn check_trace(
    source: &str,
    levels: &BTreeMap<IoLevel, StatisticsRecord>,
    expectation: &WorkloadExpectation,
    direct_io: bool,
) -> CheckReport {
    let expected = expectation.expected_statistics();
    let tolerances = tolerances(expectation);
    let findings = collect_findings(levels, &expected, &tolerances, direct_io);

    let summary = CheckSummary::from_findings(&findings);
    info!("Expectation check: {} ({} findings)", summary.status, summary.finding_count);

    CheckReport {
        source: source.to_string(),
        direct_io,
        findings,
        summary,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }
}

fn collect_findings(
    levels: &BTreeMap<IoLevel, StatisticsRecord>,
    expected: &ExpectedStatistics,
    tolerances: &[Tolerance],
    direct_io: bool,
) -> Vec<Finding> {
    let Some(vfs) = levels.get(&IoLevel::Vfs) else {
        return vec![Finding::MissingLevel {
            level: IoLevel::Vfs,
        }];
    };

    let mut findings = check_statistics(IoLevel::Vfs, vfs, expected, tolerances);
    if !direct_io {
        return findings;
    }

    let Some(block) = levels.get(&IoLevel::Block) else {
        findings.push(Finding::MissingLevel {
            level: IoLevel::Block,
        });
        return findings;
    };

    if vfs.read_bytes != block.read_bytes {
        findings.push(Finding::InconsistentBytes {
            metric: "read_bytes".to_string(),
            vfs: vfs.read_bytes,
            block: block.read_bytes,
        });
    }
    if vfs.write_bytes != block.write_bytes {
        findings.push(Finding::InconsistentBytes {
            metric: "write_bytes".to_string(),
            vfs: vfs.write_bytes,
            block: block.write_bytes,
        });
    }

    let rate_tolerances: Vec<Tolerance> = tolerances
        .iter()
        .copied()
        .filter(|t| !t.metric.is_volume())
        .collect();
    findings.extend(check_statistics(IoLevel::Block, block, expected, &rate_tolerances));

    findings
}
