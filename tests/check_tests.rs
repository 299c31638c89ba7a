use iotrace_studio::aggregator::analyze_events;
use iotrace_studio::check::{check_trace, load_expectation, render_check_report, Finding};
use iotrace_studio::parser::{IoEvent, IoLevel};
use std::fs;
use tempfile::tempdir;

const SEQUENTIAL_READ: &str = r#"
size = 16384
block_size = 4096
read_bytes = 16384
write_bytes = 0
percentage_random_read = 0
percentage_random_write = 0
percentage_ios_diff = 10
percentage_read_diff = 10
percentage_write_diff = 10
percentage_rate_diff = 10
"#;

fn sequential_reads(level: IoLevel, unit: u64) -> Vec<IoEvent> {
    (0..4u64)
        .map(|i| IoEvent {
            timestamp: i as f64 * 0.01,
            direction: iotrace_studio::parser::IoDirection::Read,
            address: i * 4096 / unit,
            size: 4096,
            level,
            task_name: "fio".to_string(),
            task_pid: 7,
        })
        .collect()
}

fn write_expectation(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("workload.toml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_load_expectation() {
    let (_dir, path) = write_expectation(SEQUENTIAL_READ);

    let expectation = load_expectation(&path).unwrap();

    assert_eq!(expectation.size, 16384);
    assert_eq!(expectation.expected_statistics().events, 4.0);
}

#[test]
fn test_load_expectation_missing_field() {
    let (_dir, path) = write_expectation("size = 4096\n");
    assert!(load_expectation(&path).is_err());
}

#[test]
fn test_matching_trace_passes() {
    let (_dir, path) = write_expectation(SEQUENTIAL_READ);
    let expectation = load_expectation(&path).unwrap();
    let levels = analyze_events(&sequential_reads(IoLevel::Vfs, 1));

    let report = check_trace("trace.log", &levels, &expectation, false);

    assert!(report.summary.passed());
    assert_eq!(report.summary.status, "PASSED");
    assert!(render_check_report(&report).contains("PASSED"));
}

#[test]
fn test_short_trace_fails() {
    let (_dir, path) = write_expectation(&SEQUENTIAL_READ.replace("size = 16384", "size = 32768").replace("read_bytes = 16384", "read_bytes = 32768"));
    let expectation = load_expectation(&path).unwrap();
    let levels = analyze_events(&sequential_reads(IoLevel::Vfs, 1));

    let report = check_trace("trace.log", &levels, &expectation, false);

    assert!(!report.summary.passed());
    let metrics: Vec<&str> = report
        .findings
        .iter()
        .filter_map(|finding| match finding {
            Finding::OutOfRange { metric, .. } => Some(metric.as_str()),
            _ => None,
        })
        .collect();
    assert!(metrics.contains(&"events"));
    assert!(metrics.contains(&"read_bytes"));
}

#[test]
fn test_missing_vfs_level() {
    let (_dir, path) = write_expectation(SEQUENTIAL_READ);
    let expectation = load_expectation(&path).unwrap();
    let levels = analyze_events(&sequential_reads(IoLevel::Block, 512));

    let report = check_trace("trace.log", &levels, &expectation, false);

    assert_eq!(
        report.findings,
        vec![Finding::MissingLevel {
            level: IoLevel::Vfs
        }]
    );
}

#[test]
fn test_direct_io_requires_matching_block_bytes() {
    let (_dir, path) = write_expectation(SEQUENTIAL_READ);
    let expectation = load_expectation(&path).unwrap();

    let mut events = sequential_reads(IoLevel::Vfs, 1);
    events.extend(sequential_reads(IoLevel::Block, 512).into_iter().take(3));
    let levels = analyze_events(&events);

    let report = check_trace("trace.log", &levels, &expectation, true);

    assert!(report.findings.contains(&Finding::InconsistentBytes {
        metric: "read_bytes".to_string(),
        vfs: 16384,
        block: 12288,
    }));
}

#[test]
fn test_direct_io_consistent_trace_passes() {
    let (_dir, path) = write_expectation(SEQUENTIAL_READ);
    let expectation = load_expectation(&path).unwrap();

    let mut events = sequential_reads(IoLevel::Vfs, 1);
    events.extend(sequential_reads(IoLevel::Block, 512));
    let levels = analyze_events(&events);

    let report = check_trace("trace.log", &levels, &expectation, true);

    assert!(report.summary.passed(), "{:?}", report.findings);
}
