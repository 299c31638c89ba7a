//! Plain-text summaries.

use crate::extent::ExtentTable;
use crate::parser::schema::StatisticsRecord;
use crate::parser::{IoEvent, IoLevel};
use crate::translator::SyntheticBlockAccess;
use crate::utils::config::HISTOGRAM_DISPLAY_THRESHOLD;
use std::collections::BTreeMap;

/// Render the statistics of one level
///
/// Histogram buckets under 1% are hidden.
pub fn render_statistics(record: &StatisticsRecord) -> String {
    let mut lines = vec![
        format!("events={}", record.event_count),
        format!(
            "time={} dtr={} iops={}",
            record.elapsed_seconds, record.data_transfer_rate, record.iops
        ),
        format!(
            "read: io={} seq={} rand={}",
            record.read_bytes, record.read_sequential_rate, record.read_random_rate
        ),
        format!(
            "write: io={} seq={} rand={}",
            record.write_bytes, record.write_sequential_rate, record.write_random_rate
        ),
        "size distribution:".to_string(),
    ];

    lines.extend(
        record
            .size_histogram
            .iter()
            .filter(|&(_, &frequency)| frequency >= HISTOGRAM_DISPLAY_THRESHOLD)
            .map(|(size, frequency)| format!("{}\t{:.4}", size, frequency)),
    );

    lines.join("\n")
}

/// Render every level that has statistics, block level first
pub fn render_levels(levels: &BTreeMap<IoLevel, StatisticsRecord>) -> String {
    let mut out = String::new();
    for (level, record) in levels {
        out.push_str(&format!("---- {} ----\n", level));
        out.push_str(&render_statistics(record));
        out.push('\n');
    }
    out
}

/// Render an event followed by the block accesses it maps to
pub fn render_translation(event: &IoEvent, accesses: &[SyntheticBlockAccess]) -> String {
    let mut out = event.to_listing();
    for access in accesses {
        out.push_str(&format!("\n->\t{}", access));
    }
    out
}

/// One-paragraph description of an extent table
pub fn render_extent_summary(table: &ExtentTable) -> String {
    format!(
        "{}: {} bytes, {} blocks of {} bytes, {} extents, {} unmapped blocks",
        table.source(),
        table.file_size(),
        table.block_count(),
        table.block_size(),
        table.extents().len(),
        table.hole_blocks()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> StatisticsRecord {
        let mut size_histogram = BTreeMap::new();
        size_histogram.insert(512, 0.005);
        size_histogram.insert(4096, 0.995);

        StatisticsRecord {
            event_count: 200,
            elapsed_seconds: 2.5,
            data_transfer_rate: 318,
            iops: 80,
            read_bytes: 815_616,
            write_bytes: 0,
            read_sequential_rate: 0.75,
            read_random_rate: 0.25,
            write_sequential_rate: 0.0,
            write_random_rate: 0.0,
            size_histogram,
        }
    }

    #[test]
    fn test_render_statistics_hides_rare_sizes() {
        let text = render_statistics(&sample_record());
        let expected = "\
events=200
time=2.5 dtr=318 iops=80
read: io=815616 seq=0.75 rand=0.25
write: io=0 seq=0 rand=0
size distribution:
4096\t0.9950";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_levels_header() {
        let mut levels = BTreeMap::new();
        levels.insert(IoLevel::Vfs, sample_record());
        let text = render_levels(&levels);
        assert!(text.starts_with("---- VFS ----\nevents=200"));
    }

    #[test]
    fn test_render_translation() {
        let event: IoEvent = "1.000000000;R;4096;512;VFS;dd;9".parse().unwrap();
        let accesses = [SyntheticBlockAccess {
            physical_address: 80,
            size: 512,
        }];
        assert_eq!(
            render_translation(&event, &accesses),
            "1.000000000:R:4096:512:VFS:dd:9\n->\t80:512:BLK"
        );
    }
}
