//! Derive statistics records from classifier totals.
//!
//! Rounding is half-to-even everywhere.

use super::classifier::ClassifierTotals;
use crate::parser::schema::StatisticsRecord;
use crate::parser::IoDirection;
use crate::utils::config::{BYTES_PER_KB, NOMINAL_IO_SIZE, RATE_DECIMALS};
use std::collections::BTreeMap;

/// Build the statistics record of a classified stream
///
/// **Public** - main entry point for metrics calculation
///
/// Never fails: every division has a zero fallback.
pub fn calculate_statistics(totals: &ClassifierTotals) -> StatisticsRecord {
    let elapsed_seconds = elapsed_seconds(totals);
    let total_bytes = totals.read_bytes.saturating_add(totals.write_bytes);
    let (data_transfer_rate, iops) = calculate_transfer_rates(elapsed_seconds, total_bytes);
    let [read_sequential_rate, read_random_rate, write_sequential_rate, write_random_rate] =
        calculate_pattern_rates(totals);

    StatisticsRecord {
        event_count: totals.event_count,
        elapsed_seconds,
        data_transfer_rate,
        iops,
        read_bytes: totals.read_bytes,
        write_bytes: totals.write_bytes,
        read_sequential_rate,
        read_random_rate,
        write_sequential_rate,
        write_random_rate,
        size_histogram: calculate_size_histogram(&totals.size_counts, totals.event_count),
    }
}

/// Time between the first and the last event, 0 with fewer than two events
fn elapsed_seconds(totals: &ClassifierTotals) -> f64 {
    if totals.event_count < 2 {
        return 0.0;
    }
    match (totals.first_timestamp, totals.last_timestamp) {
        (Some(first), Some(last)) => (last - first).max(0.0),
        _ => 0.0,
    }
}

/// Data transfer rate (KB/s) and normalized IOPS
///
/// IOPS is total bytes expressed in 4 KiB operations per second, not
/// the number of events.
pub fn calculate_transfer_rates(elapsed_seconds: f64, total_bytes: u64) -> (u64, u64) {
    if elapsed_seconds <= 0.0 {
        return (0, 0);
    }

    let bytes = total_bytes as f64;
    let dtr = (bytes / BYTES_PER_KB / elapsed_seconds).round_ties_even();
    let iops = (bytes / NOMINAL_IO_SIZE / elapsed_seconds).round_ties_even();

    (dtr as u64, iops as u64)
}

/// Read-seq, read-rand, write-seq and write-rand rates
///
/// Rates are taken over the scored events. A stream holding only its
/// seeding event reports that event as sequential, so the four rates
/// of any non-empty stream sum to 1.
fn calculate_pattern_rates(totals: &ClassifierTotals) -> [f64; 4] {
    let counts = if totals.scored_count() > 0 {
        [
            totals.read_sequential,
            totals.read_random,
            totals.write_sequential,
            totals.write_random,
        ]
    } else {
        match totals.seed_direction {
            Some(IoDirection::Read) => [1, 0, 0, 0],
            Some(IoDirection::Write) => [0, 0, 1, 0],
            None => [0, 0, 0, 0],
        }
    };

    let total: u64 = counts.iter().sum();
    counts.map(|count| rate(count, total))
}

/// `count / total` rounded to four decimals, 0 when `total` is 0
pub fn rate(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_half_even(count as f64 / total as f64, RATE_DECIMALS)
}

/// Round to `decimals` places, ties to even
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Relative frequency of every observed I/O size
///
/// All buckets are kept; hiding rare sizes is left to presentation.
fn calculate_size_histogram(size_counts: &BTreeMap<u64, u64>, event_count: u64) -> BTreeMap<u64, f64> {
    if event_count == 0 {
        return BTreeMap::new();
    }
    size_counts
        .iter()
        .map(|(&size, &count)| (size, count as f64 / event_count as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(2.5, 0), 2.0);
        assert_eq!(round_half_even(3.5, 0), 4.0);
        assert_eq!(round_half_even(0.33333, 4), 0.3333);
        assert_eq!(round_half_even(0.66666, 4), 0.6667);
    }

    #[test]
    fn test_rate_zero_total() {
        assert_eq!(rate(5, 0), 0.0);
        assert_eq!(rate(1, 3), 0.3333);
    }

    #[test]
    fn test_transfer_rates() {
        // 1 MiB over 2 seconds
        let (dtr, iops) = calculate_transfer_rates(2.0, 1024 * 1024);
        assert_eq!(dtr, 512);
        assert_eq!(iops, 128);
    }

    #[test]
    fn test_transfer_rates_ties_to_even() {
        // 5 KiB over 2 s = 2.5 KB/s -> 2
        assert_eq!(calculate_transfer_rates(2.0, 5 * 1024).0, 2);
        // 14 KiB over 4 s = 3.5 KB/s -> 4
        assert_eq!(calculate_transfer_rates(4.0, 14 * 1024).0, 4);
    }

    #[test]
    fn test_transfer_rates_zero_elapsed() {
        assert_eq!(calculate_transfer_rates(0.0, 4096), (0, 0));
    }

    #[test]
    fn test_rounded_rates_drift_at_most_two_units() {
        // 1/32 and 29/32 are exact ties at four decimals and all round down
        let totals = ClassifierTotals {
            event_count: 33,
            read_sequential: 1,
            read_random: 1,
            write_sequential: 1,
            write_random: 29,
            ..Default::default()
        };

        let record = calculate_statistics(&totals);
        assert_eq!(record.read_sequential_rate, 0.0312);
        assert_eq!(record.write_random_rate, 0.9062);
        assert!((record.rate_sum() - 0.9998).abs() < 1e-9);
        assert!((1.0 - record.rate_sum()) <= 2e-4 + 1e-9);
    }

    #[test]
    fn test_saturated_byte_totals() {
        let totals = ClassifierTotals {
            event_count: 2,
            read_bytes: u64::MAX,
            write_bytes: u64::MAX,
            first_timestamp: Some(0.0),
            last_timestamp: Some(1.0),
            ..Default::default()
        };

        let record = calculate_statistics(&totals);
        assert_eq!(record.total_bytes(), u64::MAX);
        assert!(record.data_transfer_rate > 0);
    }

    #[test]
    fn test_single_event_counts_as_sequential() {
        let mut totals = ClassifierTotals {
            event_count: 1,
            write_bytes: 4096,
            first_timestamp: Some(1.0),
            last_timestamp: Some(1.0),
            seed_direction: Some(IoDirection::Write),
            ..Default::default()
        };
        totals.size_counts.insert(4096, 1);

        let record = calculate_statistics(&totals);
        assert_eq!(record.write_sequential_rate, 1.0);
        assert_eq!(record.rate_sum(), 1.0);
        assert_eq!(record.elapsed_seconds, 0.0);
        assert_eq!(record.size_histogram.get(&4096), Some(&1.0));
    }

    #[test]
    fn test_empty_totals() {
        let record = calculate_statistics(&ClassifierTotals::default());
        assert_eq!(record.event_count, 0);
        assert_eq!(record.rate_sum(), 0.0);
        assert!(record.size_histogram.is_empty());
    }
}
