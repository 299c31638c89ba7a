//! Sequential/random access detection for one observation level.
//!
//! An access is sequential when it starts exactly where the previous
//! access at the same level ended. The first event of a stream only
//! seeds the current region; every later event is scored.
//!
//! Example at FS level (unit = 4096 bytes):
//! `0 (4096B)` seeds, `1 (4096B)` is sequential, `7 (4096B)` is random.

use super::metrics::calculate_statistics;
use crate::parser::schema::StatisticsRecord;
use crate::parser::{IoDirection, IoEvent, IoLevel};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Outcome of classifying one scored event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPattern {
    Sequential,
    Random,
}

/// Contiguous region currently being extended, in level units.
///
/// Only the live anchor is ever consulted, so a single anchor/length pair
/// is enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RegionTracker {
    anchor: u64,
    length: u64,
}

impl RegionTracker {
    fn seed(address: u64, units: u64) -> Self {
        Self {
            anchor: address,
            length: units,
        }
    }

    /// A random access starts a new region at `address`
    fn restart(&mut self, address: u64, units: u64) {
        if self.anchor == address {
            self.length = self.length.max(units);
        } else {
            self.anchor = address;
            self.length = units;
        }
    }

    /// A sequential access grows the live region
    fn extend(&mut self, units: u64) {
        self.length = self.length.saturating_add(units);
    }
}

/// Running totals accumulated while classifying a stream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifierTotals {
    pub event_count: u64,

    pub read_sequential: u64,
    pub read_random: u64,
    pub write_sequential: u64,
    pub write_random: u64,

    pub read_bytes: u64,
    pub write_bytes: u64,

    pub first_timestamp: Option<f64>,
    pub last_timestamp: Option<f64>,

    /// Direction of the event that seeded the stream
    pub seed_direction: Option<IoDirection>,

    /// Observed I/O size in bytes -> number of events
    pub size_counts: BTreeMap<u64, u64>,
}

impl ClassifierTotals {
    /// Number of events that were scored as sequential or random
    pub fn scored_count(&self) -> u64 {
        self.read_sequential + self.read_random + self.write_sequential + self.write_random
    }

    fn record(&mut self, event: &IoEvent, pattern: Option<AccessPattern>) {
        self.event_count += 1;
        if self.first_timestamp.is_none() {
            self.first_timestamp = Some(event.timestamp);
        }
        self.last_timestamp = Some(event.timestamp);
        *self.size_counts.entry(event.size).or_insert(0) += 1;

        match event.direction {
            IoDirection::Read => self.read_bytes = self.read_bytes.saturating_add(event.size),
            IoDirection::Write => self.write_bytes = self.write_bytes.saturating_add(event.size),
        }

        let counter = match (event.direction, pattern) {
            (_, None) => return,
            (IoDirection::Read, Some(AccessPattern::Sequential)) => &mut self.read_sequential,
            (IoDirection::Read, Some(AccessPattern::Random)) => &mut self.read_random,
            (IoDirection::Write, Some(AccessPattern::Sequential)) => &mut self.write_sequential,
            (IoDirection::Write, Some(AccessPattern::Random)) => &mut self.write_random,
        };
        *counter += 1;
    }
}

/// Previous access at the level
#[derive(Debug, Clone, Copy)]
struct LastAccess {
    address: u64,
    size: u64,
}

/// Classifies the event stream of a single level
///
/// Each instance owns its own state; use a fresh classifier per stream.
#[derive(Debug, Clone)]
pub struct AccessClassifier {
    level: IoLevel,
    last: Option<LastAccess>,
    region: Option<RegionTracker>,
    totals: ClassifierTotals,
}

impl AccessClassifier {
    pub fn new(level: IoLevel) -> Self {
        Self {
            level,
            last: None,
            region: None,
            totals: ClassifierTotals::default(),
        }
    }

    pub fn level(&self) -> IoLevel {
        self.level
    }

    pub fn totals(&self) -> &ClassifierTotals {
        &self.totals
    }

    /// Classify the next event of the stream
    ///
    /// Returns `None` for the seeding event and for events of another
    /// level (which are ignored), otherwise the access pattern.
    pub fn observe(&mut self, event: &IoEvent) -> Option<AccessPattern> {
        if event.level != self.level {
            warn!(
                "Ignoring {} event in {} classifier",
                event.level, self.level
            );
            return None;
        }

        let unit = self.level.unit_size();
        let units = event.size / unit;

        let pattern = match self.last {
            None => {
                self.region = Some(RegionTracker::seed(event.address, units));
                self.totals.seed_direction = Some(event.direction);
                None
            }
            Some(last) => {
                let contiguous = Self::is_contiguous(last, event.address, unit);
                let region = self
                    .region
                    .get_or_insert_with(|| RegionTracker::seed(last.address, 0));
                if contiguous {
                    region.extend(units);
                    Some(AccessPattern::Sequential)
                } else {
                    region.restart(event.address, units);
                    Some(AccessPattern::Random)
                }
            }
        };

        self.last = Some(LastAccess {
            address: event.address,
            size: event.size,
        });
        self.totals.record(event, pattern);

        pattern
    }

    /// Classify every event of an iterator
    pub fn observe_all<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a IoEvent>,
    {
        for event in events {
            self.observe(event);
        }
    }

    /// Produce the statistics for the stream, or `None` if it was empty
    pub fn finish(self) -> Option<StatisticsRecord> {
        if self.totals.event_count == 0 {
            debug!("No {} events, no statistics produced", self.level);
            return None;
        }

        debug!(
            "{} stream: {} events, {} scored",
            self.level,
            self.totals.event_count,
            self.totals.scored_count()
        );
        Some(calculate_statistics(&self.totals))
    }

    /// The next access is contiguous when it starts at the byte right after
    /// the previous one. A previous size that is not a whole number of units
    /// can never be followed contiguously.
    fn is_contiguous(last: LastAccess, address: u64, unit: u64) -> bool {
        last.size % unit == 0 && last.address.checked_add(last.size / unit) == Some(address)
    }
}

/// Classify a complete single-level stream
///
/// Events of other levels are ignored.
pub fn classify_stream<'a, I>(level: IoLevel, events: I) -> Option<StatisticsRecord>
where
    I: IntoIterator<Item = &'a IoEvent>,
{
    let mut classifier = AccessClassifier::new(level);
    classifier.observe_all(events);
    classifier.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(level: IoLevel, direction: IoDirection, address: u64, size: u64) -> IoEvent {
        IoEvent {
            timestamp: 0.0,
            direction,
            address,
            size,
            level,
            task_name: "test".to_string(),
            task_pid: 1,
        }
    }

    #[test]
    fn test_byte_totals_saturate() {
        let half = u64::MAX / 2 + 1;
        let events = [
            event(IoLevel::Vfs, IoDirection::Read, 0, half),
            event(IoLevel::Vfs, IoDirection::Read, half, half),
        ];

        let record = classify_stream(IoLevel::Vfs, &events).unwrap();
        assert_eq!(record.read_bytes, u64::MAX);
        assert_eq!(record.total_bytes(), u64::MAX);
        assert_eq!(record.read_sequential_rate, 1.0);
    }

    #[test]
    fn test_first_event_seeds_region() {
        let mut classifier = AccessClassifier::new(IoLevel::Vfs);
        let pattern = classifier.observe(&event(IoLevel::Vfs, IoDirection::Read, 100, 10));

        assert_eq!(pattern, None);
        assert_eq!(classifier.totals().scored_count(), 0);
        assert_eq!(classifier.region, Some(RegionTracker::seed(100, 10)));
    }

    #[test]
    fn test_sequential_extends_region() {
        let mut classifier = AccessClassifier::new(IoLevel::Block);
        classifier.observe(&event(IoLevel::Block, IoDirection::Write, 0, 4096));
        let pattern = classifier.observe(&event(IoLevel::Block, IoDirection::Write, 8, 1024));

        assert_eq!(pattern, Some(AccessPattern::Sequential));
        assert_eq!(classifier.region, Some(RegionTracker::seed(0, 10)));
        assert_eq!(classifier.totals().write_sequential, 1);
    }

    #[test]
    fn test_random_moves_anchor() {
        let mut classifier = AccessClassifier::new(IoLevel::Block);
        classifier.observe(&event(IoLevel::Block, IoDirection::Read, 0, 512));
        let pattern = classifier.observe(&event(IoLevel::Block, IoDirection::Read, 64, 2048));

        assert_eq!(pattern, Some(AccessPattern::Random));
        assert_eq!(classifier.region, Some(RegionTracker::seed(64, 4)));
        assert_eq!(classifier.totals().read_random, 1);
    }

    #[test]
    fn test_random_to_same_anchor_keeps_longest() {
        let mut region = RegionTracker::seed(10, 8);
        region.restart(10, 2);
        assert_eq!(region, RegionTracker::seed(10, 8));
        region.restart(10, 16);
        assert_eq!(region, RegionTracker::seed(10, 16));
    }

    #[test]
    fn test_partial_unit_breaks_contiguity() {
        // 100 bytes at FS level does not end on a 4 KiB boundary
        let mut classifier = AccessClassifier::new(IoLevel::FileSystem);
        classifier.observe(&event(IoLevel::FileSystem, IoDirection::Read, 0, 100));
        let pattern = classifier.observe(&event(IoLevel::FileSystem, IoDirection::Read, 0, 4096));
        assert_eq!(pattern, Some(AccessPattern::Random));
    }

    #[test]
    fn test_other_level_ignored() {
        let mut classifier = AccessClassifier::new(IoLevel::Vfs);
        assert_eq!(
            classifier.observe(&event(IoLevel::Block, IoDirection::Read, 0, 512)),
            None
        );
        assert_eq!(classifier.totals().event_count, 0);
        assert!(classifier.finish().is_none());
    }

    #[test]
    fn test_empty_stream_produces_nothing() {
        let events: Vec<IoEvent> = Vec::new();
        assert!(classify_stream(IoLevel::Block, &events).is_none());
    }
}
