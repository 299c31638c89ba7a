//! Single-pass analysis of a mixed-level trace.
//!
//! Events are routed to one classifier per level; each level yields
//! its own statistics record, or nothing if it saw no event.

use super::classifier::AccessClassifier;
use crate::parser::schema::StatisticsRecord;
use crate::parser::{IoEvent, IoLevel};
use crate::utils::error::ParseError;
use log::debug;
use std::collections::BTreeMap;

/// Routes events to a per-level classifier
#[derive(Debug, Clone)]
pub struct TraceProfiler {
    classifiers: BTreeMap<IoLevel, AccessClassifier>,
}

impl TraceProfiler {
    /// Profile every level
    pub fn new() -> Self {
        Self::for_levels(&IoLevel::ALL)
    }

    /// Profile only the given levels; events of other levels are skipped
    pub fn for_levels(levels: &[IoLevel]) -> Self {
        Self {
            classifiers: levels
                .iter()
                .map(|&level| (level, AccessClassifier::new(level)))
                .collect(),
        }
    }

    pub fn observe(&mut self, event: &IoEvent) {
        if let Some(classifier) = self.classifiers.get_mut(&event.level) {
            classifier.observe(event);
        }
    }

    /// Statistics per level, for levels that saw at least one event
    pub fn finish(self) -> BTreeMap<IoLevel, StatisticsRecord> {
        self.classifiers
            .into_iter()
            .filter_map(|(level, classifier)| classifier.finish().map(|record| (level, record)))
            .collect()
    }
}

impl Default for TraceProfiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Profile an in-memory event sequence
pub fn analyze_events<'a, I>(events: I) -> BTreeMap<IoLevel, StatisticsRecord>
where
    I: IntoIterator<Item = &'a IoEvent>,
{
    let mut profiler = TraceProfiler::new();
    for event in events {
        profiler.observe(event);
    }
    profiler.finish()
}

/// Profile a fallible event stream such as a `TraceLog`
///
/// Stops at the first parse error; no partial statistics are returned.
pub fn analyze_trace<I>(
    events: I,
    levels: &[IoLevel],
) -> Result<BTreeMap<IoLevel, StatisticsRecord>, ParseError>
where
    I: IntoIterator<Item = Result<IoEvent, ParseError>>,
{
    let mut profiler = TraceProfiler::for_levels(levels);
    let mut count = 0u64;
    for event in events {
        profiler.observe(&event?);
        count += 1;
    }
    debug!("Analyzed {} trace events", count);
    Ok(profiler.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TraceLog;
    use std::io::Cursor;

    const MIXED: &str = "\
0.0;W;0;4096;VFS;dd;1
0.0;W;0;8;BLK;dd;1
1.0;W;4096;4096;VFS;dd;1
";

    #[test]
    fn test_levels_are_independent() {
        let levels = analyze_trace(TraceLog::from_reader(Cursor::new(MIXED)), &IoLevel::ALL).unwrap();

        assert_eq!(levels.len(), 2);
        assert!(!levels.contains_key(&IoLevel::FileSystem));
        assert_eq!(levels[&IoLevel::Vfs].event_count, 2);
        assert_eq!(levels[&IoLevel::Vfs].write_sequential_rate, 1.0);
        assert_eq!(levels[&IoLevel::Block].event_count, 1);
    }

    #[test]
    fn test_restricted_levels() {
        let levels =
            analyze_trace(TraceLog::from_reader(Cursor::new(MIXED)), &[IoLevel::Block]).unwrap();
        assert_eq!(levels.len(), 1);
        assert!(levels.contains_key(&IoLevel::Block));
    }

    #[test]
    fn test_parse_error_aborts() {
        let log = format!("{}not;an;event\n", MIXED);
        assert!(analyze_trace(TraceLog::from_reader(Cursor::new(log)), &IoLevel::ALL).is_err());
    }
}
