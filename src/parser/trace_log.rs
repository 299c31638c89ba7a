//! Streaming reader for tracer logs.
//!
//! A log is one event per line in the `time;type;address;size;level;task_name;task_pid`
//! layout. Events are yielded lazily, in file order, optionally restricted
//! to a single level. The stream is forward-only: re-analysis opens a new reader.

use super::event::{IoEvent, IoLevel};
use crate::utils::error::ParseError;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Iterator over the events of a tracer log
pub struct TraceLog<R> {
    lines: Lines<R>,
    level: Option<IoLevel>,
    line_number: usize,
}

impl TraceLog<BufReader<File>> {
    /// Open a tracer log file
    ///
    /// # Errors
    /// * `ParseError::IoError` - File cannot be opened
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        debug!("Opening trace log: {}", path.display());
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> TraceLog<R> {
    /// Read events from any buffered source
    pub fn from_reader(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            level: None,
            line_number: 0,
        }
    }

    /// Only yield events observed at `level`
    pub fn with_level(mut self, level: IoLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for TraceLog<R> {
    type Item = Result<IoEvent, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(ParseError::IoError(e))),
            };
            self.line_number += 1;

            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let event = match line.parse::<IoEvent>() {
                Ok(event) => event,
                Err(e) => {
                    return Some(Err(ParseError::InvalidLine {
                        line_number: self.line_number,
                        source: Box::new(e),
                    }))
                }
            };

            match self.level {
                Some(level) if event.level != level => continue,
                _ => return Some(Ok(event)),
            }
        }
    }
}

/// Read every event of a log into memory
///
/// Fails on the first malformed line.
pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<IoEvent>, ParseError> {
    TraceLog::open(path)?.collect()
}
