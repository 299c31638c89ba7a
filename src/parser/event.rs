//! Trace event model and the three observation levels.
//!
//! One `IoEvent` is one access seen by the tracer at the block device,
//! file system or VFS layer. Addresses are expressed in the unit of the
//! layer that observed them; sizes are always in bytes.

use crate::utils::config::{
    BLOCK_UNIT_SIZE, FIELD_SEPARATOR, FS_UNIT_SIZE, TRACE_FIELD_COUNT, VFS_UNIT_SIZE,
};
use crate::utils::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Observation layer of a trace event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IoLevel {
    #[serde(rename = "BLK")]
    Block,
    #[serde(rename = "FS")]
    FileSystem,
    #[serde(rename = "VFS")]
    Vfs,
}

impl IoLevel {
    /// All levels, in reporting order
    pub const ALL: [IoLevel; 3] = [IoLevel::Block, IoLevel::FileSystem, IoLevel::Vfs];

    /// Addressing unit of the level in bytes
    pub const fn unit_size(self) -> u64 {
        match self {
            IoLevel::Block => BLOCK_UNIT_SIZE,
            IoLevel::FileSystem => FS_UNIT_SIZE,
            IoLevel::Vfs => VFS_UNIT_SIZE,
        }
    }

    /// Name used in trace logs and reports
    pub const fn name(self) -> &'static str {
        match self {
            IoLevel::Block => "BLK",
            IoLevel::FileSystem => "FS",
            IoLevel::Vfs => "VFS",
        }
    }

    /// Whether addresses at this level are relative to a file rather than a device
    pub const fn is_file_relative(self) -> bool {
        !matches!(self, IoLevel::Block)
    }
}

impl fmt::Display for IoLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IoLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BLK" => Ok(Self::Block),
            "FS" => Ok(Self::FileSystem),
            "VFS" => Ok(Self::Vfs),
            other => Err(ParseError::InvalidLevel(other.to_string())),
        }
    }
}

/// Direction of an access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IoDirection {
    #[serde(rename = "R")]
    Read,
    #[serde(rename = "W")]
    Write,
}

impl IoDirection {
    pub const fn symbol(self) -> char {
        match self {
            IoDirection::Read => 'R',
            IoDirection::Write => 'W',
        }
    }
}

impl fmt::Display for IoDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for IoDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "R" => Ok(Self::Read),
            "W" => Ok(Self::Write),
            other => Err(ParseError::InvalidDirection(other.to_string())),
        }
    }
}

/// A single access recorded by the tracer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IoEvent {
    /// Seconds since the trace time origin
    pub timestamp: f64,

    pub direction: IoDirection,

    /// Start address, in units of `level.unit_size()`
    pub address: u64,

    /// Access size in bytes
    pub size: u64,

    pub level: IoLevel,

    /// Name of the task that issued the access
    pub task_name: String,

    pub task_pid: u32,
}

impl IoEvent {
    /// Start address converted to bytes, `None` if it does not fit in a `u64`
    pub fn byte_address(&self) -> Option<u64> {
        self.address.checked_mul(self.level.unit_size())
    }

    /// Size converted to whole units of the event's level (truncating)
    pub fn size_in_units(&self) -> u64 {
        self.size / self.level.unit_size()
    }

    /// Render the event with `:` separators, the layout used when
    /// echoing events next to their block translation
    pub fn to_listing(&self) -> String {
        format!(
            "{:.9}:{}:{}:{}:{}:{}:{}",
            self.timestamp,
            self.direction,
            self.address,
            self.size,
            self.level,
            self.task_name,
            self.task_pid
        )
    }
}

/// Parse one line of the trace interchange format:
/// `time;type;address;size;level;task_name;task_pid`
impl FromStr for IoEvent {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() != TRACE_FIELD_COUNT {
            return Err(ParseError::malformed(
                line,
                format!(
                    "expected {} fields, found {}",
                    TRACE_FIELD_COUNT,
                    fields.len()
                ),
            ));
        }

        let timestamp = fields[0]
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|t| t.is_finite())
            .ok_or_else(|| ParseError::malformed(line, "invalid timestamp"))?;
        let direction = fields[1].trim().parse::<IoDirection>()?;
        let address = fields[2]
            .trim()
            .parse::<u64>()
            .map_err(|e| ParseError::malformed(line, format!("invalid address: {}", e)))?;
        let size = fields[3]
            .trim()
            .parse::<u64>()
            .map_err(|e| ParseError::malformed(line, format!("invalid size: {}", e)))?;
        if size == 0 {
            return Err(ParseError::malformed(line, "size must be positive"));
        }
        let level = fields[4].trim().parse::<IoLevel>()?;
        let task_pid = fields[6]
            .trim()
            .parse::<u32>()
            .map_err(|e| ParseError::malformed(line, format!("invalid pid: {}", e)))?;

        Ok(IoEvent {
            timestamp,
            direction,
            address,
            size,
            level,
            task_name: fields[5].to_string(),
            task_pid,
        })
    }
}

impl fmt::Display for IoEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.9};{};{};{};{};{};{}",
            self.timestamp,
            self.direction,
            self.address,
            self.size,
            self.level,
            self.task_name,
            self.task_pid
        )
    }
}
