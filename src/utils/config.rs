//! Configuration and constants for the analyzer.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Field separator of the textual trace interchange format
/// (`time;type;address;size;level;task_name;task_pid`)
pub const FIELD_SEPARATOR: char = ';';

/// Number of fields in one trace line
pub const TRACE_FIELD_COUNT: usize = 7;

// Addressing unit of each observation layer, in bytes
pub const BLOCK_UNIT_SIZE: u64 = 512;
pub const FS_UNIT_SIZE: u64 = 4096;
pub const VFS_UNIT_SIZE: u64 = 1;

/// Block devices are addressed in 512-byte sectors
pub const SECTOR_SIZE: u64 = 512;

/// Divisor turning bytes into KB for the data transfer rate
pub const BYTES_PER_KB: f64 = 1024.0;

/// Nominal operation size used to normalize IOPS.
/// IOPS here is throughput in 4 KiB units, not a count of real operations.
pub const NOMINAL_IO_SIZE: f64 = 4096.0;

/// Decimal places kept for sequential/random rates
pub const RATE_DECIMALS: i32 = 4;

/// Histogram buckets below this frequency are hidden in text summaries
pub const HISTOGRAM_DISPLAY_THRESHOLD: f64 = 0.01;
