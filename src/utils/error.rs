//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading trace events
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed trace event '{line}': {reason}")]
    MalformedEvent { line: String, reason: String },

    #[error("Invalid trace level: {0}")]
    InvalidLevel(String),

    #[error("Invalid access type: {0}")]
    InvalidDirection(String),

    #[error("Line {line_number}: {source}")]
    InvalidLine {
        line_number: usize,
        source: Box<ParseError>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ParseError {
    pub(crate) fn malformed(line: &str, reason: impl Into<String>) -> Self {
        Self::MalformedEvent {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during logical-to-physical translation
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TranslateError {
    #[error("No extent for block_index {block_index}")]
    HoleInExtentMap { block_index: u64 },

    #[error("Access at logical address {address} overflows the device address space")]
    AddressOverflow { address: u64 },

    #[error("Invalid block size: {0}")]
    InvalidBlockSize(u64),

    #[error("Invalid I/O mode: {0}")]
    InvalidMode(String),
}

/// Errors that can occur while checking statistics against expectations
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Failed to read expectation file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Expectation TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid expectation: {0}")]
    InvalidExpectation(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
