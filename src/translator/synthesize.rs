//! Synthesize the block-device accesses implied by a file access.
//!
//! Direct I/O reaches the device byte for byte (sector aligned);
//! buffered I/O goes through the page cache and reaches the device in
//! whole file system blocks.

use crate::extent::ExtentTable;
use crate::parser::{IoEvent, IoLevel};
use crate::utils::config::SECTOR_SIZE;
use crate::utils::error::TranslateError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the file was accessed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IoMode {
    Direct,
    Buffered,
}

impl IoMode {
    pub fn from_direct_flag(direct: bool) -> Self {
        if direct {
            Self::Direct
        } else {
            Self::Buffered
        }
    }
}

impl FromStr for IoMode {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" | "directio" | "o_direct" => Ok(Self::Direct),
            "buffered" => Ok(Self::Buffered),
            other => Err(TranslateError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for IoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoMode::Direct => f.write_str("direct"),
            IoMode::Buffered => f.write_str("buffered"),
        }
    }
}

/// One block-device access implied by a higher-level access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticBlockAccess {
    /// Start address on the device, in 512-byte sectors
    pub physical_address: u64,

    /// Access size in bytes
    pub size: u64,
}

impl SyntheticBlockAccess {
    /// Size in file system blocks, rounded up
    pub fn size_in_blocks(&self, block_size: u64) -> u64 {
        self.size.div_ceil(block_size.max(1))
    }

    pub fn size_in_sectors(&self) -> u64 {
        self.size.div_ceil(SECTOR_SIZE)
    }
}

impl fmt::Display for SyntheticBlockAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.physical_address, self.size, IoLevel::Block)
    }
}

/// Translate the file access `[address, address + size)` (bytes) into device accesses
///
/// **Public** - main entry point for translation
///
/// The accesses are returned in order and together cover the whole request.
///
/// # Errors
/// * `TranslateError::HoleInExtentMap` - part of the range has no extent;
///   nothing is returned for the access
/// * `TranslateError::AddressOverflow` - a device address or access size
///   does not fit in a `u64`; nothing is returned for the access
pub fn translate_access(
    table: &ExtentTable,
    address: u64,
    size: u64,
    mode: IoMode,
) -> Result<Vec<SyntheticBlockAccess>, TranslateError> {
    let block_size = table.block_size();
    let sectors_per_block = block_size / SECTOR_SIZE;

    let mut accesses = Vec::new();
    let mut address = address;
    let mut remaining = size;

    while remaining > 0 {
        let block_index = address / block_size;
        let offset_in_block = address % block_size;

        let extent = table
            .extent_containing_logical(block_index)
            .ok_or(TranslateError::HoleInExtentMap { block_index })?;
        let overflow = move || TranslateError::AddressOverflow { address };
        let offset_in_extent = block_index - extent.logical_offset;
        let first_sector = extent
            .physical_block(block_index)
            .and_then(|block| block.checked_mul(sectors_per_block))
            .ok_or_else(overflow)?;

        let access = match mode {
            IoMode::Direct => SyntheticBlockAccess {
                physical_address: (offset_in_block / SECTOR_SIZE)
                    .checked_add(first_sector)
                    .ok_or_else(overflow)?,
                size: remaining,
            },
            IoMode::Buffered => {
                let mut blocks = remaining
                    .checked_add(offset_in_block)
                    .ok_or_else(overflow)?
                    .div_ceil(block_size);
                // Capped at the whole extent length, not at what is left
                // after `offset_in_extent`.
                if blocks > extent.length - offset_in_extent {
                    blocks = extent.length;
                }
                SyntheticBlockAccess {
                    physical_address: first_sector,
                    size: blocks.checked_mul(block_size).ok_or_else(overflow)?,
                }
            }
        };

        remaining = remaining.saturating_sub(access.size);
        if remaining > 0 {
            address = address.checked_add(access.size).ok_or_else(overflow)?;
        }
        accesses.push(access);
    }

    debug!(
        "Translated {} bytes ({}) into {} block accesses",
        size,
        mode,
        accesses.len()
    );

    Ok(accesses)
}

/// Translate a VFS or FS event
///
/// Block-level events are already physical and translate to nothing.
pub fn translate_event(
    table: &ExtentTable,
    event: &IoEvent,
    mode: IoMode,
) -> Result<Vec<SyntheticBlockAccess>, TranslateError> {
    if !event.level.is_file_relative() {
        return Ok(Vec::new());
    }
    let address = event
        .byte_address()
        .ok_or(TranslateError::AddressOverflow {
            address: event.address,
        })?;
    translate_access(table, address, event.size, mode)
}
