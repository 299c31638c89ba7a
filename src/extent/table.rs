//! Logical-to-physical block mapping of a single file.
//!
//! Offsets and lengths are in file system blocks. Extents are expected
//! not to overlap in logical space; gaps between them are holes.

use crate::utils::config::SECTOR_SIZE;
use crate::utils::error::TranslateError;
use serde::{Deserialize, Serialize};

/// Contiguous run of `length` blocks mapped from `logical_offset` to `physical_offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub logical_offset: u64,
    pub physical_offset: u64,
    pub length: u64,
}

impl Extent {
    pub fn new(logical_offset: u64, physical_offset: u64, length: u64) -> Self {
        Self {
            logical_offset,
            physical_offset,
            length,
        }
    }

    pub fn contains_logical(&self, block_index: u64) -> bool {
        self.logical_offset <= block_index
            && block_index - self.logical_offset < self.length
    }

    pub fn contains_physical(&self, block_index: u64) -> bool {
        self.physical_offset <= block_index
            && block_index - self.physical_offset < self.length
    }

    /// Physical block backing `block_index`, if the extent maps it
    pub fn physical_block(&self, block_index: u64) -> Option<u64> {
        if !self.contains_logical(block_index) {
            return None;
        }
        self.physical_offset
            .checked_add(block_index - self.logical_offset)
    }
}

/// Extent map of a file, read-only once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ExtentTableFile")]
pub struct ExtentTable {
    source: String,
    block_size: u64,
    file_size: u64,
    block_count: u64,
    extents: Vec<Extent>,
}

/// On-disk layout of an extent table, validated into `ExtentTable`
#[derive(Debug, Deserialize)]
struct ExtentTableFile {
    source: String,
    block_size: u64,
    file_size: u64,
    #[serde(default)]
    block_count: Option<u64>,
    extents: Vec<Extent>,
}

impl TryFrom<ExtentTableFile> for ExtentTable {
    type Error = TranslateError;

    fn try_from(file: ExtentTableFile) -> Result<Self, Self::Error> {
        let mut table = ExtentTable::new(file.source, file.block_size, file.file_size, file.extents)?;
        if let Some(block_count) = file.block_count {
            table.block_count = block_count;
        }
        Ok(table)
    }
}

impl ExtentTable {
    /// Build a table from already-discovered extents
    ///
    /// `block_count` is derived from the file size; the extent order is kept.
    ///
    /// # Errors
    /// * `TranslateError::InvalidBlockSize` - block size is zero or not a
    ///   whole number of 512-byte sectors
    pub fn new(
        source: impl Into<String>,
        block_size: u64,
        file_size: u64,
        extents: Vec<Extent>,
    ) -> Result<Self, TranslateError> {
        if block_size == 0 || block_size % SECTOR_SIZE != 0 {
            return Err(TranslateError::InvalidBlockSize(block_size));
        }

        Ok(Self {
            source: source.into(),
            block_size,
            file_size,
            block_count: file_size.div_ceil(block_size),
            extents,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn block_count(&self) -> u64 {
        self.block_count
    }

    pub fn extents(&self) -> &[Extent] {
        &self.extents
    }

    /// Extent mapping logical block `block_index`, `None` for a hole
    pub fn extent_containing_logical(&self, block_index: u64) -> Option<&Extent> {
        self.extents.iter().find(|e| e.contains_logical(block_index))
    }

    /// Extent backed by physical block `block_index`
    pub fn extent_containing_physical(&self, block_index: u64) -> Option<&Extent> {
        self.extents.iter().find(|e| e.contains_physical(block_index))
    }

    /// Number of logical blocks that have no extent, up to `block_count`
    pub fn hole_blocks(&self) -> u64 {
        let mapped: u64 = self
            .extents
            .iter()
            .map(|e| {
                e.logical_offset
                    .saturating_add(e.length)
                    .min(self.block_count)
                    .saturating_sub(e.logical_offset)
            })
            .sum();
        self.block_count.saturating_sub(mapped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragmented() -> ExtentTable {
        // blocks 0..4 -> 100..104, hole at 4..6, blocks 6..8 -> 50..52
        ExtentTable::new(
            "/data/file",
            4096,
            8 * 4096,
            vec![Extent::new(0, 100, 4), Extent::new(6, 50, 2)],
        )
        .unwrap()
    }

    #[test]
    fn test_logical_lookup() {
        let table = fragmented();
        assert_eq!(table.extent_containing_logical(0), Some(&Extent::new(0, 100, 4)));
        assert_eq!(table.extent_containing_logical(3), Some(&Extent::new(0, 100, 4)));
        assert_eq!(table.extent_containing_logical(7), Some(&Extent::new(6, 50, 2)));
    }

    #[test]
    fn test_logical_lookup_hole_and_past_end() {
        let table = fragmented();
        assert!(table.extent_containing_logical(4).is_none());
        assert!(table.extent_containing_logical(5).is_none());
        assert!(table.extent_containing_logical(8).is_none());
    }

    #[test]
    fn test_physical_lookup() {
        let table = fragmented();
        assert_eq!(table.extent_containing_physical(51), Some(&Extent::new(6, 50, 2)));
        assert_eq!(table.extent_containing_physical(103), Some(&Extent::new(0, 100, 4)));
        assert!(table.extent_containing_physical(104).is_none());
        assert!(table.extent_containing_physical(0).is_none());
    }

    #[test]
    fn test_physical_block_round_trip() {
        let table = fragmented();
        for index in [0, 1, 2, 3, 6, 7] {
            let extent = table.extent_containing_logical(index).unwrap();
            let physical = extent.physical_block(index).unwrap();
            assert_eq!(physical, extent.physical_offset + (index - extent.logical_offset));
            assert_eq!(table.extent_containing_physical(physical), Some(extent));
        }
    }

    #[test]
    fn test_block_count_and_holes() {
        let table = fragmented();
        assert_eq!(table.block_count(), 8);
        assert_eq!(table.hole_blocks(), 2);
    }

    #[test]
    fn test_invalid_block_size() {
        assert_eq!(
            ExtentTable::new("f", 0, 0, vec![]).unwrap_err(),
            TranslateError::InvalidBlockSize(0)
        );
        assert!(ExtentTable::new("f", 1000, 0, vec![]).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"source":"f","block_size":4096,"file_size":5000,
                       "extents":[{"logical_offset":0,"physical_offset":9,"length":2}]}"#;
        let table: ExtentTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.block_count(), 2);

        let bad = r#"{"source":"f","block_size":0,"file_size":0,"extents":[]}"#;
        assert!(serde_json::from_str::<ExtentTable>(bad).is_err());
    }
}
