//! VFS-to-block translation.
//!
//! Given a file's extent map, derives the device accesses a file access
//! should produce, for direct or buffered I/O.

pub mod synthesize;

pub use synthesize::{translate_access, translate_event, IoMode, SyntheticBlockAccess};
