//! File extent maps.
//!
//! Extent discovery (e.g. from a fragmentation report) happens outside
//! this crate; tables are built from already-parsed extents or loaded
//! from JSON.

pub mod table;

pub use table::{Extent, ExtentTable};
