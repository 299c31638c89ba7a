//! I/O Trace Studio
//!
//! Access-pattern profiling for storage I/O traces captured at the
//! block, file-system and VFS levels, plus translation of file accesses
//! into the block accesses they should produce.
//!
//! This crate provides the core implementation for the
//! `iotrace` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! iotrace profile --log trace.log --summary
//! iotrace translate --log trace.log --extents extents.json
//! iotrace check --log trace.log --expect workload.toml
//! ```

pub mod aggregator;
pub mod check;
pub mod commands;
pub mod extent;
pub mod output;
pub mod parser;
pub mod translator;
pub mod utils;
