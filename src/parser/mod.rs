//! Trace parsing and schema definitions.
//!
//! This module handles:
//! - The event and level model
//! - Reading tracer logs line by line
//! - Defining output schema

pub mod event;
pub mod schema;
pub mod trace_log;

// Re-export main types
pub use event::{IoDirection, IoEvent, IoLevel};
pub use schema::{StatisticsRecord, TraceProfile};
pub use trace_log::{read_events, TraceLog};
