//! Classification of trace events and aggregation into statistics.
//!
//! This module transforms parsed trace events into:
//! - Sequential/random classification per level
//! - Rates, throughput and IOPS
//! - I/O size histograms

pub mod classifier;
pub mod metrics;
pub mod profiler;

// Re-export main types and functions
pub use classifier::{classify_stream, AccessClassifier, AccessPattern, ClassifierTotals};
pub use metrics::{calculate_statistics, calculate_transfer_rates, round_half_even};
pub use profiler::{analyze_events, analyze_trace, TraceProfiler};
