//! Expectation checking.
//!
//! Compares the statistics of a trace against the workload that
//! generated it and reports every metric outside its tolerance.
//!
//! # Example
//! ```ignore
//! use iotrace_studio::check::{check_trace, load_expectation};
//!
//! let expectation = load_expectation("seq_read.toml")?;
//! let report = check_trace("trace.log", &levels, &expectation, false);
//! ```

mod expectation;
mod output;
mod schema;
mod tolerance;

// Public API exports
pub use expectation::{load_expectation, ExpectedStatistics, WorkloadExpectation};
pub use output::render_check_report;
pub use schema::{CheckReport, CheckSummary, Finding};
pub use tolerance::{check_statistics, check_trace, tolerances, Metric, Tolerance};
