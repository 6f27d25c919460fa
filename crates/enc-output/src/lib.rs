//! Output generation for quality runs.
//!
//! Writes the analytics table, the cleaned and flagged partitions as CSV, and
//! a plain-text pipeline report.

mod error;
mod format;
mod report;
mod writer;

pub use error::{OutputError, Result};
pub use format::{format_amount, format_count};
pub use report::{CostSummary, PipelineReport};
pub use writer::{
    ANALYTICS_FILE, CLEANED_FILE, FLAGGED_FILE, OutputConfig, OutputPaths, REPORT_FILE,
    write_outputs,
};
