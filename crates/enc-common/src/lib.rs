//! Shared utilities for encounter analytics crates.
//!
//! - [`polars`]: `AnyValue` readers and numeric formatting.
//! - [`frame`]: lifting `DataFrame`s into typed tables and projecting them back.

pub mod frame;
pub mod polars;

pub use frame::{ensure_input_columns, flagged_to_frame, table_from_frame, table_to_frame};
pub use polars::{
    any_to_count, any_to_f64, any_to_string, any_to_string_non_empty, format_numeric, parse_f64,
    parse_i64,
};
