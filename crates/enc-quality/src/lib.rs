//! Quality check engine for the encounter analytics table.
//!
//! Two checks run over the whole table: a negative-cost check and an
//! encounter-count outlier check at a configurable percentile. Their flags
//! are reconciled into a disjoint clean/flagged partition of the input.

pub mod checks;
pub mod options;
pub mod quantile;
pub mod reconcile;

pub use checks::{CheckOutput, run_all};
pub use options::{DEFAULT_PERCENTILE, QualityOptions, validate_percentile};
pub use quantile::{quantile, quantile_sorted};
pub use reconcile::reconcile;

use polars::prelude::DataFrame;
use tracing::info;

use enc_common::table_from_frame;
use enc_model::{EncounterTable, Flag, QualityOutcome, Result};

/// Rows with `total_cost < 0`. Zero is not flagged.
pub fn check_negative_cost(table: &EncounterTable) -> Vec<Flag> {
    checks::negative_cost::check(table)
}

/// Rows whose `total_encounters` exceed the `percentile` threshold.
///
/// Fails with `InvalidArgument` unless `0 < percentile < 1`, even for an
/// empty table.
pub fn check_outlier_encounters(table: &EncounterTable, percentile: f64) -> Result<Vec<Flag>> {
    checks::outlier::check(table, percentile)
}

/// Run every check with default options and reconcile the results.
pub fn run_quality_checks(table: &EncounterTable) -> Result<QualityOutcome> {
    run_quality_checks_with(table, &QualityOptions::default())
}

/// Run every check with `options` and reconcile the results.
pub fn run_quality_checks_with(
    table: &EncounterTable,
    options: &QualityOptions,
) -> Result<QualityOutcome> {
    options.validate()?;
    let outputs = run_all(table, options)?;
    let outcome = reconcile(table, &outputs);
    info!(
        rows = table.len(),
        cleaned = outcome.cleaned.len(),
        flagged = outcome.flagged.len(),
        percentile = options.percentile,
        "quality checks complete"
    );
    Ok(outcome)
}

/// Lift a frame into a typed table, then run every check on it.
///
/// Missing columns and unreadable cells fail before any check runs.
pub fn run_frame_checks(df: &DataFrame, options: &QualityOptions) -> Result<QualityOutcome> {
    let table = table_from_frame(df)?;
    run_quality_checks_with(&table, options)
}
