//! Quality check modules.
//!
//! Each check reads the table and returns one candidate flag per matching
//! row. Checks never see each other's output; merging happens in
//! [`crate::reconcile`].

pub mod negative_cost;
pub mod outlier;

use tracing::debug;

use enc_model::{CheckKind, EncounterTable, Flag, Result};

use crate::options::QualityOptions;

/// Candidate flags produced by one check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutput {
    pub check: CheckKind,
    pub flags: Vec<Flag>,
}

impl CheckOutput {
    pub fn new(check: CheckKind, flags: Vec<Flag>) -> Self {
        Self { check, flags }
    }
}

/// Run every check against the table.
///
/// All checks run before any result is returned; the first failure aborts
/// the run with no partial output.
pub fn run_all(table: &EncounterTable, options: &QualityOptions) -> Result<Vec<CheckOutput>> {
    // 1. Negative cost
    let negative = CheckOutput::new(CheckKind::NegativeCost, negative_cost::check(table));

    // 2. Encounter-count outliers
    let outliers = CheckOutput::new(
        CheckKind::HighEncounterCount,
        outlier::check(table, options.percentile)?,
    );

    let outputs = vec![negative, outliers];
    for output in &outputs {
        debug!(
            check = %output.check,
            flagged = output.flags.len(),
            rows = table.len(),
            "check complete"
        );
    }
    Ok(outputs)
}
