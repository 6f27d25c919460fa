//! Encounter-count outlier check.
//!
//! Flags rows whose `total_encounters` exceed the given percentile of the
//! whole table. High volumes can be duplicate registrations or entry errors,
//! or legitimately chronic-care patients; either way they need review.

use enc_model::{EncounterTable, Flag, FlagReason, Result};

use crate::options::validate_percentile;
use crate::quantile::quantile;

/// Threshold for `percentile` over every row's `total_encounters`.
///
/// `None` for an empty table.
pub fn encounter_threshold(table: &EncounterTable, percentile: f64) -> Option<f64> {
    let counts: Vec<f64> = table
        .iter()
        .map(|record| record.total_encounters as f64)
        .collect();
    quantile(&counts, percentile)
}

/// Flag every row strictly above the percentile threshold.
pub fn check(table: &EncounterTable, percentile: f64) -> Result<Vec<Flag>> {
    validate_percentile(percentile)?;
    let Some(threshold) = encounter_threshold(table, percentile) else {
        return Ok(Vec::new());
    };
    let reason = FlagReason::HighEncounterCount {
        threshold,
        percentile,
    };
    Ok(table
        .iter()
        .filter(|record| record.total_encounters as f64 > threshold)
        .map(|record| Flag::new(record.clone(), reason))
        .collect())
}
