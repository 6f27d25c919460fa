//! Negative cost check.
//!
//! A reporting month's summed cost should never drop below zero. Exactly
//! zero is a valid total and is not flagged.

use enc_model::{EncounterTable, Flag, FlagReason};

/// Flag every row whose `total_cost` is strictly negative.
pub fn check(table: &EncounterTable) -> Vec<Flag> {
    table
        .iter()
        .filter(|record| record.total_cost < 0.0)
        .map(|record| Flag::new(record.clone(), FlagReason::NegativeCost))
        .collect()
}
