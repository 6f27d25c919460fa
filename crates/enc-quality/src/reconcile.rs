//! Flag reconciliation.
//!
//! Merges the candidate flags of every check into one row per key and splits
//! the input into clean and flagged tables.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use enc_model::{EncounterTable, FlaggedRecord, FlaggedTable, QualityOutcome, RecordKey};

use crate::checks::CheckOutput;

/// Partition `input` by the union of all check outputs.
///
/// - Flagged rows appear once per key, in the order their key was first seen
///   across the outputs, carrying the measures of that first flag.
/// - Each flagged row's reasons are sorted and unique by rendered label.
/// - Cleaned rows keep input order and are copies of the input rows.
pub fn reconcile(input: &EncounterTable, outputs: &[CheckOutput]) -> QualityOutcome {
    let mut flagged: Vec<FlaggedRecord> = Vec::new();
    let mut positions: HashMap<RecordKey, usize> = HashMap::new();

    for flag in outputs.iter().flat_map(|output| output.flags.iter()) {
        match positions.entry(flag.key()) {
            Entry::Occupied(entry) => flagged[*entry.get()].add_reason(flag.reason),
            Entry::Vacant(entry) => {
                entry.insert(flagged.len());
                flagged.push(FlaggedRecord::new(flag.record.clone(), flag.reason));
            }
        }
    }

    let cleaned = input
        .iter()
        .filter(|record| !positions.contains_key(&record.key()))
        .cloned()
        .collect();

    QualityOutcome {
        cleaned,
        flagged: FlaggedTable::new(flagged),
    }
}
