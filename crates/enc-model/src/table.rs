//! Ordered, typed tables of encounter records.

use std::collections::HashSet;

use crate::flag::{CheckKind, FlaggedRecord};
use crate::record::{EncounterRecord, RecordKey};

/// An immutable snapshot of the analytics table, in source row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncounterTable {
    records: Vec<EncounterRecord>,
}

impl EncounterTable {
    pub fn new(records: Vec<EncounterRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[EncounterRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EncounterRecord> {
        self.records.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = RecordKey> + '_ {
        self.records.iter().map(EncounterRecord::key)
    }

    pub fn distinct_key_count(&self) -> usize {
        self.keys().collect::<HashSet<_>>().len()
    }

    pub fn find(&self, key: &RecordKey) -> Option<&EncounterRecord> {
        self.records.iter().find(|record| record.has_key(key))
    }

    pub fn contains_key(&self, key: &RecordKey) -> bool {
        self.find(key).is_some()
    }
}

impl FromIterator<EncounterRecord> for EncounterTable {
    fn from_iter<I: IntoIterator<Item = EncounterRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a EncounterTable {
    type Item = &'a EncounterRecord;
    type IntoIter = std::slice::Iter<'a, EncounterRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Records that failed at least one check, one row per key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlaggedTable {
    records: Vec<FlaggedRecord>,
}

impl FlaggedTable {
    pub fn new(records: Vec<FlaggedRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FlaggedRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlaggedRecord> {
        self.records.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = RecordKey> + '_ {
        self.records.iter().map(FlaggedRecord::key)
    }

    pub fn find(&self, key: &RecordKey) -> Option<&FlaggedRecord> {
        self.records.iter().find(|flagged| flagged.record.has_key(key))
    }

    /// Number of flagged rows carrying at least one reason from `check`.
    pub fn count_by_check(&self, check: CheckKind) -> usize {
        self.records
            .iter()
            .filter(|flagged| flagged.has_check(check))
            .count()
    }
}

impl<'a> IntoIterator for &'a FlaggedTable {
    type Item = &'a FlaggedRecord;
    type IntoIter = std::slice::Iter<'a, FlaggedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// The clean/flagged partition produced by one quality run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QualityOutcome {
    pub cleaned: EncounterTable,
    pub flagged: FlaggedTable,
}

impl QualityOutcome {
    /// Check that this outcome partitions `input` by key: every input key
    /// lands in exactly one side and no side repeats a key.
    pub fn is_partition_of(&self, input: &EncounterTable) -> bool {
        let mut seen = HashSet::new();
        for key in self.cleaned.keys().chain(self.flagged.keys()) {
            if !seen.insert(key) {
                return false;
            }
        }
        let input_keys: HashSet<RecordKey> = input.keys().collect();
        seen == input_keys
    }
}
