//! Grain checks for the analytics table.
//!
//! The table should hold one row per (patient, facility, month), with a
//! `YYYY-MM` month and positive counts. Violations are collected and reported
//! but never stop a run; the quality checks still see every row.

use std::collections::HashMap;
use std::fmt;

use enc_model::{DISTINCT_DIAGNOSIS_COUNT, EncounterTable, RecordKey, TOTAL_ENCOUNTERS};

/// One grain violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrainIssue {
    /// Key already seen at `first_row`.
    DuplicateKey {
        row: usize,
        first_row: usize,
        key: RecordKey,
    },
    /// `year_month` is not `YYYY-MM` with a month in 01..=12.
    MalformedMonth { row: usize, value: String },
    /// A count column holds zero or a negative value.
    NonPositiveCount {
        row: usize,
        column: &'static str,
        value: i64,
    },
}

impl GrainIssue {
    pub fn row(&self) -> usize {
        match self {
            GrainIssue::DuplicateKey { row, .. }
            | GrainIssue::MalformedMonth { row, .. }
            | GrainIssue::NonPositiveCount { row, .. } => *row,
        }
    }

    /// Short identifier of the issue kind.
    pub fn kind(&self) -> &'static str {
        match self {
            GrainIssue::DuplicateKey { .. } => "duplicate_key",
            GrainIssue::MalformedMonth { .. } => "malformed_month",
            GrainIssue::NonPositiveCount { .. } => "non_positive_count",
        }
    }
}

// Display carries no identifiers.
impl fmt::Display for GrainIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrainIssue::DuplicateKey { row, first_row, .. } => {
                write!(f, "row {row}: duplicate key (first seen at row {first_row})")
            }
            GrainIssue::MalformedMonth { row, value } => {
                write!(f, "row {row}: year_month '{value}' is not YYYY-MM")
            }
            GrainIssue::NonPositiveCount { row, column, value } => {
                write!(f, "row {row}: {column} is {value}, expected > 0")
            }
        }
    }
}

/// All grain violations found in a table, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrainReport {
    pub issues: Vec<GrainIssue>,
}

impl GrainReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn count_kind(&self, kind: &str) -> usize {
        self.issues.iter().filter(|issue| issue.kind() == kind).count()
    }
}

/// Scan the table for grain violations.
pub fn check_grain(table: &EncounterTable) -> GrainReport {
    let mut issues = Vec::new();
    let mut seen: HashMap<RecordKey, usize> = HashMap::with_capacity(table.len());

    for (row, record) in table.iter().enumerate() {
        let key = record.key();
        if let Some(&first_row) = seen.get(&key) {
            issues.push(GrainIssue::DuplicateKey {
                row,
                first_row,
                key,
            });
        } else {
            seen.insert(key, row);
        }

        if !is_year_month(&record.year_month) {
            issues.push(GrainIssue::MalformedMonth {
                row,
                value: record.year_month.clone(),
            });
        }

        for (column, value) in [
            (TOTAL_ENCOUNTERS, record.total_encounters),
            (DISTINCT_DIAGNOSIS_COUNT, record.distinct_diagnosis_count),
        ] {
            if value <= 0 {
                issues.push(GrainIssue::NonPositiveCount { row, column, value });
            }
        }
    }
    GrainReport { issues }
}

/// `YYYY-MM` with a month between 01 and 12.
pub fn is_year_month(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 7 || bytes[4] != b'-' {
        return false;
    }
    if !bytes[..4].iter().chain(&bytes[5..]).all(u8::is_ascii_digit) {
        return false;
    }
    value[5..]
        .parse::<u8>()
        .is_ok_and(|month| (1..=12).contains(&month))
}
