//! Quality flags and their rendered reason strings.
//!
//! Reasons are kept structured until they reach an output boundary. The
//! rendered label is what downstream reports compare against, so its format
//! must not drift:
//!
//! - `negative_cost`
//! - `high_encounter_count (>{threshold}, p{percentile})` with both numbers
//!   rounded to integers (percentile shown as a percentage)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{EncounterRecord, RecordKey};

/// Separator between reasons in a consolidated `flag_reason`.
pub const REASON_SEPARATOR: &str = "; ";

/// The quality checks a reason can originate from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    NegativeCost,
    HighEncounterCount,
}

impl CheckKind {
    /// Stable identifier, also the prefix of every rendered reason.
    pub fn as_str(self) -> &'static str {
        match self {
            CheckKind::NegativeCost => "negative_cost",
            CheckKind::HighEncounterCount => "high_encounter_count",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a record was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum FlagReason {
    /// `total_cost` below zero.
    NegativeCost,
    /// `total_encounters` above the table-wide percentile threshold.
    HighEncounterCount {
        /// Interpolated threshold the record exceeded.
        threshold: f64,
        /// Percentile in `(0, 1)` the threshold was computed at.
        percentile: f64,
    },
}

impl FlagReason {
    pub fn check(&self) -> CheckKind {
        match self {
            FlagReason::NegativeCost => CheckKind::NegativeCost,
            FlagReason::HighEncounterCount { .. } => CheckKind::HighEncounterCount,
        }
    }

    /// Render the reason as it appears in `flag_reason`.
    pub fn label(&self) -> String {
        match self {
            FlagReason::NegativeCost => CheckKind::NegativeCost.as_str().to_string(),
            FlagReason::HighEncounterCount {
                threshold,
                percentile,
            } => format!(
                "{} (>{:.0}, p{:.0})",
                CheckKind::HighEncounterCount.as_str(),
                threshold,
                percentile * 100.0
            ),
        }
    }
}

impl fmt::Display for FlagReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A candidate flag emitted by one check for one input row.
#[derive(Debug, Clone, PartialEq)]
pub struct Flag {
    pub record: EncounterRecord,
    pub reason: FlagReason,
}

impl Flag {
    pub fn new(record: EncounterRecord, reason: FlagReason) -> Self {
        Self { record, reason }
    }

    pub fn key(&self) -> RecordKey {
        self.record.key()
    }
}

/// A record together with every distinct reason it was flagged for.
///
/// Reasons are held sorted by rendered label and unique by exact label, so
/// two outlier reasons computed with different thresholds both survive.
#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedRecord {
    pub record: EncounterRecord,
    reasons: Vec<FlagReason>,
}

impl FlaggedRecord {
    pub fn new(record: EncounterRecord, reason: FlagReason) -> Self {
        Self {
            record,
            reasons: vec![reason],
        }
    }

    /// Add a reason, keeping the set sorted and free of duplicate labels.
    pub fn add_reason(&mut self, reason: FlagReason) {
        let label = reason.label();
        match self
            .reasons
            .binary_search_by(|existing| existing.label().cmp(&label))
        {
            Ok(_) => {}
            Err(position) => self.reasons.insert(position, reason),
        }
    }

    pub fn reasons(&self) -> &[FlagReason] {
        &self.reasons
    }

    /// Rendered labels, in output order.
    pub fn reason_labels(&self) -> Vec<String> {
        self.reasons.iter().map(FlagReason::label).collect()
    }

    /// The consolidated `flag_reason` value.
    pub fn flag_reason(&self) -> String {
        self.reason_labels().join(REASON_SEPARATOR)
    }

    pub fn has_check(&self, check: CheckKind) -> bool {
        self.reasons.iter().any(|reason| reason.check() == check)
    }

    pub fn key(&self) -> RecordKey {
        self.record.key()
    }
}
