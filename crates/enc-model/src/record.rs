//! Encounter records and their primary key.
//!
//! One record is the aggregate of a patient's encounters at one facility in
//! one reporting month, as produced by the upstream analytics query.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const PATIENT_ID: &str = "patient_id";
pub const FACILITY_ID: &str = "facility_id";
pub const YEAR_MONTH: &str = "year_month";
pub const TOTAL_ENCOUNTERS: &str = "total_encounters";
pub const TOTAL_COST: &str = "total_cost";
pub const DISTINCT_DIAGNOSIS_COUNT: &str = "distinct_diagnosis_count";

/// Extra column carried by flagged output tables.
pub const FLAG_REASON: &str = "flag_reason";

/// Primary-key columns, in schema order.
pub const KEY_COLUMNS: [&str; 3] = [PATIENT_ID, FACILITY_ID, YEAR_MONTH];

/// Every column of the input table, in schema order.
pub const INPUT_COLUMNS: [&str; 6] = [
    PATIENT_ID,
    FACILITY_ID,
    YEAR_MONTH,
    TOTAL_ENCOUNTERS,
    TOTAL_COST,
    DISTINCT_DIAGNOSIS_COUNT,
];

/// The `(patient_id, facility_id, year_month)` grain of the analytics table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub patient_id: String,
    pub facility_id: String,
    pub year_month: String,
}

impl RecordKey {
    pub fn new(
        patient_id: impl Into<String>,
        facility_id: impl Into<String>,
        year_month: impl Into<String>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            facility_id: facility_id.into(),
            year_month: year_month.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.patient_id, self.facility_id, self.year_month
        )
    }
}

/// One row of the analytics table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterRecord {
    pub patient_id: String,
    pub facility_id: String,
    /// Reporting month, `YYYY-MM`.
    pub year_month: String,
    pub total_encounters: i64,
    /// Summed encounter cost. Reversals can make this negative.
    pub total_cost: f64,
    pub distinct_diagnosis_count: i64,
}

impl EncounterRecord {
    /// Build the primary key of this record.
    pub fn key(&self) -> RecordKey {
        RecordKey {
            patient_id: self.patient_id.clone(),
            facility_id: self.facility_id.clone(),
            year_month: self.year_month.clone(),
        }
    }

    /// Returns true when this record has the given key.
    pub fn has_key(&self, key: &RecordKey) -> bool {
        self.patient_id == key.patient_id
            && self.facility_id == key.facility_id
            && self.year_month == key.year_month
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> EncounterRecord {
        EncounterRecord {
            patient_id: "P001".to_string(),
            facility_id: "F001".to_string(),
            year_month: "2025-01".to_string(),
            total_encounters: 3,
            total_cost: 150.0,
            distinct_diagnosis_count: 2,
        }
    }

    #[test]
    fn key_matches_record() {
        let record = record();
        let key = record.key();
        assert_eq!(key, RecordKey::new("P001", "F001", "2025-01"));
        assert!(record.has_key(&key));
        assert!(!record.has_key(&RecordKey::new("P001", "F001", "2025-02")));
    }

    #[test]
    fn key_display() {
        let key = RecordKey::new("P002", "F002", "2025-02");
        assert_eq!(key.to_string(), "P002/F002/2025-02");
    }

    #[test]
    fn keys_order_by_patient_then_facility_then_month() {
        let mut keys = vec![
            RecordKey::new("P002", "F001", "2025-01"),
            RecordKey::new("P001", "F002", "2025-01"),
            RecordKey::new("P001", "F001", "2025-02"),
            RecordKey::new("P001", "F001", "2025-01"),
        ];
        keys.sort();
        assert_eq!(keys[0], RecordKey::new("P001", "F001", "2025-01"));
        assert_eq!(keys[1], RecordKey::new("P001", "F001", "2025-02"));
        assert_eq!(keys[2], RecordKey::new("P001", "F002", "2025-01"));
        assert_eq!(keys[3], RecordKey::new("P002", "F001", "2025-01"));
    }
}
