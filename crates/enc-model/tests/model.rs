//! Tests for enc-model types.

use enc_model::{
    CheckKind, EncounterRecord, EncounterTable, FlagReason, FlaggedRecord, FlaggedTable,
    QualityOutcome, RecordKey,
};

fn record(patient: &str, facility: &str, month: &str, encounters: i64, cost: f64) -> EncounterRecord {
    EncounterRecord {
        patient_id: patient.to_string(),
        facility_id: facility.to_string(),
        year_month: month.to_string(),
        total_encounters: encounters,
        total_cost: cost,
        distinct_diagnosis_count: 1,
    }
}

#[test]
fn table_lookup_by_key() {
    let table = EncounterTable::new(vec![
        record("P001", "F001", "2025-01", 3, 150.0),
        record("P001", "F001", "2025-02", 2, 200.0),
    ]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.distinct_key_count(), 2);
    let found = table
        .find(&RecordKey::new("P001", "F001", "2025-02"))
        .expect("record present");
    assert_eq!(found.total_cost, 200.0);
    assert!(!table.contains_key(&RecordKey::new("P009", "F001", "2025-01")));
}

#[test]
fn distinct_key_count_ignores_duplicates() {
    let table: EncounterTable = vec![
        record("P001", "F001", "2025-01", 3, 150.0),
        record("P001", "F001", "2025-01", 3, 150.0),
    ]
    .into_iter()
    .collect();
    assert_eq!(table.len(), 2);
    assert_eq!(table.distinct_key_count(), 1);
}

#[test]
fn flagged_table_counts_by_check() {
    let mut both = FlaggedRecord::new(record("P010", "F003", "2025-01", 50, -1.0), FlagReason::NegativeCost);
    both.add_reason(FlagReason::HighEncounterCount {
        threshold: 45.05,
        percentile: 0.99,
    });
    let flagged = FlaggedTable::new(vec![
        FlaggedRecord::new(record("P002", "F002", "2025-02", 1, -30.0), FlagReason::NegativeCost),
        both,
    ]);
    assert_eq!(flagged.count_by_check(CheckKind::NegativeCost), 2);
    assert_eq!(flagged.count_by_check(CheckKind::HighEncounterCount), 1);
}

#[test]
fn partition_check_detects_overlap_and_gaps() {
    let input = EncounterTable::new(vec![
        record("P001", "F001", "2025-01", 3, 150.0),
        record("P002", "F002", "2025-02", 1, -30.0),
    ]);
    let valid = QualityOutcome {
        cleaned: EncounterTable::new(vec![input.records()[0].clone()]),
        flagged: FlaggedTable::new(vec![FlaggedRecord::new(
            input.records()[1].clone(),
            FlagReason::NegativeCost,
        )]),
    };
    assert!(valid.is_partition_of(&input));

    let overlapping = QualityOutcome {
        cleaned: input.clone(),
        flagged: valid.flagged.clone(),
    };
    assert!(!overlapping.is_partition_of(&input));

    let missing = QualityOutcome {
        cleaned: EncounterTable::default(),
        flagged: valid.flagged.clone(),
    };
    assert!(!missing.is_partition_of(&input));
}

#[test]
fn record_serializes_with_column_names() {
    let value = serde_json::to_value(record("P001", "F001", "2025-01", 3, 150.0))
        .expect("serialize record");
    assert_eq!(value["patient_id"], "P001");
    assert_eq!(value["total_encounters"], 3);
    assert_eq!(value["total_cost"], 150.0);
}

#[test]
fn flag_reason_serializes_tagged() {
    let value = serde_json::to_value(FlagReason::HighEncounterCount {
        threshold: 45.05,
        percentile: 0.99,
    })
    .expect("serialize reason");
    assert_eq!(value["check"], "high_encounter_count");
    assert_eq!(value["percentile"], 0.99);
}
