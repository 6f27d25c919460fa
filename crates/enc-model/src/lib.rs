//! Encounter analytics data model.
//!
//! Typed rows of the patient × facility × month analytics table, the flags
//! produced by quality checks, and the clean/flagged partition of a run.

pub mod error;
pub mod flag;
pub mod record;
pub mod table;

pub use error::{QualityError, Result};
pub use flag::{CheckKind, Flag, FlagReason, FlaggedRecord, REASON_SEPARATOR};
pub use record::{
    DISTINCT_DIAGNOSIS_COUNT, EncounterRecord, FACILITY_ID, FLAG_REASON, INPUT_COLUMNS,
    KEY_COLUMNS, PATIENT_ID, RecordKey, TOTAL_COST, TOTAL_ENCOUNTERS, YEAR_MONTH,
};
pub use table::{EncounterTable, FlaggedTable, QualityOutcome};
