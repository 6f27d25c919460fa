//! Encounter table ingestion.
//!
//! Loads the patient × facility × month analytics table from CSV into a typed
//! [`EncounterTable`](enc_model::EncounterTable) and reports grain violations.
//!
//! # Example
//!
//! ```ignore
//! use enc_ingest::{CsvEncounterSource, EncounterSource, SourceConfig, check_grain};
//!
//! let source = CsvEncounterSource::new(SourceConfig::new("output/analytics_summary.csv"));
//! let table = source.load()?;
//! let grain = check_grain(&table);
//! ```

mod error;
mod grain;
mod reader;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, ensure_header, read_csv_frame, validate_column_names,
    validate_encoding,
};

// === Sources ===
pub use source::{CsvEncounterSource, EncounterSource, SourceConfig, load_csv};

// === Grain Checks ===
pub use grain::{GrainIssue, GrainReport, check_grain, is_year_month};
