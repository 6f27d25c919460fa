//! Where the analytics table comes from.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use enc_common::table_from_frame;
use enc_model::EncounterTable;

use crate::error::{IngestError, Result};
use crate::reader::{MAX_CSV_FILE_SIZE, read_csv_frame};

/// A supplier of the materialized analytics table.
pub trait EncounterSource {
    /// Human-readable origin, used in logs and reports.
    fn describe(&self) -> String;

    /// Load the whole table.
    fn load(&self) -> Result<EncounterTable>;
}

/// Location and limits of a CSV export of the analytics table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub path: PathBuf,
    pub max_file_size: u64,
}

impl SourceConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }

    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

/// Reads the analytics table from a CSV file.
#[derive(Debug, Clone)]
pub struct CsvEncounterSource {
    config: SourceConfig,
}

impl CsvEncounterSource {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

impl EncounterSource for CsvEncounterSource {
    fn describe(&self) -> String {
        self.config.path.display().to_string()
    }

    fn load(&self) -> Result<EncounterTable> {
        let start = Instant::now();
        let path = &self.config.path;
        let df = read_csv_frame(path, self.config.max_file_size)?;
        let table = table_from_frame(&df).map_err(|source| IngestError::Schema {
            path: path.clone(),
            source,
        })?;
        info!(
            path = %path.display(),
            rows = table.len(),
            duration_ms = start.elapsed().as_millis(),
            "loaded analytics table"
        );
        Ok(table)
    }
}

/// Load the table at `path` with default limits.
pub fn load_csv(path: &Path) -> Result<EncounterTable> {
    CsvEncounterSource::new(SourceConfig::new(path)).load()
}
