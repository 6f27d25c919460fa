//! Error types for encounter table ingestion.

use std::path::PathBuf;
use thiserror::Error;

use enc_model::QualityError;

/// Errors that can occur while loading the analytics table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is {size} bytes, exceeding the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// File starts with a byte order mark we cannot decode.
    #[error("unsupported encoding {encoding} in {path}; re-save the file as UTF-8")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no header line.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// A header cell is blank.
    #[error("CSV file {path} has an empty column name")]
    EmptyColumnName { path: PathBuf },

    // === Schema Errors ===
    /// The loaded frame does not satisfy the analytics table contract.
    #[error("invalid analytics table in {path}: {source}")]
    Schema {
        path: PathBuf,
        #[source]
        source: QualityError,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

impl IngestError {
    /// The schema violation behind this error, if any.
    pub fn quality_error(&self) -> Option<&QualityError> {
        match self {
            IngestError::Schema { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/analytics_summary.csv"),
        };
        assert_eq!(
            err.to_string(),
            "CSV file not found: /data/analytics_summary.csv"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("total_cost".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }

    #[test]
    fn test_schema_error_exposes_source() {
        let err = IngestError::Schema {
            path: PathBuf::from("in.csv"),
            source: QualityError::MissingColumn {
                column: "total_cost".to_string(),
            },
        };
        assert!(matches!(
            err.quality_error(),
            Some(QualityError::MissingColumn { .. })
        ));
        assert_eq!(
            err.to_string(),
            "invalid analytics table in in.csv: required column 'total_cost' not found in input table"
        );
    }
}
