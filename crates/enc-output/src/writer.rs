//! CSV and report file writers.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::*;
use tracing::info;

use enc_common::{flagged_to_frame, table_to_frame};
use enc_model::{EncounterTable, QualityOutcome};

use crate::error::{OutputError, Result};
use crate::report::PipelineReport;

pub const ANALYTICS_FILE: &str = "analytics_summary.csv";
pub const CLEANED_FILE: &str = "cleaned_encounters.csv";
pub const FLAGGED_FILE: &str = "flagged_encounters.csv";
pub const REPORT_FILE: &str = "pipeline_report.txt";

/// Where run outputs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
}

impl OutputConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn paths(&self) -> OutputPaths {
        OutputPaths {
            analytics: self.output_dir.join(ANALYTICS_FILE),
            cleaned: self.output_dir.join(CLEANED_FILE),
            flagged: self.output_dir.join(FLAGGED_FILE),
            report: self.output_dir.join(REPORT_FILE),
        }
    }
}

/// Paths of the files a run writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub analytics: PathBuf,
    pub cleaned: PathBuf,
    pub flagged: PathBuf,
    pub report: PathBuf,
}

impl OutputPaths {
    pub fn all(&self) -> [&Path; 4] {
        [
            &self.analytics,
            &self.cleaned,
            &self.flagged,
            &self.report,
        ]
    }
}

/// Write the input table, both partitions and the text report.
///
/// The output directory is created if missing. Every CSV carries a header
/// row even when it has no data rows.
pub fn write_outputs(
    config: &OutputConfig,
    analytics: &EncounterTable,
    outcome: &QualityOutcome,
) -> Result<OutputPaths> {
    let start = Instant::now();
    std::fs::create_dir_all(&config.output_dir).map_err(|source| OutputError::CreateDir {
        path: config.output_dir.clone(),
        source,
    })?;
    let paths = config.paths();

    write_csv(&paths.analytics, table_to_frame(analytics))?;
    write_csv(&paths.cleaned, table_to_frame(&outcome.cleaned))?;
    write_csv(&paths.flagged, flagged_to_frame(&outcome.flagged))?;

    let report = PipelineReport::build(analytics, outcome).render();
    std::fs::write(&paths.report, report).map_err(|source| OutputError::Write {
        path: paths.report.clone(),
        source,
    })?;

    info!(
        output_dir = %config.output_dir.display(),
        analytics = analytics.len(),
        cleaned = outcome.cleaned.len(),
        flagged = outcome.flagged.len(),
        duration_ms = start.elapsed().as_millis(),
        "outputs written"
    );
    Ok(paths)
}

fn write_csv(path: &Path, frame: PolarsResult<DataFrame>) -> Result<()> {
    let table_error = |e: PolarsError| OutputError::Table {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut df = frame.map_err(table_error)?;
    let mut file = File::create(path).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(table_error)
}
