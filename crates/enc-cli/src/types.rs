use std::path::PathBuf;

use enc_ingest::GrainReport;
use enc_model::{EncounterRecord, EncounterTable, QualityOutcome};
use enc_output::{OutputPaths, PipelineReport};

/// Rows of the analytics table shown in the console preview.
pub const PREVIEW_ROWS: usize = 10;

#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub percentile: f64,
    pub analytics: EncounterTable,
    pub outcome: QualityOutcome,
    pub grain: GrainReport,
    pub report: PipelineReport,
    /// `None` for dry runs.
    pub outputs: Option<OutputPaths>,
}

impl RunResult {
    pub fn dry_run(&self) -> bool {
        self.outputs.is_none()
    }

    /// The first [`PREVIEW_ROWS`] rows of the analytics table.
    pub fn preview(&self) -> &[EncounterRecord] {
        let records = self.analytics.records();
        &records[..records.len().min(PREVIEW_ROWS)]
    }
}
