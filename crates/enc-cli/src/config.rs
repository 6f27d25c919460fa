//! Run configuration assembled once at startup.

use std::path::PathBuf;

use enc_ingest::{MAX_CSV_FILE_SIZE, SourceConfig};
use enc_output::OutputConfig;
use enc_quality::QualityOptions;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Everything a pipeline run needs, resolved from flags and environment.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// CSV export of the analytics table.
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub quality: QualityOptions,
    /// Run the checks without writing any file.
    pub dry_run: bool,
    pub max_file_size: u64,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            quality: QualityOptions::default(),
            dry_run: false,
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }

    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    #[must_use]
    pub fn with_percentile(mut self, percentile: f64) -> Self {
        self.quality = self.quality.with_percentile(percentile);
        self
    }

    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn source(&self) -> SourceConfig {
        SourceConfig::new(&self.input).with_max_file_size(self.max_file_size)
    }

    pub fn output(&self) -> OutputConfig {
        OutputConfig::new(&self.output_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RunConfig::new("analytics.csv");
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.quality.percentile, 0.99);
        assert!(!config.dry_run);
        assert_eq!(config.source().max_file_size, MAX_CSV_FILE_SIZE);
    }

    #[test]
    fn builders() {
        let config = RunConfig::new("in.csv")
            .with_output_dir("/tmp/out")
            .with_percentile(0.95)
            .with_dry_run(true);
        assert_eq!(config.output().output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.quality.percentile, 0.95);
        assert!(config.dry_run);
    }
}
