//! The end-to-end quality run: load, grain check, quality checks, outputs.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, warn};

use enc_ingest::{CsvEncounterSource, EncounterSource, GrainReport, check_grain};
use enc_model::QualityOutcome;
use enc_output::{PipelineReport, write_outputs};
use enc_quality::run_quality_checks_with;

use crate::config::RunConfig;
use crate::logging::redact_value;
use crate::types::RunResult;

pub fn run_pipeline(config: &RunConfig) -> Result<RunResult> {
    let span = info_span!("quality_run", input = %config.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    // =========================================================================
    // Stage 1: Load
    // =========================================================================
    let source = CsvEncounterSource::new(config.source());
    let analytics = source
        .load()
        .with_context(|| format!("load analytics table from {}", source.describe()))?;

    // =========================================================================
    // Stage 2: Grain
    // =========================================================================
    let grain = check_grain(&analytics);
    log_grain(&grain);

    // =========================================================================
    // Stage 3: Quality checks
    // =========================================================================
    let outcome = run_quality_checks_with(&analytics, &config.quality)
        .context("run quality checks")?;
    log_flagged(&outcome);

    // =========================================================================
    // Stage 4: Outputs
    // =========================================================================
    let outputs = if config.dry_run {
        info!("dry run, no files written");
        None
    } else {
        let paths = write_outputs(&config.output(), &analytics, &outcome).with_context(|| {
            format!("write outputs to {}", config.output_dir.display())
        })?;
        Some(paths)
    };

    let report = PipelineReport::build(&analytics, &outcome);
    info!(
        rows = analytics.len(),
        cleaned = outcome.cleaned.len(),
        flagged = outcome.flagged.len(),
        grain_issues = grain.len(),
        duration_ms = start.elapsed().as_millis(),
        "quality run complete"
    );

    Ok(RunResult {
        input: config.input.clone(),
        output_dir: config.output_dir.clone(),
        percentile: config.quality.percentile,
        analytics,
        outcome,
        grain,
        report,
        outputs,
    })
}

fn log_grain(grain: &GrainReport) {
    for issue in &grain.issues {
        warn!(kind = issue.kind(), row = issue.row(), "grain violation: {issue}");
    }
}

fn log_flagged(outcome: &QualityOutcome) {
    for flagged in &outcome.flagged {
        debug!(
            patient_id = redact_value(&flagged.record.patient_id),
            facility_id = %flagged.record.facility_id,
            year_month = %flagged.record.year_month,
            flag_reason = %flagged.flag_reason(),
            "flagged record"
        );
    }
}
