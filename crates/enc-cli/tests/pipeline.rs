//! Integration tests for the end-to-end quality run.

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use enc_cli::config::RunConfig;
use enc_cli::pipeline::run_pipeline;
use enc_cli::types::PREVIEW_ROWS;

const SAMPLE: &str = "\
patient_id,facility_id,year_month,total_encounters,total_cost,distinct_diagnosis_count
P001,F001,2025-01,3,450.00,2
P002,F002,2025-02,2,-30.00,1
P003,F001,2025-01,5,1200.00,3
P004,F003,2025-02,1,80.50,1
P005,F002,2025-02,4,610.00,2
P006,F001,2025-02,2,95.00,1
P007,F003,2025-03,3,300.00,2
P008,F002,2025-03,1,45.00,1
P009,F001,2025-03,2,210.00,1
P010,F003,2025-01,50,9800.00,5
P011,F002,2025-01,2,150.00,1
P012,F001,2025-02,1,60.00,1
";

fn write_input(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("analytics_summary.csv");
    fs::write(&path, contents).expect("write input");
    path
}

#[test]
fn run_writes_partitions_and_report() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(dir.path(), SAMPLE);
    let output_dir = dir.path().join("out");

    let config = RunConfig::new(&input).with_output_dir(&output_dir);
    let result = run_pipeline(&config).expect("run");

    assert_eq!(result.analytics.len(), 12);
    assert_eq!(result.outcome.cleaned.len(), 10);
    assert_eq!(result.outcome.flagged.len(), 2);
    assert!(result.grain.is_clean());

    let paths = result.outputs.expect("outputs written");
    let flagged = fs::read_to_string(&paths.flagged).expect("read flagged");
    assert_eq!(flagged.lines().count(), 3);
    assert!(flagged.contains("P002,F002,2025-02,2,"));
    assert!(flagged.contains("negative_cost"));
    assert!(flagged.contains("high_encounter_count (>45, p99)"));

    let report = fs::read_to_string(&paths.report).expect("read report");
    assert!(report.contains("  Records passing all checks:   10"));
    assert!(report.contains("  Records flagged:              2"));
    assert!(report.contains("    - negative_cost: 1 record(s)"));
    assert!(report.contains("  Reporting months:   2025-01, 2025-02, 2025-03"));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(dir.path(), SAMPLE);
    let output_dir = dir.path().join("out");

    let config = RunConfig::new(&input)
        .with_output_dir(&output_dir)
        .with_dry_run(true);
    let result = run_pipeline(&config).expect("run");

    assert!(result.dry_run());
    assert_eq!(result.outcome.flagged.len(), 2);
    assert_eq!(result.preview().len(), PREVIEW_ROWS);
    assert_eq!(result.preview()[0].patient_id, "P001");
    assert!(!output_dir.exists());
}

#[test]
fn lower_percentile_flags_more() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(dir.path(), SAMPLE);
    let config = RunConfig::new(&input)
        .with_percentile(0.5)
        .with_dry_run(true);
    let result = run_pipeline(&config).expect("run");
    // P002 is below the median count, so it is flagged for cost only.
    assert_eq!(result.outcome.flagged.len(), 6);
}

#[test]
fn missing_column_fails_the_run() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(
        dir.path(),
        "patient_id,facility_id,year_month,total_encounters,distinct_diagnosis_count\n\
         P001,F001,2025-01,3,2\n",
    );
    let config = RunConfig::new(&input).with_output_dir(dir.path().join("out"));
    let error = run_pipeline(&config).unwrap_err();
    let message = format!("{error:#}");
    assert!(message.contains("required column 'total_cost'"), "{message}");
    assert!(!dir.path().join("out").exists());
}

#[test]
fn invalid_percentile_fails_before_output() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(dir.path(), SAMPLE);
    let config = RunConfig::new(&input)
        .with_output_dir(dir.path().join("out"))
        .with_percentile(1.0);
    let error = run_pipeline(&config).unwrap_err();
    assert!(format!("{error:#}").contains("invalid percentile"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn grain_issues_do_not_stop_the_run() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(
        dir.path(),
        "patient_id,facility_id,year_month,total_encounters,total_cost,distinct_diagnosis_count\n\
         P001,F001,2025-01,3,450.00,2\n\
         P001,F001,2025-01,3,450.00,2\n",
    );
    let config = RunConfig::new(&input).with_dry_run(true);
    let result = run_pipeline(&config).expect("run");
    assert_eq!(result.grain.count_kind("duplicate_key"), 1);
    assert_eq!(result.analytics.len(), 2);
}

#[test]
fn preview_is_shorter_for_small_tables() {
    let dir = tempdir().expect("tempdir");
    let input = write_input(
        dir.path(),
        "patient_id,facility_id,year_month,total_encounters,total_cost,distinct_diagnosis_count\n\
         P001,F001,2025-01,3,450.00,2\n",
    );
    let result = run_pipeline(&RunConfig::new(&input).with_dry_run(true)).expect("run");
    assert_eq!(result.preview().len(), 1);
}
