use anyhow::Result;

use enc_cli::config::RunConfig;
use enc_cli::pipeline::run_pipeline;
use enc_cli::types::RunResult;

use crate::cli::{CheckArgs, RunArgs};

pub fn run_quality(args: &RunArgs) -> Result<RunResult> {
    let config = RunConfig::new(&args.input)
        .with_output_dir(&args.output_dir)
        .with_percentile(args.percentile)
        .with_dry_run(args.dry_run);
    run_pipeline(&config)
}

pub fn run_check(args: &CheckArgs) -> Result<RunResult> {
    let config = RunConfig::new(&args.input)
        .with_percentile(args.percentile)
        .with_dry_run(true);
    run_pipeline(&config)
}
