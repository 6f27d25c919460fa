//! CLI argument definitions for `encounter-qc`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use enc_quality::{DEFAULT_PERCENTILE, validate_percentile};

#[derive(Parser)]
#[command(
    name = "encounter-qc",
    version,
    about = "Encounter analytics quality checks",
    long_about = "Run data quality checks over the patient x facility x month encounter\n\
                  analytics table and split it into cleaned and flagged records.\n\n\
                  Flags rows with negative total cost and rows whose encounter count\n\
                  exceeds a table-wide percentile threshold."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient identifiers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the checks and write cleaned, flagged and report outputs.
    Run(RunArgs),

    /// Run the checks and print the summary without writing files.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// CSV export of the analytics table.
    #[arg(long = "input", value_name = "CSV", env = "ENCOUNTER_INPUT")]
    pub input: PathBuf,

    /// Output directory for generated files.
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        env = "OUTPUT_DIR",
        default_value = "output"
    )]
    pub output_dir: PathBuf,

    /// Percentile of total_encounters above which a row is flagged, in (0, 1).
    #[arg(long = "percentile", value_name = "P", default_value_t = DEFAULT_PERCENTILE, value_parser = parse_percentile)]
    pub percentile: f64,

    /// Run the checks and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// CSV export of the analytics table.
    #[arg(long = "input", value_name = "CSV", env = "ENCOUNTER_INPUT")]
    pub input: PathBuf,

    /// Percentile of total_encounters above which a row is flagged, in (0, 1).
    #[arg(long = "percentile", value_name = "P", default_value_t = DEFAULT_PERCENTILE, value_parser = parse_percentile)]
    pub percentile: f64,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_percentile(value: &str) -> Result<f64, String> {
    let percentile: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    validate_percentile(percentile).map_err(|error| error.to_string())?;
    Ok(percentile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn percentile_parser() {
        assert_eq!(parse_percentile("0.95"), Ok(0.95));
        assert!(parse_percentile("1").is_err());
        assert!(parse_percentile("0").is_err());
        assert!(parse_percentile("abc").is_err());
    }

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["encounter-qc", "run", "--input", "in.csv"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.input, PathBuf::from("in.csv"));
        assert_eq!(args.percentile, 0.99);
        assert!(!args.dry_run);
    }

    #[test]
    fn check_rejects_bad_percentile() {
        let result = Cli::try_parse_from([
            "encounter-qc",
            "check",
            "--input",
            "in.csv",
            "--percentile",
            "1.5",
        ]);
        assert!(result.is_err());
    }
}
