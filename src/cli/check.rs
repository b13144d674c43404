//! # Check Command
//!
//! This module implements the check/fix run: it resolves the configuration,
//! walks every path, prints the result and picks the exit code.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, warn};

use super::Cli;
use crate::classifier::Classifier;
use crate::config::load_config;
use crate::header::{License, check_holder};
use crate::info_log;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::output::{
  print_all_files_ok, print_blank_line, print_hint, print_offending_files, print_start_message, print_summary,
  print_walk_errors,
};
use crate::processor::{Mode, RunConfig};
use crate::report::{ProcessingSummary, ReportGenerator};
use crate::walker::Walker;

/// No issues found.
pub const EXIT_OK: i32 = 0;
/// Non-compliant files found in check-only mode.
pub const EXIT_NON_COMPLIANT: i32 = 1;
/// A traversal, I/O or configuration error occurred.
pub const EXIT_ERROR: i32 = 2;

/// Arguments for the check command
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
  /// Directories or files to scan. Directories are processed recursively.
  #[arg(required = false, value_name = "PATHS")]
  pub paths: Vec<PathBuf>,

  /// Only report non-compliant files; do not modify them
  #[arg(long)]
  pub check_only: bool,

  /// Copyright holder, e.g. "The Example Authors"
  #[arg(long, short = 'c', value_name = "HOLDER", value_parser = parse_holder)]
  pub copyright: Option<String>,

  /// License identifier to write
  #[arg(long, short = 'l', value_enum, default_value_t = License::Apache)]
  pub license: License,

  /// Copyright year for inserted headers (default: current year)
  #[arg(long, value_parser = parse_year)]
  pub year: Option<String>,

  /// File patterns to ignore (supports glob patterns)
  #[arg(long, short = 'i', value_name = "GLOB")]
  pub ignore: Vec<String>,

  /// Show the header insertion each non-compliant file would get (check-only
  /// mode)
  #[arg(long)]
  pub show_diff: bool,

  /// Write a JSON report of all checked files to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Path to config file (default: .licenser.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long, conflicts_with = "config")]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Only print offending paths and errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

fn parse_holder(value: &str) -> Result<String, String> {
  check_holder(value).map(|()| value.to_string()).map_err(str::to_string)
}

fn parse_year(value: &str) -> Result<String, String> {
  if value.len() == 4 && value.bytes().all(|b| b.is_ascii_digit()) {
    Ok(value.to_string())
  } else {
    Err(format!("expected a four-digit year, got '{value}'"))
  }
}

impl CheckArgs {
  const fn mode(&self) -> Mode {
    Mode::from_check_only(self.check_only)
  }
}

/// Run the check command with the given arguments.
///
/// # Returns
///
/// The process exit code: [`EXIT_OK`], [`EXIT_NON_COMPLIANT`] or
/// [`EXIT_ERROR`].
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or applied. Errors
/// while walking are reported and mapped to [`EXIT_ERROR`] instead.
pub fn run_check(args: CheckArgs) -> Result<i32> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let current_dir = std::env::current_dir().context("Failed to get current directory")?;
  let config = load_config(args.config.as_deref(), &current_dir, args.no_config)?.unwrap_or_default();

  let mode = args.mode();
  let holder = args.copyright.clone().or_else(|| config.holder.clone()).unwrap_or_default();

  if args.paths.is_empty() || (holder.is_empty() && mode == Mode::Fix) {
    eprintln!("{}", Cli::usage());
    return Ok(EXIT_OK);
  }
  if holder.is_empty() {
    warn!("No copyright holder given; every existing header will be reported as non-compliant");
  }
  if args.show_diff && mode == Mode::Fix {
    debug!("--show-diff has no effect outside check-only mode");
  }

  let classifier = config.apply_to(Classifier::builtin())?;
  let mut ignore_patterns = config.ignore.clone();
  ignore_patterns.extend(args.ignore.iter().cloned());

  let defaults = RunConfig::new(holder, mode);
  let run_config = RunConfig {
    license: args.license,
    year: args.year.clone().unwrap_or_else(|| defaults.year.clone()),
    classifier,
    ignore_patterns,
    show_diff: args.show_diff && mode == Mode::Check,
    ..defaults
  };
  debug!(
    "Running with holder '{}', year {}, {} ignore pattern(s)",
    run_config.holder,
    run_config.year,
    run_config.ignore_patterns.len()
  );

  let walker = Walker::new(run_config)?;

  print_start_message(mode, args.license);
  let aggregate = walker.run(&args.paths);
  let summary = ProcessingSummary::from_reports(&aggregate.reports);

  if aggregate.changed.is_empty() {
    if aggregate.is_success() {
      print_all_files_ok(mode);
    }
  } else {
    print_offending_files(&aggregate.changed, &aggregate.reports, mode);
  }
  print_walk_errors(&aggregate.errors, mode);

  print_summary(&summary);

  let mut exit_code = if !aggregate.is_success() {
    EXIT_ERROR
  } else if mode == Mode::Check && !aggregate.changed.is_empty() {
    print_blank_line();
    print_hint("Run without --check-only to add missing headers.");
    EXIT_NON_COMPLIANT
  } else {
    EXIT_OK
  };

  if let Some(ref output_path) = args.report_json {
    let report_generator = ReportGenerator::new(output_path);
    if let Err(e) = report_generator.generate(mode, &aggregate.reports) {
      eprintln!("Error generating JSON report: {e:#}");
      exit_code = EXIT_ERROR;
    } else {
      info_log!("Generated JSON report at {}", output_path.display());
    }
  }

  Ok(exit_code)
}
