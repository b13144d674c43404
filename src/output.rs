//! # Output Module
//!
//! This module centralizes all user-facing output for the licenser tool.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! ## Design Goals
//!
//! - **Scannable**: one bullet per offending file, in walk order
//! - **Progressive**: violation reasons with `-v`, silence with `-q`
//! - **Scriptable**: in quiet mode stdout carries only the offending paths

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use owo_colors::{OwoColorize, Stream};

use crate::header::License;
use crate::logging::{is_quiet, is_verbose};
use crate::processor::Mode;
use crate::report::{FileReport, ProcessingSummary};
use crate::walker::WalkError;

/// Symbols used in output
pub mod symbols {
  /// Success/valid header
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Missing header/failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Header inserted
  pub const FIXED: &str = "\u{21bb}"; // ↻
  /// List item
  pub const BULLET: &str = "\u{2022}"; // •
}

/// Print the "Running in CHECK mode (apache license)" banner.
pub fn print_start_message(mode: Mode, license: License) {
  if is_quiet() {
    return;
  }

  println!("Running in {} mode ({} license)", mode.label(), license.short_name());
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the files found non-compliant (check mode) or fixed (fix mode).
///
/// In verbose mode each entry is followed by the reason its header was
/// rejected, looked up in `reports`.
pub fn print_offending_files(files: &[PathBuf], reports: &[FileReport], mode: Mode) {
  if files.is_empty() {
    return;
  }

  if is_quiet() {
    for file in files {
      println!("{}", file.display());
    }
    return;
  }

  let header = match mode {
    Mode::Check => format!(
      "{} Missing or invalid headers:",
      symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red())
    ),
    Mode::Fix => format!(
      "{} Added headers to:",
      symbols::FIXED.if_supports_color(Stream::Stdout, |s| s.green())
    ),
  };
  println!("{header}");

  let reasons: HashMap<&Path, &str> = if is_verbose() {
    reports
      .iter()
      .filter_map(|r| r.reason.as_deref().map(|reason| (r.path.as_path(), reason)))
      .collect()
  } else {
    HashMap::new()
  };

  for file in files {
    match reasons.get(file.as_path()) {
      Some(reason) => println!(
        " {} {} {}",
        symbols::BULLET,
        file.display(),
        format!("({reason})").if_supports_color(Stream::Stdout, |s| s.dimmed())
      ),
      None => println!(" {} {}", symbols::BULLET, file.display()),
    }
  }
}

/// Print the success message when nothing was reported.
pub fn print_all_files_ok(mode: Mode) {
  if is_quiet() {
    return;
  }

  let message = match mode {
    Mode::Check => "All files have valid headers.",
    Mode::Fix => "No changes needed - all headers already valid.",
  };
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

/// Print the failed roots to stderr, with the files each had already
/// detected or fixed before it was aborted.
///
/// Errors are printed even in quiet mode.
pub fn print_walk_errors(errors: &[WalkError], mode: Mode) {
  for error in errors {
    eprintln!(
      "{} Error scanning {}: {:#}",
      symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red()),
      error.root.display(),
      error.cause
    );

    if error.changed.is_empty() {
      continue;
    }
    let verb = match mode {
      Mode::Check => "Detected",
      Mode::Fix => "Fixed",
    };
    eprintln!("  {verb} before the error:");
    for file in &error.changed {
      eprintln!("   {} {}", symbols::BULLET, file.display());
    }
  }
}

/// Print a one-line summary of the run.
///
/// Format: "Summary: X checked, Y OK, Z non-compliant, W fixed, V errors"
/// Only shown in verbose mode.
pub fn print_summary(summary: &ProcessingSummary) {
  if !is_verbose() {
    return;
  }

  let problems_str = if summary.non_compliant > 0 {
    summary
      .non_compliant
      .if_supports_color(Stream::Stdout, |s| s.red())
      .to_string()
  } else {
    summary
      .non_compliant
      .if_supports_color(Stream::Stdout, |s| s.cyan())
      .to_string()
  };

  println!(
    "Summary: {} checked, {} OK, {} non-compliant, {} fixed, {} errors",
    summary.checked,
    summary.compliant.if_supports_color(Stream::Stdout, |s| s.cyan()),
    problems_str,
    summary.fixed,
    summary.errors
  );
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}
