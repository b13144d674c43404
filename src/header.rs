//! # Header Module
//!
//! Builds the canonical two-line SPDX header and validates the header found
//! at the top of an existing file.
//!
//! Rendering and validation are driven by the same [`HeaderGrammar`]: the
//! copyright and SPDX fragments below are used both to format new headers and
//! to build the patterns that accept existing ones, so a header the tool
//! accepts always has exactly the shape the tool would write.
//!
//! ## Example
//!
//! ```rust
//! use licenser::header::build_header;
//!
//! let header = build_header("2025", "Acme Corp", "//");
//! assert_eq!(header, "// Copyright 2025 Acme Corp\n// SPDX-License-Identifier: Apache-2.0");
//! ```

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use regex::Regex;
use serde::Serialize;

use crate::processor::FileIO;

/// SPDX identifier written into every header.
pub const LICENSE_ID: &str = "Apache-2.0";

/// Keyword opening the first header line.
const COPYRIGHT_TAG: &str = "Copyright";

/// Tag opening the second header line.
const SPDX_TAG: &str = "SPDX-License-Identifier:";

/// Number of leading lines a header occupies, including the blank separator.
pub const HEADER_LINES: usize = 3;

/// License selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum License {
  /// Apache License 2.0
  #[default]
  Apache,
}

impl License {
  /// The SPDX identifier for the license.
  pub const fn spdx_id(self) -> &'static str {
    match self {
      Self::Apache => LICENSE_ID,
    }
  }

  /// Short name used in console output.
  pub const fn short_name(self) -> &'static str {
    match self {
      Self::Apache => "apache",
    }
  }
}

/// The header contract for one file type in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSpec {
  pub prefix: String,
  pub year: String,
  pub holder: String,
  pub license: License,
}

impl HeaderSpec {
  pub fn new(prefix: impl Into<String>, year: impl Into<String>, holder: impl Into<String>, license: License) -> Self {
    Self {
      prefix: prefix.into(),
      year: year.into(),
      holder: holder.into(),
      license,
    }
  }

  /// Renders the two header lines, without a trailing newline.
  pub fn render(&self) -> String {
    render_lines(&self.prefix, &self.year, &self.holder, self.license)
  }
}

/// Builds the canonical header for the fixed license.
pub fn build_header(year: &str, holder: &str, prefix: &str) -> String {
  render_lines(prefix, year, holder, License::Apache)
}

fn render_lines(prefix: &str, year: &str, holder: &str, license: License) -> String {
  format!(
    "{prefix} {COPYRIGHT_TAG} {year} {holder}\n{prefix} {SPDX_TAG} {}",
    license.spdx_id()
  )
}

/// Checks that `holder` fits on the copyright line.
///
/// # Errors
///
/// Returns a message if the holder contains a line break, which would split
/// the rendered header.
pub fn check_holder(holder: &str) -> Result<(), &'static str> {
  if holder.contains(['\n', '\r']) {
    Err("holder must fit on a single line")
  } else {
    Ok(())
  }
}

/// Why an existing header was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
  /// Fewer than three lines after skipping leading blank lines.
  TooShort { lines: usize },
  /// First line is not a copyright line for this prefix.
  MalformedCopyright,
  /// Second line is not an SPDX line.
  MalformedSpdx,
  /// Third line is not blank.
  MissingBlankLine,
  /// Header is well formed but names another holder.
  HolderMismatch { found: String },
  /// Header is well formed but names another license.
  LicenseMismatch { found: String },
}

impl fmt::Display for Violation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::TooShort { lines } => write!(f, "file has only {lines} leading line(s), header needs {HEADER_LINES}"),
      Self::MalformedCopyright => write!(f, "missing or malformed copyright line"),
      Self::MalformedSpdx => write!(f, "missing or malformed SPDX line"),
      Self::MissingBlankLine => write!(f, "header is not followed by a blank line"),
      Self::HolderMismatch { found } => write!(f, "copyright holder is \"{found}\""),
      Self::LicenseMismatch { found } => write!(f, "license is \"{found}\""),
    }
  }
}

/// Verdict on the leading lines of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderStatus {
  Valid,
  Invalid(Violation),
}

impl HeaderStatus {
  pub const fn is_valid(&self) -> bool {
    matches!(self, Self::Valid)
  }

  pub const fn violation(&self) -> Option<&Violation> {
    match self {
      Self::Valid => None,
      Self::Invalid(violation) => Some(violation),
    }
  }
}

/// Rendering and matching rules for one comment prefix.
#[derive(Debug, Clone)]
pub struct HeaderGrammar {
  prefix: String,
  license: License,
  copyright: Regex,
  spdx: Regex,
}

impl HeaderGrammar {
  /// Compiles the patterns for `prefix`.
  ///
  /// The SPDX pattern accepts any identifier so a foreign license can be
  /// named in the verdict; [`check`](Self::check) then requires an exact
  /// match with the configured license.
  ///
  /// # Errors
  ///
  /// Returns an error if the patterns fail to compile. The prefix is escaped,
  /// so this only happens for prefixes exceeding the regex size limits.
  pub fn new(prefix: &str, license: License) -> Result<Self> {
    let quoted = regex::escape(prefix);
    let copyright = Regex::new(&format!("^{quoted} {COPYRIGHT_TAG} ([0-9]{{4}}) (.+)$"))
      .with_context(|| format!("Failed to build copyright pattern for prefix '{prefix}'"))?;
    let spdx = Regex::new(&format!("^{quoted} {} (.+)$", regex::escape(SPDX_TAG)))
      .with_context(|| format!("Failed to build SPDX pattern for prefix '{prefix}'"))?;

    Ok(Self {
      prefix: prefix.to_string(),
      license,
      copyright,
      spdx,
    })
  }

  pub fn prefix(&self) -> &str {
    &self.prefix
  }

  /// Renders a header in this grammar.
  pub fn render(&self, year: &str, holder: &str) -> String {
    render_lines(&self.prefix, year, holder, self.license)
  }

  /// Checks the leading lines of a file (leading blank lines already
  /// skipped) against the grammar and the expected holder.
  ///
  /// The year is only required to be four digits; it is never compared with
  /// the current year.
  pub fn check(&self, lines: &[String], expected_holder: &str) -> HeaderStatus {
    if lines.len() < HEADER_LINES {
      return HeaderStatus::Invalid(Violation::TooShort { lines: lines.len() });
    }

    let Some(copyright) = self.copyright.captures(&lines[0]) else {
      return HeaderStatus::Invalid(Violation::MalformedCopyright);
    };
    let Some(spdx) = self.spdx.captures(&lines[1]) else {
      return HeaderStatus::Invalid(Violation::MalformedSpdx);
    };
    if !lines[2].trim().is_empty() {
      return HeaderStatus::Invalid(Violation::MissingBlankLine);
    }

    let holder = copyright.get(2).map_or("", |m| m.as_str());
    if holder != expected_holder {
      return HeaderStatus::Invalid(Violation::HolderMismatch {
        found: holder.to_string(),
      });
    }

    let license = spdx.get(1).map_or("", |m| m.as_str());
    if license != self.license.spdx_id() {
      return HeaderStatus::Invalid(Violation::LicenseMismatch {
        found: license.to_string(),
      });
    }

    HeaderStatus::Valid
  }

  /// Reads the leading lines of `path` and checks them.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be opened or read. A missing or
  /// wrong header is reported through [`HeaderStatus`], never as an error.
  pub fn inspect(&self, path: &Path, expected_holder: &str) -> Result<HeaderStatus> {
    let lines = FileIO::read_leading_lines(path, HEADER_LINES)?;
    Ok(self.check(&lines, expected_holder))
  }
}

/// Returns whether `path` starts with a valid header for `prefix` naming
/// `expected_holder`.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn validate_header(path: &Path, prefix: &str, expected_holder: &str) -> Result<bool> {
  let grammar = HeaderGrammar::new(prefix, License::Apache)?;
  Ok(grammar.inspect(path, expected_holder)?.is_valid())
}
