//! # Report Module
//!
//! This module provides the machine-readable report of a run.
//!
//! It captures the outcome for every recognized source file, compliant ones
//! included, and writes it as JSON for CI tooling.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::processor::{ComplianceResult, FileOutcome, Mode};

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
  /// Path to the file, as walked
  #[serde(serialize_with = "serialize_path")]
  pub path: PathBuf,
  /// Outcome for the file
  pub status: ComplianceResult,
  /// Why the file was non-compliant or failed, if applicable
  pub reason: Option<String>,
}

impl FileReport {
  /// Builds a report entry from a processor outcome.
  pub fn from_outcome(path: &Path, outcome: &FileOutcome) -> Self {
    Self {
      path: path.to_path_buf(),
      status: outcome.result,
      reason: outcome.violation.as_ref().map(ToString::to_string),
    }
  }

  /// Builds a report entry for a file that could not be processed.
  pub fn error(path: &Path, error: &anyhow::Error) -> Self {
    Self {
      path: path.to_path_buf(),
      status: ComplianceResult::Error,
      reason: Some(format!("{error:#}")),
    }
  }
}

fn serialize_path<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
where
  S: serde::Serializer,
{
  serializer.serialize_str(&path.to_string_lossy())
}

/// Summary of the processing results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingSummary {
  /// Number of recognized source files visited
  pub checked: usize,
  /// Files whose header was already correct
  pub compliant: usize,
  /// Files reported in check mode
  pub non_compliant: usize,
  /// Files repaired in fix mode
  pub fixed: usize,
  /// Files that could not be read or written
  pub errors: usize,
}

impl ProcessingSummary {
  /// Create a ProcessingSummary from a collection of FileReports
  pub fn from_reports(files: &[FileReport]) -> Self {
    let mut summary = Self {
      checked: files.len(),
      ..Self::default()
    };

    for file in files {
      match file.status {
        ComplianceResult::Compliant => summary.compliant += 1,
        ComplianceResult::NonCompliant => summary.non_compliant += 1,
        ComplianceResult::Fixed => summary.fixed += 1,
        ComplianceResult::Error => summary.errors += 1,
      }
    }

    summary
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  mode: Mode,
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Report Generator for creating compliance reports
pub struct ReportGenerator<'a> {
  /// Path where the report will be saved
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(output_path: &'a Path) -> Self {
    Self { output_path }
  }

  /// Render the report as pretty-printed JSON.
  ///
  /// # Errors
  ///
  /// Returns an error if serialization fails.
  pub fn render(&self, mode: Mode, files: &[FileReport]) -> Result<String> {
    let summary = ProcessingSummary::from_reports(files);
    let report = JsonReport {
      mode,
      summary: &summary,
      files,
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize report")
  }

  /// Generate a report and write it to the output path.
  ///
  /// # Errors
  ///
  /// Returns an error if the report couldn't be serialized or written to disk.
  pub fn generate(&self, mode: Mode, files: &[FileReport]) -> Result<()> {
    let content = self.render(mode, files)?;
    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write report to {}", self.output_path.display()))
  }
}
