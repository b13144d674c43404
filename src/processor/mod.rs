//! # Processor Module
//!
//! This module contains the per-file half of a run: deciding whether a file's
//! header is compliant and, in fix mode, inserting the canonical header.
//!
//! The module is organized into submodules:
//! - [`file_io`] - File reading and writing operations
//!
//! The [`Processor`] struct is the entry point for all file operations. Tree
//! traversal lives in [`crate::walker`], which hands each qualifying file to
//! [`Processor::process_file`].

mod file_io;

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use chrono::Datelike as _;
pub use file_io::FileIO;
use serde::Serialize;
use tracing::{debug, trace};

use crate::classifier::Classifier;
use crate::diff::DiffManager;
use crate::header::{HeaderGrammar, HeaderSpec, License, Violation};
use crate::info_log;

/// Whether a run only reports or also repairs files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  /// Verify without mutating any file.
  Check,
  /// Insert the canonical header into non-compliant files.
  Fix,
}

impl Mode {
  pub const fn from_check_only(check_only: bool) -> Self {
    if check_only { Self::Check } else { Self::Fix }
  }

  /// Upper-case label used in console output.
  pub const fn label(self) -> &'static str {
    match self {
      Self::Check => "CHECK",
      Self::Fix => "FIX",
    }
  }
}

/// Per-file outcome of one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceResult {
  /// The header was already correct.
  Compliant,
  /// The header is missing or wrong and the file was left alone.
  NonCompliant,
  /// The header was missing or wrong and has been inserted.
  Fixed,
  /// The file could not be read or written.
  Error,
}

impl ComplianceResult {
  /// Whether the file was, or in check mode would have been, modified.
  pub const fn is_changed(self) -> bool {
    matches!(self, Self::NonCompliant | Self::Fixed)
  }
}

/// Result of [`Processor::process_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
  pub result: ComplianceResult,
  /// Why the existing header was rejected; `None` for compliant files.
  pub violation: Option<Violation>,
}

impl FileOutcome {
  const fn compliant() -> Self {
    Self {
      result: ComplianceResult::Compliant,
      violation: None,
    }
  }
}

/// Configuration for one run.
///
/// Everything a run depends on is carried here and passed explicitly to the
/// walker, so independent runs can share a process.
#[derive(Debug, Clone)]
pub struct RunConfig {
  pub holder: String,
  pub mode: Mode,
  pub license: License,

  /// Year written into new headers, fixed when the config is created.
  pub year: String,

  pub classifier: Classifier,
  pub ignore_patterns: Vec<String>,

  /// Print the insertion each non-compliant file would get (check mode only).
  pub show_diff: bool,
}

impl RunConfig {
  /// Creates a new RunConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```
  /// use licenser::processor::{Mode, RunConfig};
  ///
  /// let config = RunConfig {
  ///   year: "2025".to_string(),
  ///   ..RunConfig::new("Acme Corp", Mode::Check)
  /// };
  /// assert_eq!(config.holder, "Acme Corp");
  /// ```
  pub fn new(holder: impl Into<String>, mode: Mode) -> Self {
    Self {
      holder: holder.into(),
      mode,
      license: License::default(),
      year: chrono::Local::now().year().to_string(),
      classifier: Classifier::default(),
      ignore_patterns: Vec::new(),
      show_diff: false,
    }
  }

  /// Header contract for files using `prefix` in this run.
  pub fn header_for(&self, prefix: &str) -> HeaderSpec {
    HeaderSpec::new(prefix, self.year.as_str(), self.holder.as_str(), self.license)
  }
}

/// Verifies and repairs individual files.
///
/// Header patterns are compiled once per distinct comment prefix of the
/// classifier; a prefix outside that set is compiled on demand.
pub struct Processor {
  license: License,
  grammars: HashMap<String, HeaderGrammar>,
  diff_manager: Option<DiffManager>,
}

impl Processor {
  /// Creates a processor for the prefixes `classifier` can produce.
  ///
  /// # Errors
  ///
  /// Returns an error if a header pattern fails to compile.
  pub fn new(classifier: &Classifier, license: License, show_diff: bool) -> Result<Self> {
    let grammars = classifier
      .prefixes()
      .map(|prefix| -> Result<(String, HeaderGrammar)> {
        Ok((prefix.to_string(), HeaderGrammar::new(prefix, license)?))
      })
      .collect::<Result<HashMap<_, _>>>()?;
    debug!("Compiled header patterns for {} comment prefix(es)", grammars.len());

    Ok(Self {
      license,
      grammars,
      diff_manager: show_diff.then_some(DiffManager::new(true)),
    })
  }

  /// Creates a processor from a run configuration.
  pub fn from_config(config: &RunConfig) -> Result<Self> {
    Self::new(&config.classifier, config.license, config.show_diff)
  }

  /// Verifies one file and, in fix mode, inserts `header` when needed.
  ///
  /// # Parameters
  ///
  /// * `path` - File to process
  /// * `header` - Expected header; its holder is the one the file must name
  /// * `mode` - Whether a non-compliant file is reported or repaired
  ///
  /// # Returns
  ///
  /// The [`FileOutcome`]. Compliant files are never rewritten.
  ///
  /// # Errors
  ///
  /// Returns an error naming the path if the file cannot be read or written.
  pub fn process_file(&self, path: &Path, header: &HeaderSpec, mode: Mode) -> Result<FileOutcome> {
    let status = match self.grammars.get(&header.prefix) {
      Some(grammar) => grammar.inspect(path, &header.holder)?,
      None => HeaderGrammar::new(&header.prefix, self.license)?.inspect(path, &header.holder)?,
    };

    let Some(violation) = status.violation().cloned() else {
      trace!("Compliant: {}", path.display());
      return Ok(FileOutcome::compliant());
    };
    debug!("Non-compliant: {} ({})", path.display(), violation);

    match mode {
      Mode::Check => {
        if let Some(diff_manager) = &self.diff_manager {
          let original = FileIO::read_bytes(path)?;
          let updated = with_header(&original, &header.render());
          diff_manager.display_diff(
            path,
            &String::from_utf8_lossy(&original),
            &String::from_utf8_lossy(&updated),
          );
        }
        Ok(FileOutcome {
          result: ComplianceResult::NonCompliant,
          violation: Some(violation),
        })
      }
      Mode::Fix => {
        let original = FileIO::read_bytes(path)?;
        FileIO::write_bytes(path, &with_header(&original, &header.render()))?;
        info_log!("Added license to: {}", path.display());
        Ok(FileOutcome {
          result: ComplianceResult::Fixed,
          violation: Some(violation),
        })
      }
    }
  }
}

/// Prepends `header`, followed by one blank line, to `original`.
///
/// The original bytes are kept verbatim, including any header they already
/// carry.
pub fn with_header(original: &[u8], header: &str) -> Vec<u8> {
  let mut content = Vec::with_capacity(header.len() + 2 + original.len());
  content.extend_from_slice(header.as_bytes());
  content.extend_from_slice(b"\n\n");
  content.extend_from_slice(original);
  content
}
