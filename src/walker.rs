//! # Walker Module
//!
//! Recursively visits root paths, hands each recognized source file to the
//! [`Processor`], and aggregates the files that were found non-compliant or
//! were fixed.
//!
//! Entries are visited in file-name order within each directory so output is
//! reproducible. Roots are independent: a failure aborts only the root it
//! happened in, and the files already handled there travel with the error.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::file_filter::{FileFilter, IgnoreFilter, create_walk_filter};
use crate::header::check_holder;
use crate::processor::{Processor, RunConfig};
use crate::report::FileReport;

/// Result of walking one root without error.
#[derive(Debug, Default)]
pub struct RootOutcome {
  /// Non-compliant (check mode) or fixed (fix mode) files, in walk order.
  pub changed: Vec<PathBuf>,
  /// One entry per recognized source file visited.
  pub reports: Vec<FileReport>,
}

/// A root whose walk was aborted.
#[derive(Debug, thiserror::Error)]
#[error("{}: {cause:#}", .root.display())]
pub struct WalkError {
  pub root: PathBuf,
  /// Files detected or fixed in this root before the failure.
  pub changed: Vec<PathBuf>,
  /// Reports gathered before the failure, ending with the failing file when
  /// the error came from processing one.
  pub reports: Vec<FileReport>,
  pub cause: anyhow::Error,
}

impl WalkError {
  fn new(root: &Path, cause: anyhow::Error) -> Self {
    Self {
      root: root.to_path_buf(),
      changed: Vec::new(),
      reports: Vec::new(),
      cause,
    }
  }
}

/// Combined result of a multi-root run.
#[derive(Debug, Default)]
pub struct RunAggregate {
  /// Changed files of every successful root, in root then walk order.
  pub changed: Vec<PathBuf>,
  /// Reports of every root, failed roots included.
  pub reports: Vec<FileReport>,
  /// One entry per failed root.
  pub errors: Vec<WalkError>,
}

impl RunAggregate {
  pub fn is_success(&self) -> bool {
    self.errors.is_empty()
  }
}

/// Walks roots for a single run configuration.
pub struct Walker {
  config: RunConfig,
  processor: Processor,
  ignore: IgnoreFilter,
}

impl Walker {
  /// Creates a walker for `config`.
  ///
  /// # Errors
  ///
  /// Returns an error if the holder spans several lines, an ignore pattern
  /// is invalid, or a header pattern fails to compile.
  pub fn new(config: RunConfig) -> anyhow::Result<Self> {
    check_holder(&config.holder)
      .map_err(|message| anyhow::anyhow!("Invalid copyright holder {:?}: {message}", config.holder))?;
    let ignore = IgnoreFilter::from_patterns(&config.ignore_patterns)?;
    let processor = Processor::from_config(&config)?;
    Ok(Self {
      config,
      processor,
      ignore,
    })
  }

  pub const fn config(&self) -> &RunConfig {
    &self.config
  }

  /// Walks every root in order, continuing past failed roots.
  pub fn run(&self, roots: &[PathBuf]) -> RunAggregate {
    let mut aggregate = RunAggregate::default();

    for root in roots {
      match self.walk_root(root) {
        Ok(outcome) => {
          aggregate.changed.extend(outcome.changed);
          aggregate.reports.extend(outcome.reports);
        }
        Err(err) => {
          debug!("Walk of {} aborted: {:#}", err.root.display(), err.cause);
          aggregate.reports.extend(err.reports.iter().cloned());
          aggregate.errors.push(err);
        }
      }
    }

    aggregate
  }

  /// Walks a single root, which may be a directory or a file.
  ///
  /// # Errors
  ///
  /// Returns a [`WalkError`] on the first traversal or processing error; the
  /// rest of the root is not visited.
  pub fn walk_root(&self, root: &Path) -> Result<RootOutcome, WalkError> {
    let start_time = Instant::now();
    let filter = create_walk_filter(&self.ignore, root, &self.config.classifier);
    let mut outcome = RootOutcome::default();

    debug!("Scanning: {}", root.display());
    for entry in WalkDir::new(root).sort_by_file_name() {
      let entry = match entry.with_context(|| format!("Failed to traverse {}", root.display())) {
        Ok(entry) => entry,
        Err(cause) => return Err(abort(root, outcome, cause)),
      };
      let path = entry.path();

      if entry.file_type().is_dir() || (entry.path_is_symlink() && path.is_dir()) {
        continue;
      }

      let filter_result = filter.should_process(path);
      if !filter_result.should_process {
        trace!(
          "Skipping: {} ({})",
          path.display(),
          filter_result.reason.as_deref().unwrap_or("filtered")
        );
        continue;
      }

      let prefix = self.config.classifier.comment_prefix(path);
      let header = self.config.header_for(prefix);
      match self.processor.process_file(path, &header, self.config.mode) {
        Ok(file_outcome) => {
          if file_outcome.result.is_changed() {
            outcome.changed.push(path.to_path_buf());
          }
          outcome.reports.push(FileReport::from_outcome(path, &file_outcome));
        }
        Err(cause) => {
          outcome.reports.push(FileReport::error(path, &cause));
          return Err(abort(root, outcome, cause));
        }
      }
    }

    debug!(
      "Walked {} ({} files) in {}ms",
      root.display(),
      outcome.reports.len(),
      start_time.elapsed().as_millis()
    );
    Ok(outcome)
  }
}

fn abort(root: &Path, outcome: RootOutcome, cause: anyhow::Error) -> WalkError {
  WalkError {
    changed: outcome.changed,
    reports: outcome.reports,
    ..WalkError::new(root, cause)
  }
}

/// Walks one root with `config` and returns the changed files.
///
/// # Errors
///
/// Returns a [`WalkError`] if the configuration is unusable or the walk
/// fails.
pub fn walk(root: &Path, config: &RunConfig) -> Result<Vec<PathBuf>, WalkError> {
  let walker = Walker::new(config.clone()).map_err(|cause| WalkError::new(root, cause))?;
  walker.walk_root(root).map(|outcome| outcome.changed)
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;
  use crate::processor::{ComplianceResult, Mode};

  fn config(mode: Mode) -> RunConfig {
    RunConfig {
      year: "2025".to_string(),
      ..RunConfig::new("Acme Corp", mode)
    }
  }

  #[test]
  fn test_walk_order_is_sorted() {
    let dir = tempdir().unwrap();
    for name in ["c.go", "a.go", "b.py"] {
      std::fs::write(dir.path().join(name), "x\n").unwrap();
    }

    let changed = walk(dir.path(), &config(Mode::Check)).unwrap();
    let names: Vec<_> = changed
      .iter()
      .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
      .collect();
    assert_eq!(names, vec!["a.go", "b.py", "c.go"]);
  }

  #[test]
  fn test_reports_cover_compliant_files() {
    let dir = tempdir().unwrap();
    std::fs::write(
      dir.path().join("ok.go"),
      "// Copyright 2020 Acme Corp\n// SPDX-License-Identifier: Apache-2.0\n\nx\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("bad.go"), "x\n").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "x\n").unwrap();

    let walker = Walker::new(config(Mode::Check)).unwrap();
    let outcome = walker.walk_root(dir.path()).unwrap();
    assert_eq!(outcome.changed, vec![dir.path().join("bad.go")]);
    assert_eq!(outcome.reports.len(), 2);
    assert_eq!(outcome.reports[1].status, ComplianceResult::Compliant);
  }

  #[test]
  fn test_missing_root_is_an_error() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("nope");
    let err = walk(&root, &config(Mode::Check)).unwrap_err();
    assert_eq!(err.root, root);
    assert!(err.to_string().contains("Failed to traverse"));
  }

  #[test]
  fn test_failed_root_does_not_stop_others() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good");
    std::fs::create_dir(&good).unwrap();
    std::fs::write(good.join("a.rb"), "puts 1\n").unwrap();

    let walker = Walker::new(config(Mode::Check)).unwrap();
    let aggregate = walker.run(&[dir.path().join("missing"), good.clone()]);
    assert!(!aggregate.is_success());
    assert_eq!(aggregate.errors.len(), 1);
    assert_eq!(aggregate.changed, vec![good.join("a.rb")]);
  }

  #[test]
  fn test_multiline_holder_rejected() {
    let err = Walker::new(RunConfig::new("Acme\nCorp", Mode::Fix)).err().unwrap();
    assert!(err.to_string().contains("single line"));
  }

  #[test]
  fn test_invalid_ignore_pattern_rejected() {
    let cfg = RunConfig {
      ignore_patterns: vec!["[".to_string()],
      ..config(Mode::Check)
    };
    assert!(Walker::new(cfg).is_err());
  }
}
