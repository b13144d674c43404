//! # File Filter Module
//!
//! This module contains components for deciding which walked files are
//! handed to the processor: ignore patterns and the source-extension table.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use tracing::trace;

use crate::classifier::Classifier;

/// Result of a file filtering operation.
#[derive(Debug)]
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter: Send + Sync {
  /// Determines whether a file should be processed.
  fn should_process(&self, path: &Path) -> FilterResult;
}

/// Filter that excludes files matching glob ignore patterns.
///
/// A pattern is tried against the walked path (with and without a leading
/// `./`) and against the path relative to the walk root, so `vendor/**`
/// works whether the root was given as `.`, `src` or an absolute path.
#[derive(Debug, Clone, Default)]
pub struct IgnoreFilter {
  patterns: Vec<Pattern>,
  root: Option<PathBuf>,
}

impl IgnoreFilter {
  /// Compiles the given glob patterns.
  ///
  /// # Errors
  ///
  /// Returns an error naming the first pattern that is not a valid glob.
  pub fn from_patterns(patterns: &[String]) -> Result<Self> {
    let patterns = patterns
      .iter()
      .map(|p| Pattern::new(p).with_context(|| format!("Invalid ignore pattern: {p}")))
      .collect::<Result<Vec<_>>>()?;
    Ok(Self { patterns, root: None })
  }

  /// Copy of this filter that also matches paths relative to `root`.
  pub fn with_root(&self, root: &Path) -> Self {
    Self {
      patterns: self.patterns.clone(),
      root: Some(root.to_path_buf()),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }

  fn is_ignored(&self, path: &Path) -> bool {
    if self.patterns.is_empty() {
      return false;
    }

    let mut candidates = Vec::with_capacity(3);
    let path_str = path.to_string_lossy().replace('\\', "/");
    match path_str.strip_prefix("./") {
      Some(stripped) => candidates.push(stripped.to_string()),
      None => candidates.push(format!("./{path_str}")),
    }
    candidates.push(path_str);

    if let Some(root) = &self.root
      && let Ok(relative) = path.strip_prefix(root)
      && !relative.as_os_str().is_empty()
    {
      candidates.push(relative.to_string_lossy().replace('\\', "/"));
    }

    self
      .patterns
      .iter()
      .any(|pattern| candidates.iter().any(|candidate| pattern.matches(candidate)))
  }
}

impl FileFilter for IgnoreFilter {
  fn should_process(&self, path: &Path) -> FilterResult {
    if self.is_ignored(path) {
      trace!("Skipping: {} (matches ignore pattern)", path.display());
      FilterResult::skip("Matches ignore pattern")
    } else {
      FilterResult::process()
    }
  }
}

/// Filter that keeps only files with a recognized source extension.
pub struct SourceFilter<'a> {
  classifier: &'a Classifier,
}

impl<'a> SourceFilter<'a> {
  pub const fn new(classifier: &'a Classifier) -> Self {
    Self { classifier }
  }
}

impl FileFilter for SourceFilter<'_> {
  fn should_process(&self, path: &Path) -> FilterResult {
    if self.classifier.is_source_file(path) {
      FilterResult::process()
    } else {
      FilterResult::skip("Unrecognized extension")
    }
  }
}

/// Filter that combines multiple filters.
pub struct CompositeFilter<'a> {
  filters: Vec<Box<dyn FileFilter + 'a>>,
}

impl<'a> CompositeFilter<'a> {
  /// Creates a new CompositeFilter with the given filters.
  pub fn new(filters: Vec<Box<dyn FileFilter + 'a>>) -> Self {
    Self { filters }
  }

  /// Adds a filter to this CompositeFilter.
  pub fn add_filter(&mut self, filter: Box<dyn FileFilter + 'a>) {
    self.filters.push(filter);
  }
}

impl FileFilter for CompositeFilter<'_> {
  fn should_process(&self, path: &Path) -> FilterResult {
    for filter in &self.filters {
      let result = filter.should_process(path);
      if !result.should_process {
        return result;
      }
    }
    FilterResult::process()
  }
}

/// Builds the filter chain used for one walk root: ignore patterns first,
/// then the source-extension table.
pub fn create_walk_filter<'a>(ignore: &IgnoreFilter, root: &Path, classifier: &'a Classifier) -> CompositeFilter<'a> {
  let mut filters: Vec<Box<dyn FileFilter + 'a>> = Vec::with_capacity(2);
  if !ignore.is_empty() {
    filters.push(Box::new(ignore.with_root(root)));
  }
  filters.push(Box::new(SourceFilter::new(classifier)));
  CompositeFilter::new(filters)
}
