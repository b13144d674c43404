//! # Classifier Module
//!
//! Decides which files take part in a run and which line-comment prefix their
//! header uses.
//!
//! The mapping is a plain table from file extension to prefix. The built-in
//! entries cover the languages the tool has always handled; the configuration
//! file can add or override entries without any change to the walk logic.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use tracing::trace;

/// Prefix used when a path has no entry in the table.
pub const DEFAULT_PREFIX: &str = "//";

/// Built-in extension table. Extensions include the leading dot and are
/// matched case-sensitively.
const BUILTIN_PREFIXES: &[(&str, &str)] = &[
  (".go", "//"),
  (".php", "//"),
  (".js", "//"),
  (".jsx", "//"),
  (".ts", "//"),
  (".tsx", "//"),
  (".java", "//"),
  (".bal", "//"),
  (".py", "#"),
  (".rb", "#"),
];

/// Error returned when an extension override is malformed.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
  /// The override prefix was empty or spanned several lines.
  #[error("Invalid comment prefix for '{extension}': {message}")]
  InvalidPrefix { extension: String, message: String },
}

/// Extension to comment-prefix table.
#[derive(Debug, Clone)]
pub struct Classifier {
  prefixes: HashMap<String, String>,
}

impl Default for Classifier {
  fn default() -> Self {
    Self::builtin()
  }
}

impl Classifier {
  /// Classifier holding only the built-in table.
  pub fn builtin() -> Self {
    let prefixes = BUILTIN_PREFIXES
      .iter()
      .map(|(ext, prefix)| ((*ext).to_string(), (*prefix).to_string()))
      .collect();
    Self { prefixes }
  }

  /// Adds or replaces the prefix for an extension.
  ///
  /// `extension` may be given with or without its leading dot.
  ///
  /// # Errors
  ///
  /// Returns [`ClassifierError::InvalidPrefix`] if the prefix is empty or
  /// contains a line break, since the header grammar is strictly line based.
  pub fn with_override(mut self, extension: &str, prefix: &str) -> Result<Self, ClassifierError> {
    check_prefix(extension, prefix)?;

    let key = if extension.starts_with('.') {
      extension.to_string()
    } else {
      format!(".{extension}")
    };
    self.prefixes.insert(key, prefix.to_string());
    Ok(self)
  }

  /// Returns `true` if the path's extension has an entry in the table.
  pub fn is_source_file(&self, path: &Path) -> bool {
    let known = extension_of(path).is_some_and(|ext| self.prefixes.contains_key(ext.as_ref()));
    if !known {
      trace!("Skipping: {} (unrecognized extension)", path.display());
    }
    known
  }

  /// Returns the line-comment prefix for the path, falling back to
  /// [`DEFAULT_PREFIX`] for extensions outside the table.
  pub fn comment_prefix(&self, path: &Path) -> &str {
    extension_of(path)
      .and_then(|ext| self.prefixes.get(ext.as_ref()))
      .map_or(DEFAULT_PREFIX, String::as_str)
  }

  /// All distinct prefixes the table can produce.
  pub fn prefixes(&self) -> impl Iterator<Item = &str> {
    let mut seen: Vec<&str> = self.prefixes.values().map(String::as_str).collect();
    seen.push(DEFAULT_PREFIX);
    seen.sort_unstable();
    seen.dedup();
    seen.into_iter()
  }
}

/// Checks that `prefix` can start a header line.
///
/// # Errors
///
/// Returns [`ClassifierError::InvalidPrefix`] if the prefix is blank or
/// contains a line break.
pub fn check_prefix(extension: &str, prefix: &str) -> Result<(), ClassifierError> {
  let message = if prefix.trim().is_empty() {
    "prefix cannot be empty"
  } else if prefix.contains(['\n', '\r']) {
    "prefix must fit on a single line"
  } else {
    return Ok(());
  };
  Err(ClassifierError::InvalidPrefix {
    extension: extension.to_string(),
    message: message.to_string(),
  })
}

/// Extension of the final path component, starting at its last dot.
///
/// Unlike [`Path::extension`], a dotfile such as `.py` counts as having the
/// extension `.py`. Names that are not valid UTF-8 are decoded lossily; the
/// table only holds ASCII extensions, so the suffix after the last dot still
/// matches.
fn extension_of(path: &Path) -> Option<Cow<'_, str>> {
  let name = path.file_name()?.to_string_lossy();
  let idx = name.rfind('.')?;
  Some(match name {
    Cow::Borrowed(name) => Cow::Borrowed(&name[idx..]),
    Cow::Owned(name) => Cow::Owned(name[idx..].to_string()),
  })
}
