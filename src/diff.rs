//! # Diff Module
//!
//! Renders the change a header insertion would make, for check-only runs with
//! `--show-diff`.

use std::fmt::Write as _;
use std::path::Path;

use similar::{ChangeTag, TextDiff};

/// Number of original lines shown after the inserted header.
const CONTEXT_LINES: usize = 3;

/// Manages diff creation and rendering for header insertions.
#[derive(Debug, Clone, Default)]
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,
}

impl DiffManager {
  pub const fn new(show_diff: bool) -> Self {
    Self { show_diff }
  }

  /// Builds the diff text between the original and the updated content.
  ///
  /// Only the start of the file is rendered: unchanged lines past the first
  /// [`CONTEXT_LINES`] are elided, since an insertion never touches them.
  pub fn render(&self, path: &Path, original: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(original, new);

    let mut rendered = String::new();
    let _ = writeln!(rendered, "Diff for {}:", path.display());

    let mut trailing_equal = 0;
    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };

      if change.tag() == ChangeTag::Equal {
        trailing_equal += 1;
        if trailing_equal > CONTEXT_LINES {
          continue;
        }
      } else {
        trailing_equal = 0;
      }

      rendered.push_str(sign);
      rendered.push_str(change.as_str().unwrap_or_default());
      if change.missing_newline() {
        rendered.push('\n');
      }
    }

    if trailing_equal > CONTEXT_LINES {
      let _ = writeln!(rendered, " ... ({} unchanged lines)", trailing_equal - CONTEXT_LINES);
    }

    rendered
  }

  /// Prints the diff to stderr if enabled.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) {
    if self.show_diff {
      eprintln!("{}", self.render(path, original, new));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render_insertion() {
    let manager = DiffManager::new(true);
    let rendered = manager.render(
      Path::new("a.go"),
      "package main\n",
      "// Copyright 2025 Acme\n// SPDX-License-Identifier: Apache-2.0\n\npackage main\n",
    );

    assert!(rendered.starts_with("Diff for a.go:\n"));
    assert!(rendered.contains("+// Copyright 2025 Acme\n"));
    assert!(rendered.contains("+// SPDX-License-Identifier: Apache-2.0\n"));
    assert!(rendered.contains(" package main\n"));
    assert!(!rendered.contains("unchanged lines"));
  }

  #[test]
  fn test_render_elides_long_tail() {
    let manager = DiffManager::new(true);
    let original = "a\nb\nc\nd\ne\nf\n";
    let new = format!("# header\n\n{original}");
    let rendered = manager.render(Path::new("x.py"), original, &new);

    assert!(rendered.contains(" c\n"));
    assert!(!rendered.contains(" d\n"));
    assert!(rendered.contains("(3 unchanged lines)"));
  }
}
