//! # File I/O Module
//!
//! This module provides file reading and writing utilities for the processor.
//! It encapsulates synchronous file operations.

use std::fs::File;
use std::io::{BufRead as _, BufReader, Read as _};
use std::path::Path;

use anyhow::{Context, Result};

/// Maximum number of bytes read for a single header line.
/// Header lines are short; anything longer cannot be a valid header.
pub const LINE_READ_LIMIT: u64 = 8 * 1024;

/// File I/O operations for the processor.
///
/// This struct provides static methods for reading and writing files.
pub struct FileIO;

impl FileIO {
  /// Reads up to `count` lines from the start of a file, skipping blank lines
  /// that precede the first non-blank one.
  ///
  /// Once a non-blank line has been captured, blank lines count like any
  /// other. Line terminators (`\n`, optionally preceded by `\r`) are removed.
  /// Bytes that are not valid UTF-8 are replaced rather than treated as an
  /// error, so binary content simply fails header validation.
  ///
  /// A line longer than [`LINE_READ_LIMIT`] bytes is captured truncated and
  /// ends the read, so a single-line bundle is never read in full.
  ///
  /// # Parameters
  ///
  /// * `path` - Path to the file to read
  /// * `count` - Maximum number of lines to capture
  ///
  /// # Returns
  ///
  /// The captured lines, fewer than `count` if the file ends first.
  pub fn read_leading_lines(path: &Path, count: usize) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut lines = Vec::with_capacity(count);
    let mut buf = Vec::new();
    while lines.len() < count {
      buf.clear();
      let read = (&mut reader)
        .take(LINE_READ_LIMIT)
        .read_until(b'\n', &mut buf)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
      if read == 0 {
        break;
      }

      if buf.last() == Some(&b'\n') {
        buf.pop();
      } else if read as u64 == LINE_READ_LIMIT {
        lines.push(String::from_utf8_lossy(&buf).into_owned());
        break;
      }
      if buf.last() == Some(&b'\r') {
        buf.pop();
      }

      let line = String::from_utf8_lossy(&buf).into_owned();
      if lines.is_empty() && line.trim().is_empty() {
        continue;
      }
      lines.push(line);
    }

    Ok(lines)
  }

  /// Read full file content as raw bytes.
  pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Write file content.
  ///
  /// Existing files keep their permissions.
  pub fn write_bytes(path: &Path, content: &[u8]) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }
}
