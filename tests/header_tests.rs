mod common;

use anyhow::Result;
use common::{HOLDER, licensed, write_file};
use licenser::header::{HeaderGrammar, HeaderStatus, License, Violation, build_header, validate_header};
use tempfile::tempdir;

#[test]
fn test_validate_written_header() -> Result<()> {
  let dir = tempdir()?;
  let go = write_file(dir.path(), "main.go", &licensed("//", "package main\n"))?;
  let py = write_file(dir.path(), "tool.py", &licensed("#", "print(1)\n"))?;

  assert!(validate_header(&go, "//", HOLDER)?);
  assert!(validate_header(&py, "#", HOLDER)?);
  assert!(!validate_header(&go, "#", HOLDER)?);
  Ok(())
}

#[test]
fn test_leading_blank_lines_are_skipped() -> Result<()> {
  let dir = tempdir()?;
  let path = write_file(dir.path(), "a.ts", &format!("\n\n   \n{}", licensed("//", "export {}\n")))?;
  assert!(validate_header(&path, "//", HOLDER)?);
  Ok(())
}

#[test]
fn test_crlf_header_is_valid() -> Result<()> {
  let dir = tempdir()?;
  let content = licensed("//", "package main\n").replace('\n', "\r\n");
  let path = write_file(dir.path(), "a.go", &content)?;
  assert!(validate_header(&path, "//", HOLDER)?);
  Ok(())
}

#[test]
fn test_detection_precision() -> Result<()> {
  let dir = tempdir()?;

  let wrong_holder = write_file(
    dir.path(),
    "holder.go",
    "// Copyright 2025 Other Org\n// SPDX-License-Identifier: Apache-2.0\n\nx\n",
  )?;
  let wrong_license = write_file(
    dir.path(),
    "license.go",
    "// Copyright 2025 Acme Corp\n// SPDX-License-Identifier: MIT\n\nx\n",
  )?;
  let no_blank = write_file(
    dir.path(),
    "blank.go",
    "// Copyright 2025 Acme Corp\n// SPDX-License-Identifier: Apache-2.0\nx\n",
  )?;

  assert!(!validate_header(&wrong_holder, "//", HOLDER)?);
  assert!(!validate_header(&wrong_license, "//", HOLDER)?);
  assert!(!validate_header(&no_blank, "//", HOLDER)?);
  Ok(())
}

#[test]
fn test_inspect_names_violation() -> Result<()> {
  let dir = tempdir()?;
  let grammar = HeaderGrammar::new("#", License::Apache)?;

  let short = write_file(dir.path(), "short.rb", "# Copyright 2025 Acme Corp\n")?;
  assert_eq!(
    grammar.inspect(&short, HOLDER)?,
    HeaderStatus::Invalid(Violation::TooShort { lines: 1 })
  );

  let empty = write_file(dir.path(), "empty.rb", "")?;
  assert_eq!(
    grammar.inspect(&empty, HOLDER)?,
    HeaderStatus::Invalid(Violation::TooShort { lines: 0 })
  );

  let old = write_file(
    dir.path(),
    "old.rb",
    "# Copyright 1970 Acme Corp\n# SPDX-License-Identifier: Apache-2.0\n\n",
  )?;
  assert_eq!(grammar.inspect(&old, HOLDER)?, HeaderStatus::Valid);
  Ok(())
}

#[test]
fn test_binary_content_is_not_an_error() -> Result<()> {
  let dir = tempdir()?;
  let path = dir.path().join("blob.js");
  std::fs::write(&path, [0u8, 159, 146, 150, b'\n', 0xFF, b'\n', b'\n'])?;
  assert!(!validate_header(&path, "//", HOLDER)?);
  Ok(())
}

#[test]
fn test_unreadable_path_is_an_error() {
  let dir = tempdir().unwrap();
  assert!(validate_header(&dir.path().join("missing.go"), "//", HOLDER).is_err());
  // A directory cannot be read as a file either
  assert!(validate_header(dir.path(), "//", HOLDER).is_err());
}

#[test]
fn test_build_header_shape() {
  let header = build_header("2025", "The Example Authors", "#");
  let lines: Vec<_> = header.lines().collect();
  assert_eq!(lines.len(), 2);
  assert_eq!(lines[0], "# Copyright 2025 The Example Authors");
  assert_eq!(lines[1], "# SPDX-License-Identifier: Apache-2.0");
  assert!(!header.ends_with('\n'));
}
