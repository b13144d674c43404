#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use licenser::processor::{Mode, RunConfig};

pub const HOLDER: &str = "Acme Corp";
pub const YEAR: &str = "2025";

/// Writes `content` to `dir/relative`, creating parent directories.
pub fn write_file(dir: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = dir.join(relative);
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

/// Reads a file written by a test.
pub fn read_file(path: &Path) -> Result<String> {
  std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// The header the tool writes for `prefix` with the test holder and year.
pub fn header(prefix: &str) -> String {
  format!("{prefix} Copyright {YEAR} {HOLDER}\n{prefix} SPDX-License-Identifier: Apache-2.0")
}

/// Content of a compliant file with the given prefix and body.
pub fn licensed(prefix: &str, body: &str) -> String {
  format!("{}\n\n{body}", header(prefix))
}

/// Run configuration with the test holder and a fixed year.
pub fn run_config(mode: Mode) -> RunConfig {
  RunConfig {
    year: YEAR.to_string(),
    ..RunConfig::new(HOLDER, mode)
  }
}

/// The licenser binary, run inside `dir` with config discovery disabled and
/// colors off.
pub fn licenser(dir: &Path) -> Result<Command> {
  let mut cmd = Command::cargo_bin("licenser")?;
  cmd
    .current_dir(dir)
    .env_remove("LICENSER_CONFIG")
    .env_remove("RUST_LOG")
    .arg("--colors=never");
  Ok(cmd)
}
