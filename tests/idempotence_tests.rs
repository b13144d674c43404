mod common;

use std::path::{Path, PathBuf};

use anyhow::Result;
use common::{HOLDER, licensed, read_file, run_config, write_file};
use licenser::header::validate_header;
use licenser::processor::Mode;
use licenser::walker::Walker;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tempfile::tempdir;

const EXTENSIONS: &[&str] = &["go", "py", "js", "rb", "ts", "java", "txt", "md"];
const DIRS: &[&str] = &["", "src", "src/inner", "lib", "lib/deep/er"];

/// Builds a random tree of files; roughly a third already carry a valid
/// header, some a wrong one, the rest none.
fn random_tree(root: &Path, rng: &mut ChaCha8Rng, count: usize) -> Result<Vec<PathBuf>> {
  let mut files = Vec::with_capacity(count);
  for i in 0..count {
    let dir = DIRS[rng.random_range(0..DIRS.len())];
    let ext = EXTENSIONS[rng.random_range(0..EXTENSIONS.len())];
    let prefix = if matches!(ext, "py" | "rb") { "#" } else { "//" };
    let relative = if dir.is_empty() {
      format!("f{i}.{ext}")
    } else {
      format!("{dir}/f{i}.{ext}")
    };

    let body: String = (0..rng.random_range(0..6))
      .map(|line| {
        if rng.random_bool(0.2) {
          "\n".to_string()
        } else {
          format!("line {line} of file {i}\n")
        }
      })
      .collect();

    let content = match rng.random_range(0..3) {
      0 => licensed(prefix, &body),
      1 => format!("{prefix} Copyright 2001 Someone Else\n{prefix} SPDX-License-Identifier: Apache-2.0\n\n{body}"),
      _ => body,
    };

    files.push(write_file(root, &relative, &content)?);
  }
  Ok(files)
}

#[test]
fn test_fix_twice_is_a_no_op() -> Result<()> {
  for seed in [7_u64, 42, 1234] {
    let dir = tempdir()?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let files = random_tree(dir.path(), &mut rng, 40)?;

    let walker = Walker::new(run_config(Mode::Fix))?;
    let roots = [dir.path().to_path_buf()];

    let first = walker.run(&roots);
    assert!(first.is_success(), "seed {seed}: {:?}", first.errors);

    let snapshot: Vec<String> = files.iter().map(|f| read_file(f)).collect::<Result<_>>()?;

    let second = walker.run(&roots);
    assert!(second.is_success());
    assert!(second.changed.is_empty(), "seed {seed}: {:?}", second.changed);

    for (file, before) in files.iter().zip(&snapshot) {
      assert_eq!(&read_file(file)?, before, "seed {seed}: {} changed", file.display());
    }
  }
  Ok(())
}

#[test]
fn test_fixed_files_validate_and_check_agrees() -> Result<()> {
  let dir = tempdir()?;
  let mut rng = ChaCha8Rng::seed_from_u64(99);
  let files = random_tree(dir.path(), &mut rng, 30)?;
  let roots = [dir.path().to_path_buf()];

  let before_check = Walker::new(run_config(Mode::Check))?.run(&roots);
  let fixed = Walker::new(run_config(Mode::Fix))?.run(&roots);
  assert_eq!(before_check.changed, fixed.changed);

  for file in &fixed.changed {
    let prefix = match file.extension().and_then(|e| e.to_str()) {
      Some("py" | "rb") => "#",
      _ => "//",
    };
    assert!(validate_header(file, prefix, HOLDER)?, "{}", file.display());
  }

  let after_check = Walker::new(run_config(Mode::Check))?.run(&roots);
  assert!(after_check.changed.is_empty());

  for file in files.iter().filter(|f| f.extension().is_some_and(|e| e == "txt" || e == "md")) {
    assert!(!fixed.changed.contains(file), "{} should be skipped", file.display());
  }
  Ok(())
}
