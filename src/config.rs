//! # Configuration Module
//!
//! This module provides configuration support for licenser, allowing users to
//! set a default copyright holder, shared ignore patterns, and extra or
//! overridden comment prefixes per file extension.
//!
//! Configuration can be specified in a `.licenser.toml` file or via the
//! `LICENSER_CONFIG` environment variable.
//!
//! ```toml
//! holder = "Acme Corp"
//! ignore = ["vendor/**", "*.pb.go"]
//!
//! [comment-prefixes]
//! sh = "#"
//! sql = "--"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::classifier::{Classifier, ClassifierError, check_prefix};
use crate::header::check_holder;
use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".licenser.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "LICENSER_CONFIG";

/// Main configuration struct for licenser.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
  /// Copyright holder used when `--copyright` is not given.
  #[serde(default)]
  pub holder: Option<String>,

  /// Ignore globs merged with the ones given on the command line.
  #[serde(default)]
  pub ignore: Vec<String>,

  /// Comment prefixes for file extensions.
  /// Keys are file extensions without the leading dot (e.g., "sh", "sql").
  #[serde(default, rename = "comment-prefixes")]
  pub comment_prefixes: HashMap<String, String>,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A comment-prefixes key is not a usable extension.
  #[error("Invalid comment prefix extension '{extension}': {message}")]
  InvalidCommentPrefix { extension: String, message: String },

  /// A comment prefix value is rejected by the classifier.
  #[error(transparent)]
  InvalidPrefix(#[from] ClassifierError),

  /// The configured holder cannot be rendered into a header.
  #[error("Invalid holder {holder:?}: {message}")]
  InvalidHolder { holder: String, message: &'static str },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read,
  /// parsed, or validated.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;

    verbose_log!("Loaded {} comment prefix override(s)", config.comment_prefixes.len());

    Ok(config)
  }

  /// Validate the configuration.
  ///
  /// Checks that:
  /// - The holder fits on one line
  /// - Extension names don't include the leading dot
  /// - All prefixes are accepted by [`check_prefix`]
  fn validate(&self) -> Result<(), ConfigError> {
    if let Some(holder) = &self.holder {
      check_holder(holder).map_err(|message| ConfigError::InvalidHolder {
        holder: holder.clone(),
        message,
      })?;
    }

    let mut extensions: Vec<_> = self.comment_prefixes.keys().collect();
    extensions.sort();

    for ext in extensions {
      let prefix = &self.comment_prefixes[ext];
      let invalid = |message: &str| ConfigError::InvalidCommentPrefix {
        extension: ext.clone(),
        message: message.to_string(),
      };

      if ext.is_empty() {
        return Err(invalid("extension cannot be empty"));
      }
      if ext.starts_with('.') {
        return Err(invalid("extension should not include leading dot"));
      }
      check_prefix(ext, prefix)?;
    }

    Ok(())
  }

  /// Extends `classifier` with the configured comment prefixes.
  ///
  /// # Errors
  ///
  /// Returns an error if the classifier rejects a prefix.
  pub fn apply_to(&self, classifier: Classifier) -> Result<Classifier> {
    self
      .comment_prefixes
      .iter()
      .try_fold(classifier, |classifier, (ext, prefix)| {
        classifier
          .with_override(ext, prefix)
          .with_context(|| format!("Failed to apply comment prefix for '{ext}'"))
      })
  }
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `LICENSER_CONFIG` environment variable
/// 3. `.licenser.toml` in `dir`
///
/// # Returns
///
/// The path to the configuration file, or `None` if no config file is found.
pub fn discover_config_path(explicit_path: Option<&Path>, dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR)
    && !env_path.is_empty()
  {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  let local_config = dir.join(DEFAULT_CONFIG_FILENAME);
  if local_config.exists() {
    verbose_log!("Using config: {}", local_config.display());
    return Some(local_config);
  }

  verbose_log!("No config file found");
  None
}

/// Load configuration from the discovered path.
///
/// An explicit path that cannot be read is an error; the discovered
/// locations are optional.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path from CLI flag
/// * `dir` - Directory searched for `.licenser.toml`
/// * `no_config` - If true, skip config file discovery
///
/// # Returns
///
/// The loaded configuration, or `None` if no config file is found.
pub fn load_config(explicit_path: Option<&Path>, dir: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Config file discovery disabled (--no-config)");
    return Ok(None);
  }

  match discover_config_path(explicit_path, dir) {
    Some(path) => {
      let config = Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))?;
      Ok(Some(config))
    }
    None => Ok(None),
  }
}
