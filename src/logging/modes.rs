use std::sync::atomic::{AtomicU8, Ordering};

use clap::ValueEnum;
use tracing::debug;

/// Global output mode, `Normal` until set otherwise.
static OUTPUT_MODE: AtomicU8 = AtomicU8::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
  Normal = 0,
  Quiet = 1,
  Verbose = 2,
}

impl OutputMode {
  /// Convert from u8 to OutputMode
  const fn from_u8(value: u8) -> Self {
    match value {
      1 => Self::Quiet,
      2 => Self::Verbose,
      _ => Self::Normal,
    }
  }
}

/// Enum representing the color mode options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
  /// Automatically determine whether to use colors based on TTY detection
  #[default]
  Auto,
  /// Never use colors
  Never,
  /// Always use colors
  Always,
}

impl ColorMode {
  /// Applies the mode to all owo-colors output of the process.
  pub fn apply(self) {
    match self {
      Self::Auto => owo_colors::unset_override(),
      Self::Never => owo_colors::set_override(false),
      Self::Always => owo_colors::set_override(true),
    }
  }
}

/// Sets the global verbose logging flag.
///
/// When verbose logging is enabled, the [`verbose_log!`](crate::verbose_log)
/// macro will output messages to stderr.
pub fn set_verbose() {
  OUTPUT_MODE.store(OutputMode::Verbose as u8, Ordering::SeqCst);
}

/// Sets the global quiet flag, suppressing [`info_log!`](crate::info_log).
pub fn set_quiet() {
  OUTPUT_MODE.store(OutputMode::Quiet as u8, Ordering::SeqCst);
}

/// Checks if verbose logging is currently enabled.
pub fn is_verbose() -> bool {
  matches!(OutputMode::from_u8(OUTPUT_MODE.load(Ordering::SeqCst)), OutputMode::Verbose)
}

/// Checks if quiet mode is currently enabled.
pub fn is_quiet() -> bool {
  matches!(OutputMode::from_u8(OUTPUT_MODE.load(Ordering::SeqCst)), OutputMode::Quiet)
}

/// Level used for the tracing filter when `RUST_LOG` is not set.
pub const fn tracing_level(quiet: bool, verbose: u8) -> &'static str {
  if quiet {
    return "error";
  }
  match verbose {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  }
}

/// Initialize tracing on stderr from the `-q`/`-v` flags.
///
/// `RUST_LOG` takes precedence over the flags when set. Calling this more
/// than once is harmless; only the first subscriber is installed.
pub fn init_tracing(quiet: bool, verbose: u8) {
  use tracing_subscriber::{EnvFilter, fmt, prelude::*};

  let level = tracing_level(quiet, verbose);
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

  let _ = tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
    .with(filter)
    .try_init();

  debug!("Logging initialized at level: {}", level);
}
