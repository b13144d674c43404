//! # Logging Module
//!
//! This module provides logging utilities for the licenser tool, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - Installation of the `tracing` subscriber used for diagnostics
//!
//! Verbose logs go to stderr and info logs go to stdout, so the list of
//! offending files can be piped without noise.
//!
//! ## Example
//!
//! ```rust
//! use licenser::logging::{ColorMode, set_verbose};
//! use licenser::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! // Goes to stderr
//! verbose_log!("Processing file: {}", "main.go");
//!
//! // Goes to stdout
//! info_log!("Added license to: {}", "main.go");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose, tracing_level};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as [`eprintln!`].
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// Uses the same format string syntax as [`println!`].
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info log message, in yellow when colors are enabled.
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
