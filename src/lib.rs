//! # licenser
//!
//! A tool that enforces short SPDX copyright headers in source files by
//! scanning directories recursively.
//!
//! Every recognized source file must begin with a two-line header naming the
//! copyright holder and the `Apache-2.0` license identifier, followed by one
//! blank line. In check-only mode `licenser` lists the files that do not; in
//! fix mode it inserts the header in place and never touches a file whose
//! header is already valid.
//!
//! ## Features
//!
//! * Recursive, deterministic traversal of any number of roots
//! * Comment prefix chosen per file extension (`//` or `#`), extendable from
//!   `.licenser.toml`
//! * Exact validation of the holder and license identifier, with the reason
//!   for each rejection
//! * Glob ignore patterns, a diff preview of the insertion, and a JSON report
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use licenser::processor::{Mode, RunConfig};
//! use licenser::walker::Walker;
//!
//! fn main() -> anyhow::Result<()> {
//!   let config = RunConfig {
//!     year: "2025".to_string(),
//!     ..RunConfig::new("Acme Corp", Mode::Check)
//!   };
//!
//!   let walker = Walker::new(config)?;
//!   let aggregate = walker.run(&[PathBuf::from("src")]);
//!
//!   for path in &aggregate.changed {
//!     println!("missing or invalid header: {}", path.display());
//!   }
//!
//!   Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! * [`classifier`] - Extension table and comment prefixes
//! * [`header`] - Header rendering and validation
//! * [`processor`] - Per-file verification and repair
//! * [`walker`] - Tree traversal and aggregation
//! * [`logging`] - Logging utilities for verbose output

pub mod classifier;
pub mod cli;
pub mod config;
pub mod diff;
pub mod file_filter;
pub mod header;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
pub mod walker;
