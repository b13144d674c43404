//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing; the whole tool is a single command.

mod check;

pub use check::{CheckArgs, EXIT_ERROR, EXIT_NON_COMPLIANT, EXIT_OK, run_check};
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{CommandFactory, Parser};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("LICENSER_GIT_HASH"),
  " ",
  env!("LICENSER_GIT_DATE"),
  ")"
);

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  name = "licenser",
  author,
  version,
  long_version = LONG_VERSION,
  about,
  long_about = "Enforces short SPDX license headers in source files.

Each recognized source file must start with a two-line header:
  // Copyright <YEAR> <HOLDER>
  // SPDX-License-Identifier: Apache-2.0
followed by one blank line. Files using `#` comments (.py, .rb) use `#` as the prefix.",
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Check license compliance under the current directory
  licenser --check-only -c \"The Example Authors\" .

  # Add missing headers in place
  licenser -c \"The Example Authors\" src/ tools/

  # Show the header each offending file would get
  licenser --check-only --show-diff -c \"The Example Authors\" .

  # Skip generated code and write a JSON report for CI
  licenser --check-only -c \"The Example Authors\" --ignore \"**/gen/**\" --report-json report.json .

Exit codes: 0 no issues, 1 non-compliant files found (check mode), 2 error.
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub check_args: CheckArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Full help text, printed when the tool is invoked without enough input.
  pub fn usage() -> String {
    Self::command().render_long_help().to_string()
  }
}
