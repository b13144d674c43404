//! # licenser
//!
//! Command-line entry point. All logic lives in the library crate.

use licenser::cli::{Cli, EXIT_ERROR, run_check};
use licenser::output::symbols;
use owo_colors::{OwoColorize, Stream};

fn main() {
  let cli = Cli::parse_args();

  let code = match run_check(cli.check_args) {
    Ok(code) => code,
    Err(err) => {
      eprintln!(
        "{} Error: {err:#}",
        symbols::FAILURE.if_supports_color(Stream::Stderr, |s| s.red())
      );
      EXIT_ERROR
    }
  };

  std::process::exit(code);
}
