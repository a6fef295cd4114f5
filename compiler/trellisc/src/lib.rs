//! Trellis command-line driver.
//!
//! Loads a JSON template (and optional JSON globals), runs it through
//! [`trellis_eval::Engine`] and prints the result as JSON. Argument parsing
//! lives in [`args`], JSON conversion in [`json`], and the command handlers
//! in [`commands`].

pub mod args;
pub mod commands;
pub mod json;

use std::sync::Once;

pub use args::{parse_args, Command, EvalOptions, Input, UsageError};
pub use commands::{run, CliError};

pub const USAGE: &str = "\
Trellis structured template evaluator

Usage: trellis <command> [options]

Commands:
  eval <template.json|->   Evaluate a template and print the result
  check <template.json>    Evaluate a template and report success only
  help                     Show this help message
  version                  Show version information

Options:
  --globals=<file.json>    Read global variables from a JSON object
  --set <name>=<literal>   Bind a global from an expression literal (repeatable)
  --shallow                Evaluate only the top level of the template
  --compact                Print JSON on a single line

Examples:
  trellis eval config.json
  trellis eval - --set env='prod' < config.json
  trellis eval config.json --globals=vars.json --compact
  trellis check config.json

Set RUST_LOG (e.g. RUST_LOG=trellis_eval=debug) to trace evaluation.";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
