//! Logging setup for the chisel CLI.
//!
//! Library crates only emit `tracing` events; this module installs the one
//! subscriber, once, at program start.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified options.
///
/// The logging level is determined in this order:
/// 1. `--verbose` flag: DEBUG for chisel crates
/// 2. `--quiet` flag: errors only
/// 3. `RUST_LOG` environment variable: custom filter
/// 4. Default: INFO for chisel crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("chisel_cli=debug,chisel_transforms=debug,chisel_morph=debug")
    } else if quiet {
        EnvFilter::new("chisel_cli=error,chisel_transforms=error,chisel_morph=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("chisel_cli=info,chisel_transforms=info,chisel_morph=info")
        })
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
