// src/logging.rs
// =============================================================================
// Diagnostics setup.
//
// Reports (tables, JSON) go to stdout with println!. Everything else -
// which README URL was tried, why a fetch failed - goes through `tracing`
// to stderr, so `--json` output can be piped safely.
//
// The level comes from RUST_LOG when set; otherwise `info`, or `debug`
// with --verbose.
// =============================================================================

use tracing_subscriber::EnvFilter;

/// Picks the default filter directive for the given verbosity
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "catalog_scout=debug,info"
    } else {
        "info"
    }
}

/// Installs the global tracing subscriber
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // try_init: a second call (e.g. from tests) is not an error worth dying for
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
