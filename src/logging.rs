//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix with the plan or JSON on stdout.
//! `RUST_LOG` overrides the level chosen from the command-line flags.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter for the given verbosity.
pub fn default_filter(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "pdfcombine=debug,warn"
    } else if quiet {
        "pdfcombine=error"
    } else {
        "pdfcombine=warn"
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logger(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, quiet)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
