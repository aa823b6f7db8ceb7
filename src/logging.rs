//! Tracing subscriber initialisation.
//!
//! Library modules only emit events; the binary calls [`init_logging`] once.
//!
//! | Flag        | Filter level |
//! |-------------|--------------|
//! | (none)      | WARN         |
//! | `--verbose` | DEBUG        |
//!
//! `RUST_LOG` overrides both when set.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber, writing to stderr.
///
/// A second call in the same process is a no-op.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("aver={}", derive_level(verbose))));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn derive_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}
