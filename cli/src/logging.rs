//! Logging initialization.
//!
//! Reads `RUST_LOG` (level) and `LOG_FILE` (path) from env (e.g. via .env). When `LOG_FILE` is
//! set, logs are appended to that file as plain text; otherwise they go to stderr so stdout
//! stays clean for replies and JSON output.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

const DEFAULT_FILTER: &str = "info,hyper_util=off";
const VERBOSE_FILTER: &str = "info,honeypot=debug,serve=debug,cli=debug,hyper_util=off";

/// Initializes tracing.
///
/// - **RUST_LOG**: filter, e.g. `info`, `honeypot=debug`. Default: `info`, or debug for this
///   workspace's crates when `verbose` is set.
/// - **LOG_FILE**: when set, logs are appended to this file (no ANSI).
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));

    if let Ok(path) = std::env::var("LOG_FILE") {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_filter(filter);
        tracing_subscriber::registry().with(file_layer).try_init()?;
        tracing::info!(path = %path, "honeypot logging to file");
    } else {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(filter);
        tracing_subscriber::registry().with(stderr_layer).try_init()?;
    }
    Ok(())
}
