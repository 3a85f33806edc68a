//! Tracing setup: human-readable stderr output plus a daily log file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, fmt};

pub const DEFAULT_FILTER: &str = "nutriscan=info";
const LOG_FILE_PREFIX: &str = "nutriscan.log";

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides [`DEFAULT_FILTER`]. When the log directory cannot be
/// created only stderr logging is installed. The returned guard must be
/// held until exit so buffered file output is flushed.
pub fn init(logs_dir: &Path) -> Option<WorkerGuard> {
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match std::fs::create_dir_all(logs_dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        Err(err) => {
            eprintln!(
                "Warning: cannot create log directory {}: {}",
                logs_dir.display(),
                err
            );
            (None, None)
        }
    };

    let registry = tracing_subscriber::registry()
        .with(env_filter())
        .with(console_layer)
        .with(file_layer);

    if let Err(err) = registry.try_init() {
        eprintln!("Warning: logging already initialized: {}", err);
    }

    guard
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
