//! Tracing setup

use std::path::Path;

use custom_domain_app::LogFormat;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "provisioner.log";

/// Install the global subscriber.
///
/// Filter comes from `RUST_LOG` (default `info`). `log` records from the library crates
/// are captured as well. With `log_dir` set, output is also written to a daily rolling file;
/// keep the returned guard alive until shutdown so it gets flushed.
pub fn init(format: LogFormat, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_writer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json())
            .with(file_writer.map(|w| fmt::layer().json().with_writer(w).with_ansi(false)))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer())
            .with(file_writer.map(|w| fmt::layer().with_writer(w).with_ansi(false)))
            .init(),
    }

    guard
}
