//! Logging infrastructure for Video Format Converter.
//!
//! Two layers: a process-wide `tracing` subscriber (stderr, optionally a
//! daily rolling file) and a [`JobLogger`] per conversion.
//!
//! # Example
//!
//! ```no_run
//! use vfc_core::logging::{JobLogger, LogConfig};
//!
//! let logger = JobLogger::new("clip_0001", ".logs", LogConfig::default(), None).unwrap();
//!
//! logger.phase("Transcode");
//! logger.command("ffmpeg -i clip.mov -c:v h264 -y clip_0001.mp4");
//! logger.success("Conversion finished");
//! ```

mod job_logger;
mod types;

use std::path::Path;

pub use job_logger::JobLogger;
pub use types::{LogCallback, LogConfig, LogLevel};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix of the rolling application log.
const APP_LOG_PREFIX: &str = "vfc.log";

/// `RUST_LOG` if set, otherwise `default_level`.
fn env_filter(default_level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level.as_filter()))
}

/// Install a stderr subscriber. Later calls are ignored.
pub fn init_tracing(default_level: LogLevel) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init();
}

/// Initialize tracing to stderr plus a daily rolling file in `logs_dir`.
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the lifetime of the program. Falls back to stderr only when the
/// directory cannot be created.
pub fn init_tracing_with_file(default_level: LogLevel, logs_dir: &Path) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(logs_dir) {
        eprintln!(
            "Warning: cannot create log directory {}: {}",
            logs_dir.display(),
            e
        );
        init_tracing(default_level);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(logs_dir, APP_LOG_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let _ = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .try_init();

    Some(guard)
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

