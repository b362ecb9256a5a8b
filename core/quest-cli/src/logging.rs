//! Logging setup for the quest binary.
//!
//! Logs always go to a daily-rolling file under `<root>/logs`. Setting
//! `QUEST_DEBUG_LOG=1` also mirrors debug-level output to stderr.
//! `RUST_LOG` overrides the file filter (default `info`).

use std::env;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_FILE_PREFIX: &str = "quest.log";

/// Installs the global subscriber. Keep the returned guard alive until exit so
/// buffered file output is flushed.
pub fn init(logs_dir: &Path) -> Option<WorkerGuard> {
    let debug_enabled = debug_enabled();

    let stderr_layer = debug_enabled.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::new("debug"))
    });

    let (file_layer, guard) = if fs_err::create_dir_all(logs_dir).is_ok() {
        let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let filter = if debug_enabled {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };
        let layer = fmt::layer()
            .with_ansi(false)
            .with_writer(writer)
            .with_filter(filter);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    // A second init (tests) is not an error worth surfacing.
    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    guard
}

fn debug_enabled() -> bool {
    env::var("QUEST_DEBUG_LOG")
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "yes" | "YES")
}
