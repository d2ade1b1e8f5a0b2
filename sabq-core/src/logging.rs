//! Logging setup for Sabq.
//!
//! Everything in the workspace logs through `tracing` macros. This module
//! installs the global subscriber: a console layer (text or JSON) and, when
//! [`LoggingConfig::file_path`] is set, a daily-rolling file layer written
//! through `tracing-appender`'s non-blocking worker.

use crate::config::LoggingConfig;
use crate::error::{CoreError, LoggingError};
use crate::utils;

use once_cell::sync::Lazy;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Initializes a minimal `stderr` logger filtered by `RUST_LOG` (default `info`).
///
/// Meant for tests and for the window before configuration has been loaded.
/// Calling it when a subscriber is already installed is a no-op.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

fn create_file_layer(
    log_path: &Path,
    format: &str,
) -> Result<(BoxedLayer, WorkerGuard), CoreError> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            utils::fs::ensure_dir_exists(parent)?;
        }
    }

    let file_appender = tracing_appender::rolling::daily(
        log_path.parent().unwrap_or_else(|| Path::new(".")),
        log_path.file_name().unwrap_or_else(|| std::ffi::OsStr::new("sabq.log")),
    );
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let layer: BoxedLayer = match format {
        "json" => fmt::layer().json().with_writer(writer).with_ansi(false).boxed(),
        _ => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
    };
    Ok((layer, guard))
}

/// Keeps the file writer alive so buffered lines are flushed on shutdown.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Replaces the guard in `slot` only when the new subscriber was installed.
/// Otherwise the running subscriber keeps its writer and `guard` is dropped.
fn store_worker_guard(
    slot: &Mutex<Option<WorkerGuard>>,
    installed: bool,
    guard: Option<WorkerGuard>,
) {
    if !installed {
        return;
    }
    match slot.lock() {
        Ok(mut slot) => *slot = guard,
        Err(e) => eprintln!(
            "[ERROR] Failed to lock LOG_WORKER_GUARD: {}. Log flushing may be affected.",
            e
        ),
    }
}

fn level_directive(level: &str) -> Result<String, LoggingError> {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        invalid => {
            return Err(LoggingError::FilterError(format!(
                "Invalid log level in config: {}",
                invalid
            )));
        }
    };
    Ok(level.to_string())
}

/// Installs the global subscriber described by `config`.
///
/// With `is_reload = true` an already-installed subscriber is not an error;
/// the previous one stays active together with its file writer.
///
/// # Errors
///
/// [`CoreError::LoggingInitialization`] for an invalid level, an unusable log
/// directory, or (on first setup) an already-installed global subscriber.
pub fn initialize_logging(config: &LoggingConfig, is_reload: bool) -> Result<(), CoreError> {
    let directive = level_directive(&config.level)?;
    let format = config.format.to_lowercase();

    let stdout_layer: BoxedLayer = match format.as_str() {
        "json" => fmt::layer()
            .json()
            .with_writer(stdout)
            .with_ansi(false)
            .with_filter(EnvFilter::new(&directive))
            .boxed(),
        _ => fmt::layer()
            .with_writer(stdout)
            .with_ansi(atty::is(atty::Stream::Stdout))
            .with_filter(EnvFilter::new(&directive))
            .boxed(),
    };

    let mut layers: Vec<BoxedLayer> = vec![stdout_layer];
    let mut new_file_guard = None;
    if let Some(log_path) = &config.file_path {
        let (file_layer, guard) = create_file_layer(log_path, &format)?;
        new_file_guard = Some(guard);
        layers.push(file_layer.with_filter(EnvFilter::new(&directive)).boxed());
    }

    let result = Registry::default().with(layers).try_init();

    store_worker_guard(&LOG_WORKER_GUARD, result.is_ok(), new_file_guard);

    match result {
        Ok(()) => Ok(()),
        Err(e) if is_reload => {
            eprintln!(
                "[INFO] Logging re-initialization requested; previous subscriber stays active: {}",
                e
            );
            Ok(())
        }
        Err(e) => Err(LoggingError::InitializationError(format!(
            "Failed to set global tracing subscriber. Was it already initialized? Error: {}",
            e
        ))
        .into()),
    }
}
