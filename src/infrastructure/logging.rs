//! Logging system configuration and initialization
//!
//! Console logging with `EnvFilter` level control, optional structured JSON
//! output, and optional non-blocking daily-rotated file output. File writer
//! guards are parked in a process-wide slot so the writers stay alive.

use anyhow::Result;
use lazy_static::lazy_static;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

// Re-export LoggingConfig from config module
pub use crate::infrastructure::config::LoggingConfig;

// Global guard to keep the log file writer alive
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<WorkerGuard>> = Mutex::new(Vec::new());
}

/// Get the log directory relative to the executable location.
pub fn default_log_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    exe_dir.join("logs")
}

/// Initialize the logging system with default configuration.
pub fn init_logging() -> Result<()> {
    init_logging_with_config(&LoggingConfig::default())
}

/// Initialize the logging system from configuration.
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_layer = if config.file_output {
        let directory = config
            .directory
            .clone()
            .unwrap_or_else(default_log_directory);
        std::fs::create_dir_all(&directory)?;

        let (writer, guard) = non_blocking(rolling::daily(directory, "computer-store.log"));
        LOG_GUARDS.lock().unwrap().push(guard);
        Some(fmt::layer().with_writer(writer).with_ansi(false))
    } else {
        None
    };

    let registry = Registry::default().with(filter).with(file_layer);
    if config.json_output {
        registry.with(fmt::layer().json()).try_init()?;
    } else {
        registry.with(fmt::layer()).try_init()?;
    }

    Ok(())
}
