//! src/logging.rs
//! ============================================================================
//! # Logger: Tracing Initialization
//!
//! File-backed structured logging for the TUI. Everything goes through a
//! non-blocking daily-rolling appender; nothing is written to the terminal
//! itself, which belongs to ratatui while the app runs.
//!
//! `RUST_LOG` overrides the configured default level.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// Install the global tracing subscriber.
    ///
    /// Returns the appender guard; dropping it flushes and stops the
    /// background writer, so the caller must hold it for the app lifetime.
    pub fn init(config: &LoggingConfig) -> Result<WorkerGuard> {
        std::fs::create_dir_all(&config.log_dir).with_context(|| {
            format!("Failed to create log directory {}", config.log_dir.display())
        })?;

        let appender = Self::file_appender(&config.log_dir, &config.log_file_prefix);
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_target(true)
                    .with_ansi(false),
            )
            .try_init()
            .context("Tracing subscriber already initialized")?;

        tracing::info!(
            log_dir = %config.log_dir.display(),
            level = %config.log_level,
            "Logging initialized"
        );

        Ok(guard)
    }

    fn file_appender(dir: &Path, prefix: &str) -> RollingFileAppender {
        RollingFileAppender::new(Rotation::DAILY, dir, format!("{prefix}.log"))
    }
}
