//! # Logging Setup
//!
//! Installs the global `tracing` subscriber: a plain-text session log under the data
//! directory that is truncated on every start, plus a stdout layer unless stdout is
//! already taken by the console surface.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::domain::paths;

const DEFAULT_FILTER: &str =
    "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn,reqwest=warn";

/// Initializes logging. Keep the returned guard alive for the lifetime of the process.
pub fn init(data_dir: &str, stdout: bool) -> Result<WorkerGuard> {
    if !Path::new(data_dir).exists() {
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory {data_dir}"))?;
    }

    let log_path = paths::session_log_path(data_dir);
    if log_path.exists() {
        let _ = fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(data_dir, paths::SESSION_LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);

    let console_layer = stdout.then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stdout));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
