//! # Data Paths
//!
//! Centralized definitions for the files the bot keeps under its data directory.

use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "data/config.yaml";
pub const SESSION_LOG_FILE: &str = "session.log";
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// Returns the path to the per-user credential store given the data directory
pub fn credentials_path(data_dir: &str) -> PathBuf {
    PathBuf::from(data_dir).join(CREDENTIALS_FILE)
}

/// Returns the path to the session log given the data directory
pub fn session_log_path(data_dir: &str) -> PathBuf {
    PathBuf::from(data_dir).join(SESSION_LOG_FILE)
}
