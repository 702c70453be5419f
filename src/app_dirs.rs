//! Filesystem location for persisted application state.
//!
//! Everything effortcast writes lives under one `.effortcast` directory:
//! `config.toml` at its root and launch logs in a `logs` subdirectory owned
//! by the logging module. The root sits in the platform config directory
//! (e.g., `%APPDATA%` on Windows) unless `EFFORTCAST_CONFIG_HOME` points
//! somewhere else, for tests and portable installs.

use std::io;
use std::path::PathBuf;

use directories::BaseDirs;
use thiserror::Error;

/// Name of the application directory that lives under the base config root.
pub const APP_DIR_NAME: &str = ".effortcast";

const CONFIG_HOME_VAR: &str = "EFFORTCAST_CONFIG_HOME";

/// Errors that can occur while resolving or preparing the application root.
#[derive(Debug, Error)]
pub enum AppDirError {
    /// No suitable base config directory could be resolved.
    #[error("No suitable base config directory available for application files")]
    NoBaseDir,
    /// Failed to create the application directory.
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
}

/// Return the root `.effortcast` directory, creating it on first use.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    let path = resolve_base_dir()
        .ok_or(AppDirError::NoBaseDir)?
        .join(APP_DIR_NAME);
    std::fs::create_dir_all(&path).map_err(|source| AppDirError::CreateDir {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn resolve_base_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_HOME_VAR) {
        Some(home) if !home.is_empty() => Some(PathBuf::from(home)),
        _ => BaseDirs::new().map(|dirs| dirs.config_dir().to_path_buf()),
    }
}
