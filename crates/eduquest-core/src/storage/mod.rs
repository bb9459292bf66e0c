//! Durable storage: the SQLite key-value store that holds snapshots, the
//! [`SnapshotStore`] seam the engine persists through, and TOML config.

mod config;
pub mod database;
pub mod snapshot;

pub use config::{Config, DisplayConfig, LogConfig, StorageConfig};
pub use database::Database;
pub use snapshot::{MemoryStore, SnapshotStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/eduquest[-dev]/` based on EDUQUEST_ENV.
///
/// Set EDUQUEST_ENV=dev to use the development data directory, or
/// EDUQUEST_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("EDUQUEST_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("EDUQUEST_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("eduquest-dev")
            } else {
                base_dir.join("eduquest")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
