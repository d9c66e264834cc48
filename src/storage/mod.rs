//! Flat-file persistence.
//!
//! Everything the bot remembers lives under one data directory:
//! - `last_ssu.json` — the currently running session, if any
//! - `logs/<YYYY-MM-DD>.json` — startups announced that day
//!
//! Files are plain pretty-printed JSON so operators can inspect and edit
//! them by hand.

mod history;

pub use history::HistoryStore;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Layout of the data directory.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub data_dir: PathBuf,
}

impl StoragePaths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn last_startup_path(&self) -> PathBuf {
        self.data_dir.join("last_ssu.json")
    }

    pub fn day_log_path(&self, date: chrono::NaiveDate) -> PathBuf {
        self.logs_dir().join(format!("{}.json", date))
    }
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
