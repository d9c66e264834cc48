//! Startup history store.
//!
//! Single owner of `last_ssu.json` and the per-day logs. All
//! read-modify-write cycles run behind one async mutex so two command
//! handlers racing on the same file cannot lose an update; writes go
//! through a temp file and rename.

use std::path::Path;

use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{StorageError, StoragePaths};
use crate::models::StartupRecord;

/// Owner of the startup history files.
pub struct HistoryStore {
    paths: StoragePaths,
    // Guards every file under the data dir; held across each full
    // read-modify-write cycle.
    lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(paths: StoragePaths) -> Self {
        Self {
            paths,
            lock: Mutex::new(()),
        }
    }

    /// Append a startup to its day log and remember it as the active
    /// session.
    pub async fn record_startup(&self, record: &StartupRecord) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;

        let date = record.timestamp.date_naive();
        let log_path = self.paths.day_log_path(date);
        let mut entries: Vec<StartupRecord> = read_json_or(&log_path, Vec::new)?;
        entries.push(record.clone());
        write_atomic(&log_path, &entries)?;

        write_atomic(&self.paths.last_startup_path(), record)?;

        info!(
            server = %record.server_name,
            message_id = record.message_id,
            "Recorded startup"
        );
        Ok(())
    }

    /// The active session, if a startup is outstanding.
    pub async fn load_last(&self) -> Result<Option<StartupRecord>, StorageError> {
        let _guard = self.lock.lock().await;
        let path = self.paths.last_startup_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Forget the active session (after a shutdown announcement).
    pub async fn clear_last(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let path = self.paths.last_startup_path();
        if path.exists() {
            std::fs::remove_file(&path)?;
            debug!("Cleared active session file");
        }
        Ok(())
    }

    /// All startups logged on the given day (UTC).
    pub async fn read_day(&self, date: NaiveDate) -> Result<Vec<StartupRecord>, StorageError> {
        let _guard = self.lock.lock().await;
        read_json_or(&self.paths.day_log_path(date), Vec::new)
    }

    /// Today's startups (UTC).
    pub async fn read_today(&self) -> Result<Vec<StartupRecord>, StorageError> {
        self.read_day(Utc::now().date_naive()).await
    }
}

fn read_json_or<T, F>(path: &Path, default: F) -> Result<T, StorageError>
where
    T: serde::de::DeserializeOwned,
    F: FnOnce() -> T,
{
    if !path.exists() {
        return Ok(default());
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

fn write_atomic<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, serde_json::to_string_pretty(value)?)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}
