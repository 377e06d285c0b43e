use crate::domain::model::LogEntry;
use crate::domain::ports::LogSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Saved logs are accepted either as the raw entry array written by --save
/// or as the full `{"data": [...]}` envelope the API returns.
#[derive(Deserialize)]
#[serde(untagged)]
enum SavedLog {
    Envelope { data: Vec<LogEntry> },
    Entries(Vec<LogEntry>),
}

/// Log source backed by a JSON file from an earlier --save run.
#[derive(Debug, Clone)]
pub struct FileLogSource {
    path: PathBuf,
}

impl FileLogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LogSource for FileLogSource {
    async fn fetch_blocked(&self) -> Result<Vec<LogEntry>> {
        tracing::info!("💾 Loading log entries from {}", self.path.display());
        let raw = fs::read_to_string(&self.path)?;
        let saved: SavedLog = serde_json::from_str(&raw)?;
        Ok(match saved {
            SavedLog::Envelope { data } => data,
            SavedLog::Entries(entries) => entries,
        })
    }
}

/// Write raw log entries to disk so a later run can replay them with --file.
pub fn save_raw_log<P: AsRef<Path>>(path: P, entries: &[impl Serialize]) -> Result<()> {
    let json = serde_json::to_string(entries)?;
    fs::write(path.as_ref(), json)?;
    Ok(())
}

/// Filename for a --save run: `<profile_id>-<unix_timestamp>.json`.
pub fn save_filename(profile_id: &str) -> String {
    format!("{}-{}.json", profile_id, chrono::Utc::now().timestamp())
}
