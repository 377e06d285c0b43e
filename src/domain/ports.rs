use crate::domain::model::{Blocklist, LogEntry};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where blocked-query log entries come from: the REST API or a saved file.
#[async_trait]
pub trait LogSource: Send + Sync {
    async fn fetch_blocked(&self) -> Result<Vec<LogEntry>>;
}

/// Supplies metadata for the profile's subscribed blocklists. Optional:
/// the analysis works without it, just with weaker tie-breaking.
#[async_trait]
pub trait BlocklistDirectory: Send + Sync {
    async fn subscribed_blocklists(&self) -> Result<Vec<Blocklist>>;
}
