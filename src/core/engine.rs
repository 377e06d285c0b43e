use crate::adapters::file::save_raw_log;
use crate::core::analysis::analyze;
use crate::core::cover::recommend;
use crate::core::report::render;
use crate::domain::model::Blocklist;
use crate::domain::ports::{BlocklistDirectory, LogSource};
use crate::utils::error::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Orchestrates one audit run: fetch logs, optionally save the raw entries,
/// fetch blocklist metadata when available, analyze, and render the report.
pub struct AuditEngine {
    source: Box<dyn LogSource>,
    directory: Option<Box<dyn BlocklistDirectory>>,
    save_raw: Option<PathBuf>,
}

impl AuditEngine {
    pub fn new(source: Box<dyn LogSource>) -> Self {
        Self {
            source,
            directory: None,
            save_raw: None,
        }
    }

    pub fn with_directory(mut self, directory: Box<dyn BlocklistDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn with_save_path(mut self, path: PathBuf) -> Self {
        self.save_raw = Some(path);
        self
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("📡 Fetching blocked-query log…");
        let entries = self.source.fetch_blocked().await?;
        tracing::info!("✅ Found {} log entries", entries.len());

        if let Some(path) = &self.save_raw {
            save_raw_log(path, &entries)?;
            tracing::info!("💾 Wrote {}", path.display());
        }

        let directory = self.load_directory().await;

        let analysis = analyze(&entries);
        if analysis.skipped_entries > 0 {
            tracing::warn!(
                "⚠️ Skipped {} entries with no blocking reason",
                analysis.skipped_entries
            );
        }
        tracing::info!(
            "🔍 Analyzed {} unique domains across {} lists",
            analysis.domains.len(),
            analysis.coverage.len()
        );

        let recommendation = recommend(&analysis, &directory);
        Ok(render(&analysis, &recommendation, &directory))
    }

    async fn load_directory(&self) -> BTreeMap<String, Blocklist> {
        let Some(directory) = &self.directory else {
            return BTreeMap::new();
        };
        match directory.subscribed_blocklists().await {
            Ok(lists) => lists.into_iter().map(|list| (list.id.clone(), list)).collect(),
            Err(e) => {
                // Metadata is a nice-to-have: fall back to IDs and
                // freshness-blind tie-breaking.
                tracing::warn!("⚠️ Could not fetch blocklist metadata: {}", e);
                BTreeMap::new()
            }
        }
    }
}
