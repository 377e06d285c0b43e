use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One blocklist that matched a logged query. The log endpoint reports these
/// under `reasons`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockReason {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A blocked-query log entry as returned by the NextDNS log endpoint. Fields
/// we do not analyze (timestamp, device, query type) are ignored on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub domain: String,
    #[serde(default)]
    pub reasons: Vec<BlockReason>,
}

impl LogEntry {
    pub fn reason_ids(&self) -> BTreeSet<String> {
        self.reasons.iter().map(|r| r.id.clone()).collect()
    }
}

/// Metadata for a blocklist the profile subscribes to, from the
/// `privacy/blocklists` endpoint. `updated_on` drives the "actively
/// maintained" tie-break when recommending lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blocklist {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<u64>,
    #[serde(
        default,
        rename = "updatedOn",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_on: Option<DateTime<Utc>>,
}

/// Deterministic partition of the logged domains by who blocked them.
/// BTree containers keep the report order stable across runs.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    /// Log entries considered (after skipping empty-reason ones).
    pub total_entries: usize,
    /// Entries dropped because they carried no blocking reason.
    pub skipped_entries: usize,
    /// All unique blocked domains, first log occurrence wins.
    pub domains: BTreeSet<String>,
    /// Lists that were the sole blocker of at least one domain, with those domains.
    pub solos: BTreeMap<String, BTreeSet<String>>,
    /// Reason-set combinations that never touch a solo list, with their domains.
    pub combos: BTreeMap<Vec<String>, BTreeSet<String>>,
    /// Per list, every unique domain it would block.
    pub coverage: BTreeMap<String, BTreeSet<String>>,
    /// Per list, histogram of how many lists blocked alongside it
    /// (level 1 = it was alone) keyed by level.
    pub redundancy: BTreeMap<String, BTreeMap<usize, usize>>,
}

/// Why a list ended up in the keep set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeepReason {
    /// Sole blocker of this many domains; removing it would unblock them.
    SoleBlocker(usize),
    /// Greedy pick: adds this many otherwise-uncovered domains.
    AddsCoverage(usize),
}

#[derive(Debug, Clone)]
pub struct KeptList {
    pub id: String,
    pub reason: KeepReason,
}

/// Result of the set-cover pass: the subset worth keeping subscribed, and
/// the lists whose blocks are all covered by that subset.
#[derive(Debug, Clone, Default)]
pub struct Recommendation {
    pub keep: Vec<KeptList>,
    pub droppable: Vec<String>,
}
