use crate::domain::model::{Analysis, LogEntry};

/// Partition the log by who blocked what. Two passes, both deterministic:
///
/// 1. Dedupe domains (first occurrence wins) and build per-list coverage,
///    redundancy histograms, and the solo sets (lists that were the only
///    reason a domain was blocked).
/// 2. Entries whose reason set touches no solo list are grouped by their
///    sorted reason-ID combination; those lists never block anything alone.
pub fn analyze(entries: &[LogEntry]) -> Analysis {
    let mut analysis = Analysis::default();

    for entry in entries {
        if entry.reasons.is_empty() {
            analysis.skipped_entries += 1;
            continue;
        }
        analysis.total_entries += 1;

        if !analysis.domains.insert(entry.domain.clone()) {
            continue;
        }

        let level = entry.reasons.len();
        for reason in &entry.reasons {
            analysis
                .coverage
                .entry(reason.id.clone())
                .or_default()
                .insert(entry.domain.clone());

            *analysis
                .redundancy
                .entry(reason.id.clone())
                .or_default()
                .entry(level)
                .or_insert(0) += 1;

            if level == 1 {
                analysis
                    .solos
                    .entry(reason.id.clone())
                    .or_default()
                    .insert(entry.domain.clone());
            }
        }
    }

    for entry in entries {
        if entry.reasons.is_empty() {
            continue;
        }
        let ids = entry.reason_ids();
        if ids.iter().any(|id| analysis.solos.contains_key(id)) {
            continue;
        }
        let key: Vec<String> = ids.into_iter().collect();
        analysis
            .combos
            .entry(key)
            .or_default()
            .insert(entry.domain.clone());
    }

    analysis
}
