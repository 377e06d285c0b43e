use crate::domain::model::{Analysis, Blocklist, KeepReason, KeptList, Recommendation};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

/// Pick a covering subset of the subscribed lists.
///
/// Solo lists are mandatory: each is the only thing blocking some domain.
/// The rest is a greedy set cover over the remaining domains, taking the
/// list with the largest marginal coverage each round. Ties go to the most
/// recently updated list (per the blocklist metadata), then to the
/// lexicographically smaller ID, so the result is deterministic. Everything
/// never picked is fully covered by the keep set and reported as droppable.
pub fn recommend(analysis: &Analysis, directory: &BTreeMap<String, Blocklist>) -> Recommendation {
    let mut recommendation = Recommendation::default();
    let mut kept: BTreeSet<&str> = BTreeSet::new();
    let mut uncovered: BTreeSet<&str> = analysis.domains.iter().map(String::as_str).collect();

    for (id, solo_domains) in &analysis.solos {
        recommendation.keep.push(KeptList {
            id: id.clone(),
            reason: KeepReason::SoleBlocker(solo_domains.len()),
        });
        kept.insert(id.as_str());
        if let Some(covered) = analysis.coverage.get(id) {
            for domain in covered {
                uncovered.remove(domain.as_str());
            }
        }
    }

    while !uncovered.is_empty() {
        let mut best: Option<(&str, usize)> = None;
        for (id, covered) in &analysis.coverage {
            let id = id.as_str();
            if kept.contains(id) {
                continue;
            }
            let gain = covered
                .iter()
                .filter(|domain| uncovered.contains(domain.as_str()))
                .count();
            if gain == 0 {
                continue;
            }
            best = match best {
                None => Some((id, gain)),
                Some((_, best_gain)) if gain > best_gain => Some((id, gain)),
                Some((best_id, best_gain))
                    if gain == best_gain && updated_on(directory, id) > updated_on(directory, best_id) =>
                {
                    Some((id, gain))
                }
                other => other,
            };
        }

        let Some((id, gain)) = best else {
            // Shouldn't happen: every analyzed domain has at least one list.
            break;
        };
        recommendation.keep.push(KeptList {
            id: id.to_string(),
            reason: KeepReason::AddsCoverage(gain),
        });
        kept.insert(id);
        if let Some(covered) = analysis.coverage.get(id) {
            for domain in covered {
                uncovered.remove(domain.as_str());
            }
        }
    }

    recommendation.droppable = analysis
        .coverage
        .keys()
        .filter(|id| !kept.contains(id.as_str()))
        .cloned()
        .collect();

    recommendation
}

fn updated_on(directory: &BTreeMap<String, Blocklist>, id: &str) -> Option<DateTime<Utc>> {
    directory.get(id).and_then(|list| list.updated_on)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::analysis::analyze;
    use crate::domain::model::{BlockReason, LogEntry};
    use chrono::TimeZone;

    fn entry(domain: &str, reason_ids: &[&str]) -> LogEntry {
        LogEntry {
            domain: domain.to_string(),
            reasons: reason_ids
                .iter()
                .map(|id| BlockReason {
                    id: id.to_string(),
                    name: None,
                })
                .collect(),
        }
    }

    fn list(id: &str, updated_year: Option<i32>) -> (String, Blocklist) {
        (
            id.to_string(),
            Blocklist {
                id: id.to_string(),
                name: None,
                entries: None,
                updated_on: updated_year
                    .map(|y| Utc.with_ymd_and_hms(y, 1, 1, 0, 0, 0).unwrap()),
            },
        )
    }

    fn keep_ids(recommendation: &Recommendation) -> Vec<&str> {
        recommendation.keep.iter().map(|k| k.id.as_str()).collect()
    }

    #[test]
    fn test_solo_lists_are_always_kept() {
        let analysis = analyze(&[
            entry("a.example", &["a"]),
            entry("b.example", &["b"]),
            entry("cd.example", &["c", "d"]),
        ]);

        let recommendation = recommend(&analysis, &BTreeMap::new());

        let ids = keep_ids(&recommendation);
        assert!(ids.contains(&"a"));
        assert!(ids.contains(&"b"));
        // c and d block the same single domain; exactly one survives.
        assert_eq!(ids.len(), 3);
        assert_eq!(recommendation.droppable.len(), 1);
        assert!(
            recommendation.droppable == vec!["c".to_string()]
                || recommendation.droppable == vec!["d".to_string()]
        );
    }

    #[test]
    fn test_solo_reason_is_sole_blocker() {
        let analysis = analyze(&[entry("a.example", &["a"]), entry("a2.example", &["a"])]);
        let recommendation = recommend(&analysis, &BTreeMap::new());

        assert_eq!(recommendation.keep.len(), 1);
        assert_eq!(recommendation.keep[0].reason, KeepReason::SoleBlocker(2));
    }

    #[test]
    fn test_greedy_prefers_larger_marginal_coverage() {
        // big covers every domain, small and other only subsets of it.
        let analysis = analyze(&[
            entry("one.example", &["big", "small"]),
            entry("two.example", &["big", "small"]),
            entry("three.example", &["big", "small"]),
            entry("four.example", &["big", "other"]),
        ]);

        let recommendation = recommend(&analysis, &BTreeMap::new());

        assert_eq!(keep_ids(&recommendation), vec!["big"]);
        assert_eq!(recommendation.keep[0].reason, KeepReason::AddsCoverage(4));
        assert_eq!(
            recommendation.droppable,
            vec!["other".to_string(), "small".to_string()]
        );
    }

    #[test]
    fn test_freshness_breaks_ties() {
        let analysis = analyze(&[entry("x.example", &["stale", "fresh"])]);
        let directory: BTreeMap<_, _> =
            [list("stale", Some(2020)), list("fresh", Some(2026))].into_iter().collect();

        let recommendation = recommend(&analysis, &directory);

        assert_eq!(keep_ids(&recommendation), vec!["fresh"]);
        assert_eq!(recommendation.droppable, vec!["stale".to_string()]);
    }

    #[test]
    fn test_known_freshness_beats_unknown() {
        let analysis = analyze(&[entry("x.example", &["aaa", "zzz"])]);
        let directory: BTreeMap<_, _> = [list("zzz", Some(2026))].into_iter().collect();

        let recommendation = recommend(&analysis, &directory);

        // Without metadata "aaa" would win on ID; freshness overrides.
        assert_eq!(keep_ids(&recommendation), vec!["zzz"]);
    }

    #[test]
    fn test_cover_is_complete() {
        let analysis = analyze(&[
            entry("a.example", &["a"]),
            entry("ab.example", &["a", "b"]),
            entry("bc.example", &["b", "c"]),
            entry("c.example", &["c", "d"]),
        ]);

        let recommendation = recommend(&analysis, &BTreeMap::new());

        let kept: BTreeSet<&str> = keep_ids(&recommendation).into_iter().collect();
        for domain in &analysis.domains {
            let covered = analysis
                .coverage
                .iter()
                .any(|(id, domains)| kept.contains(id.as_str()) && domains.contains(domain));
            assert!(covered, "domain {} left uncovered", domain);
        }
    }

    #[test]
    fn test_empty_analysis() {
        let recommendation = recommend(&analyze(&[]), &BTreeMap::new());
        assert!(recommendation.keep.is_empty());
        assert!(recommendation.droppable.is_empty());
    }
}
