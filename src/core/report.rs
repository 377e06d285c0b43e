use crate::domain::model::{Analysis, Blocklist, KeepReason, Recommendation};
use std::collections::{BTreeMap, BTreeSet};

/// Render the full report as plain text. Pure function of the analysis so
/// the output is easy to assert on in tests.
pub fn render(
    analysis: &Analysis,
    recommendation: &Recommendation,
    directory: &BTreeMap<String, Blocklist>,
) -> String {
    let mut out = String::new();

    if analysis.domains.is_empty() {
        out.push_str("No blocked queries in the log window.\n");
        return out;
    }

    section(&mut out, "Blocklists appearing by themselves");
    out.push_str("domains\tid\n--     \t--\n");
    if analysis.solos.is_empty() {
        out.push_str("(none)\n");
    }
    for (id, domains) in &analysis.solos {
        out.push_str(&format!(
            "{}\t{}\n\t{}\n",
            domains.len(),
            display_name(directory, id),
            join(domains)
        ));
    }

    if !analysis.combos.is_empty() {
        section(&mut out, "Blocklists found only in combos");
        out.push_str("domains\tid\n--     \t--\n");
        for (ids, domains) in &analysis.combos {
            out.push_str(&format!(
                "{}\t{}\n\t{}\n",
                domains.len(),
                ids.join(" + "),
                join(domains)
            ));
        }
    }

    section(
        &mut out,
        &format!("Domain coverage ({} total)", analysis.domains.len()),
    );
    let mut by_coverage: Vec<(&String, usize)> = analysis
        .coverage
        .iter()
        .map(|(id, domains)| (id, domains.len()))
        .collect();
    by_coverage.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    for (id, blocked) in by_coverage {
        let pct = 100.0 * blocked as f64 / analysis.domains.len() as f64;
        out.push_str(&format!("{:5.1}% {}\n", pct, display_name(directory, id)));
    }

    section(&mut out, "Redundancy histogram");
    for (id, histogram) in &analysis.redundancy {
        out.push_str(&format!("{}\n", display_name(directory, id)));
        let max_level = histogram.keys().max().copied().unwrap_or(0);
        for level in 1..=max_level {
            let label = match level {
                1 => "🥇".to_string(),
                2 => "🥈".to_string(),
                3 => "🥉".to_string(),
                n => format!("{:2}", n),
            };
            let count = histogram.get(&level).copied().unwrap_or(0);
            out.push_str(&format!("{}: {}\n", label, "*".repeat(count)));
        }
        out.push('\n');
    }

    section(
        &mut out,
        &format!(
            "Recommendation ({} of {} lists cover all {} domains)",
            recommendation.keep.len(),
            analysis.coverage.len(),
            analysis.domains.len()
        ),
    );
    for kept in &recommendation.keep {
        let why = match kept.reason {
            KeepReason::SoleBlocker(n) => {
                format!("sole blocker of {} domain{}", n, plural(n))
            }
            KeepReason::AddsCoverage(n) => {
                format!("adds {} domain{} of coverage", n, plural(n))
            }
        };
        out.push_str(&format!(
            "keep\t{}\t{}\n",
            display_name(directory, &kept.id),
            why
        ));
    }
    for id in &recommendation.droppable {
        out.push_str(&format!(
            "drop\t{}\tfully covered by the kept lists\n",
            display_name(directory, id)
        ));
    }

    out
}

fn section(out: &mut String, title: &str) {
    out.push_str(&format!("\n#\n# {}\n#\n\n", title));
}

fn display_name(directory: &BTreeMap<String, Blocklist>, id: &str) -> String {
    match directory.get(id).and_then(|list| list.name.as_deref()) {
        Some(name) => format!("{} ({})", id, name),
        None => id.to_string(),
    }
}

fn join(domains: &BTreeSet<String>) -> String {
    domains.iter().cloned().collect::<Vec<_>>().join(", ")
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
