//! Greedy grouping of cause narratives by tf-idf cosine similarity.
//!
//! Membership is seed-only: a candidate joins a group when its similarity to
//! the group's FIRST member clears the threshold, never by similarity to later
//! members. A~B and B~C above threshold does not pull C into A's group unless
//! A~C also clears it. Deliberate, and pinned by a test below.

use anyhow::Result;
use std::collections::HashMap;
use tracing::{debug, info};
use xxhash_rust::xxh3::xxh3_64;

use crate::models::{CauseGroup, GroupMember, IncidentRecord};
use crate::tfidf;

/// Fixed design constant for cause-text cosine similarity.
pub const DEFAULT_THRESHOLD: f64 = 0.65;

const SUMMARY_KEYWORD_COUNT: usize = 5;

/// Group records with similar cause narratives. Callers pass only records
/// whose cause text survived the sentinel filter; fewer than two of them can
/// never produce a group.
pub fn group_similar_causes(
    records: &[IncidentRecord],
    threshold: f64,
) -> Result<Vec<CauseGroup>> {
    if records.len() < 2 {
        debug!("Cause clustering skipped - records={}", records.len());
        return Ok(Vec::new());
    }

    let start = std::time::Instant::now();
    let causes: Vec<String> = records.iter().map(|r| r.cause_text.clone()).collect();
    let rows = tfidf::fit_transform(&causes)?;

    // Full pairwise cosine matrix; the greedy scan below reads it by (i, j).
    let n = rows.len();
    let mut matrix = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let sim = tfidf::cosine(&rows[i], &rows[j]);
            matrix[i][j] = sim;
            matrix[j][i] = sim;
        }
    }

    let mut assigned = vec![false; n];
    let mut groups = Vec::new();

    for i in 0..n {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        let mut members_idx = vec![i];

        // Grow against the seed only - single pass over the remaining indices.
        for j in (i + 1)..n {
            if !assigned[j] && matrix[i][j] >= threshold {
                assigned[j] = true;
                members_idx.push(j);
            }
        }

        if members_idx.len() < 2 {
            continue;
        }

        let members: Vec<GroupMember> = members_idx
            .iter()
            .map(|&idx| GroupMember {
                file_name: records[idx].file_name.clone(),
                cause_text: records[idx].cause_text.clone(),
            })
            .collect();

        let member_causes: Vec<&str> =
            members_idx.iter().map(|&idx| causes[idx].as_str()).collect();
        let summary_keywords = summarize_keywords(&member_causes, SUMMARY_KEYWORD_COUNT);

        // Stable group id over member identity, not position in the corpus.
        let seed = members
            .iter()
            .map(|m| m.file_name.as_str())
            .collect::<Vec<_>>()
            .join("|");
        let group_id = format!("{:016x}", xxh3_64(seed.as_bytes()));

        groups.push(CauseGroup {
            group_id,
            members,
            summary_keywords,
        });
    }

    let sizes: Vec<usize> = groups.iter().map(|g| g.members.len()).collect();
    if let (Some(max), Some(min)) = (sizes.iter().max(), sizes.iter().min()) {
        debug!("Group size distribution - min={}, max={}, groups={}", min, max, sizes.len());
    }
    info!(
        "Cause clustering completed - duration={:.2}s, records={}, groups={}",
        start.elapsed().as_secs_f32(),
        n,
        groups.len()
    );
    Ok(groups)
}

/// Human-readable label for a group: its top-N most frequent alphabetic
/// tokens. Ties break toward the token seen first.
pub fn summarize_keywords(texts: &[&str], top_n: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();

    for text in texts {
        for token in text.split(|c: char| !c.is_ascii_alphabetic()) {
            if token.is_empty() {
                continue;
            }
            let token = token.to_lowercase();
            if !counts.contains_key(&token) {
                first_seen.push(token.clone());
            }
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut order: HashMap<&str, usize> = HashMap::new();
    for (pos, token) in first_seen.iter().enumerate() {
        order.insert(token.as_str(), pos);
    }

    let mut ranked: Vec<(&String, &usize)> = counts.iter().collect();
    ranked.sort_by_key(|(token, count)| (std::cmp::Reverse(**count), order[token.as_str()]));
    ranked
        .into_iter()
        .take(top_n)
        .map(|(token, _)| token.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, cause: &str) -> IncidentRecord {
        IncidentRecord {
            file_name: name.into(),
            analysis_text: String::new(),
            cause_text: cause.into(),
            aircraft_designation: None,
        }
    }

    #[test]
    fn near_duplicate_causes_group_and_outliers_do_not() {
        let records = vec![
            record("a.pdf", "engine failed due to fuel starvation"),
            record("b.pdf", "engine failure due to fuel starvation"),
            record("c.pdf", "bird strike on approach"),
        ];
        let groups = group_similar_causes(&records, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members.len(), 2);
        let names: Vec<&str> = groups[0].members.iter().map(|m| m.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn fewer_than_two_records_yield_no_groups() {
        assert!(group_similar_causes(&[], DEFAULT_THRESHOLD).unwrap().is_empty());
        let one = [record("a.pdf", "engine failure")];
        assert!(group_similar_causes(&one, DEFAULT_THRESHOLD).unwrap().is_empty());
    }

    #[test]
    fn identical_causes_always_group() {
        let records = vec![
            record("a.pdf", "total loss of engine power during cruise"),
            record("b.pdf", "total loss of engine power during cruise"),
        ];
        let groups = group_similar_causes(&records, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members.len(), 2);
    }

    #[test]
    fn membership_is_seed_only_not_transitive() {
        // B is similar to both A and C, but A and C share nothing. With a
        // permissive threshold A claims B; C stays unclaimed and alone.
        let records = vec![
            record("a.pdf", "alpha bravo charlie delta"),
            record("b.pdf", "alpha bravo golf hotel"),
            record("c.pdf", "golf hotel india juliet"),
        ];
        let groups = group_similar_causes(&records, 0.3).unwrap();
        assert_eq!(groups.len(), 1);
        let names: Vec<&str> = groups[0].members.iter().map(|m| m.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn group_ids_are_stable_across_runs() {
        let records = vec![
            record("a.pdf", "engine failed due to fuel starvation"),
            record("b.pdf", "engine failure due to fuel starvation"),
        ];
        let first = group_similar_causes(&records, DEFAULT_THRESHOLD).unwrap();
        let second = group_similar_causes(&records, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(first[0].group_id, second[0].group_id);
    }

    #[test]
    fn summary_keywords_rank_by_frequency() {
        let keywords = summarize_keywords(
            &["engine engine fuel starvation", "engine fuel pump"],
            3,
        );
        assert_eq!(keywords[0], "engine");
        assert_eq!(keywords[1], "fuel");
        assert_eq!(keywords.len(), 3);
    }

    #[test]
    fn summary_keywords_skip_digits() {
        let keywords = summarize_keywords(&["engine 1234 5678 engine"], 5);
        assert_eq!(keywords, vec!["engine".to_string()]);
    }
}
