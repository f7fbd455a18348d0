//! All-pairs lexical similarity over analysis and cause narratives.
//!
//! A reporting pass only: records are never mutated, grouped or filtered here.
//! The O(n²) comparison fans out over the outer index with rayon; results are
//! collected in outer-index order so output is deterministic regardless of
//! which worker finishes first.

use rayon::prelude::*;
use similar::TextDiff;
use tracing::info;

use crate::models::{IncidentRecord, SimilarityPair};

/// Remove embedded line breaks, leaving case and punctuation untouched.
fn flatten_lines(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}

/// Longest-matching-block character ratio in [0.0, 1.0].
/// 1.0 = identical, 0.0 = no characters in common.
pub fn lexical_ratio(a: &str, b: &str) -> f64 {
    TextDiff::from_chars(a, b).ratio() as f64
}

/// Compare every unordered record pair on analysis and cause text.
/// Emits n·(n−1)/2 entries ordered by (entry1, entry2).
pub fn pairwise_report(records: &[IncidentRecord]) -> Vec<SimilarityPair> {
    let start = std::time::Instant::now();
    let analyses: Vec<String> = records.iter().map(|r| flatten_lines(&r.analysis_text)).collect();
    let causes: Vec<String> = records.iter().map(|r| flatten_lines(&r.cause_text)).collect();

    let pairs: Vec<SimilarityPair> = (0..records.len())
        .into_par_iter()
        .map(|i| {
            let mut row = Vec::with_capacity(records.len().saturating_sub(i + 1));
            for j in (i + 1)..records.len() {
                row.push(SimilarityPair {
                    entry1: i,
                    entry2: j,
                    analysis_similarity: lexical_ratio(&analyses[i], &analyses[j]),
                    cause_similarity: lexical_ratio(&causes[i], &causes[j]),
                });
            }
            row
        })
        .flatten()
        .collect();

    info!(
        "Lexical similarity completed - duration={:.2}s, records={}, pairs={}",
        start.elapsed().as_secs_f32(),
        records.len(),
        pairs.len()
    );
    pairs
}
