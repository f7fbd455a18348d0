//! Corpus-adaptive stopword construction.
//!
//! Two-phase by necessity: frequencies are counted over the whole corpus before
//! any per-record filtering happens. A token is dropped either because it is
//! noise (fewer occurrences than `low_threshold`, typically OCR artifacts or
//! unique identifiers) or boilerplate (more occurrences than
//! `high_ratio * document_count`, i.e. report-template language).

use std::collections::{HashMap, HashSet};

use stop_words::{get as stop_word_list, LANGUAGE};
use tracing::debug;

/// Default minimum global count for a token to survive.
pub const DEFAULT_LOW_THRESHOLD: usize = 2;

/// Default document-count ratio above which a token is boilerplate.
pub const DEFAULT_HIGH_RATIO: f64 = 0.90;

/// Build the exclusion set for one corpus of cleaned documents.
pub fn build_stopword_set(
    cleaned_docs: &[String],
    low_threshold: usize,
    high_ratio: f64,
) -> HashSet<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for doc in cleaned_docs {
        for token in doc.split_whitespace() {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let high_cutoff = high_ratio * cleaned_docs.len() as f64;
    let mut set: HashSet<String> = stop_word_list(LANGUAGE::English).into_iter().collect();
    let base_len = set.len();

    let mut low = 0usize;
    let mut high = 0usize;
    for (token, count) in counts {
        if count < low_threshold {
            low += 1;
            set.insert(token.to_string());
        } else if count as f64 > high_cutoff {
            high += 1;
            set.insert(token.to_string());
        }
    }

    debug!(
        "Stopword set built - base={}, low_freq={}, high_freq={}, docs={}",
        base_len,
        low,
        high,
        cleaned_docs.len()
    );
    set
}

/// Per-record keyword extraction: cleaned tokens minus the exclusion set,
/// original order and duplicates preserved.
pub fn filter_keywords(cleaned: &str, stopwords: &HashSet<String>) -> Vec<String> {
    cleaned
        .split_whitespace()
        .filter(|t| !stopwords.contains(*t))
        .map(|t| t.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(docs: &[&str]) -> Vec<String> {
        docs.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn singleton_token_is_excluded() {
        let docs = corpus(&[
            "alpha engine",
            "engine trouble",
            "engine pilot",
            "pilot trouble",
        ]);
        let set = build_stopword_set(&docs, 2, 0.9);
        assert!(set.contains("alpha"));
        assert!(!set.contains("engine"));
        assert!(!set.contains("pilot"));
    }

    #[test]
    fn near_universal_token_is_excluded() {
        // "report" once in each of 10 docs: count 10 > 0.9 * 10.
        let docs: Vec<String> = (0..10).map(|i| format!("report unique{i} unique{i}")).collect();
        let set = build_stopword_set(&docs, 2, 0.9);
        assert!(set.contains("report"));
        assert!(!set.contains("unique3"));
    }

    #[test]
    fn base_list_always_applies() {
        let docs = corpus(&["the the the engine engine"]);
        let set = build_stopword_set(&docs, 2, 0.9);
        assert!(set.contains("the"));
    }

    #[test]
    fn keyword_filter_preserves_order_and_duplicates() {
        let mut set = HashSet::new();
        set.insert("the".to_string());
        let kws = filter_keywords("the engine failed the engine", &set);
        assert_eq!(kws, vec!["engine", "failed", "engine"]);
    }

    #[test]
    fn empty_corpus_yields_base_list_only() {
        let set = build_stopword_set(&[], 2, 0.9);
        assert!(set.contains("the"));
    }
}
