//! Term-frequency / inverse-document-frequency vectorization of cause texts.
//!
//! Weighting matches the conventional vectorizer defaults: raw term counts,
//! smoothed idf `ln((1 + n) / (1 + df)) + 1`, and L2-normalized rows, so the
//! cosine of two documents is a plain dot product of their rows.

use std::collections::{HashMap, HashSet};

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;

// Tokens of two or more word characters, like the vectorizer this replaces.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern"));

/// Function words excluded from the vectorizer's vocabulary. Fixed rather than
/// corpus-derived: the 0.65 grouping threshold is calibrated against exactly
/// this exclusion set, so content-bearing connectives like "due" stay in.
const VECTORIZER_STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now",
    "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
    "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
    "you", "your", "yours", "yourself", "yourselves",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| VECTORIZER_STOPWORDS.iter().copied().collect());

fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| !STOPWORD_SET.contains(t))
        .map(|t| t.to_string())
        .collect()
}

/// One document as a sparse L2-normalized tf-idf row, term indices ascending.
pub type TfidfRow = Vec<(usize, f64)>;

/// Vectorize a corpus of documents. Fitting over an empty corpus, or one whose
/// tokens are all stopwords, is a precondition failure rather than a silent
/// empty model.
pub fn fit_transform(docs: &[String]) -> Result<Vec<TfidfRow>> {
    if docs.is_empty() {
        bail!("Cannot fit a tf-idf model over an empty corpus");
    }

    let tokenized: Vec<Vec<String>> = docs.iter().map(|d| tokenize(d)).collect();

    let mut vocab: HashMap<String, usize> = HashMap::new();
    let mut df: Vec<usize> = Vec::new();
    for tokens in &tokenized {
        let mut seen: Vec<usize> = Vec::new();
        for token in tokens {
            let next_id = vocab.len();
            let id = *vocab.entry(token.clone()).or_insert_with(|| {
                df.push(0);
                next_id
            });
            if !seen.contains(&id) {
                seen.push(id);
                df[id] += 1;
            }
        }
    }
    if vocab.is_empty() {
        bail!("Empty vocabulary - every token was a stopword or too short");
    }

    let n = docs.len() as f64;
    let idf: Vec<f64> = df
        .iter()
        .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
        .collect();

    let rows = tokenized
        .iter()
        .map(|tokens| {
            let mut counts: HashMap<usize, f64> = HashMap::new();
            for token in tokens {
                // Fitted on this corpus, so every token is in the vocabulary.
                *counts.entry(vocab[token]).or_insert(0.0) += 1.0;
            }
            let mut row: TfidfRow =
                counts.into_iter().map(|(id, tf)| (id, tf * idf[id])).collect();
            row.sort_by_key(|&(id, _)| id);

            let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, w) in row.iter_mut() {
                    *w /= norm;
                }
            }
            row
        })
        .collect();

    Ok(rows)
}

/// Cosine of two L2-normalized sparse rows: the dot product over shared terms.
pub fn cosine(a: &TfidfRow, b: &TfidfRow) -> f64 {
    let (mut i, mut j, mut dot) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}
