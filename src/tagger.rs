//! Entity and keyword tagging over raw (uncleaned) narratives.
//!
//! Two independent passes per narrative: an optional general named-entity pass
//! supplied by an external model behind [`NamedEntityModel`], and a rule pass
//! that scans sentences against fixed keyword families. The rule pass never
//! depends on the model being present.

use anyhow::Result;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Labels retained from the general named-entity pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Organization,
    Location,
    Date,
    Product,
}

/// One span the external model recognized.
#[derive(Debug, Clone)]
pub struct NamedSpan {
    pub label: EntityLabel,
    pub text: String,
}

/// External named-entity recognizer. Loading and owning the model is the
/// caller's concern; the tagger only consumes recognized spans.
pub trait NamedEntityModel {
    fn recognize(&self, text: &str) -> Result<Vec<NamedSpan>>;
}

/// Per-narrative tag buckets. Each list is deduplicated in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct EntityTags {
    pub organizations: Vec<String>,
    pub locations: Vec<String>,
    pub dates: Vec<String>,
    pub products: Vec<String>,
    pub aircraft: Vec<String>,
    pub damage: Vec<String>,
    pub cause: Vec<String>,
}

static MANUFACTURER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(boeing|cessna|piper|airbus|beech|lancair|ryan|douglas)\b")
        .expect("manufacturer pattern")
});

static FAILURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(failure|stall|loss of engine|loss of control|fatigue)\b")
        .expect("failure pattern")
});

/// Tag one narrative. The model pass fills the general buckets; the sentence
/// rules fill `aircraft`, `damage` and `cause`. A sentence may land in more
/// than one bucket.
pub fn tag_text(text: &str, model: Option<&dyn NamedEntityModel>) -> EntityTags {
    let mut tags = EntityTags::default();

    if let Some(model) = model {
        match model.recognize(text) {
            Ok(spans) => {
                for span in spans {
                    match span.label {
                        EntityLabel::Organization => tags.organizations.push(span.text),
                        EntityLabel::Location => tags.locations.push(span.text),
                        EntityLabel::Date => tags.dates.push(span.text),
                        EntityLabel::Product => tags.products.push(span.text),
                    }
                }
            }
            // The rule families below still apply; general buckets stay empty.
            Err(err) => warn!("Named-entity pass failed - err={err:#}"),
        }
    }

    for sentence in split_sentences(text) {
        let low = sentence.to_lowercase();
        if MANUFACTURER_RE.is_match(&low) {
            tags.aircraft.push(sentence.clone());
        }
        if low.contains("damage") || low.contains("substantial") {
            tags.damage.push(sentence.clone());
        }
        if FAILURE_RE.is_match(&low) {
            tags.cause.push(sentence.clone());
        }
    }

    tags.organizations = dedup_keep_order(tags.organizations);
    tags.locations = dedup_keep_order(tags.locations);
    tags.dates = dedup_keep_order(tags.dates);
    tags.products = dedup_keep_order(tags.products);
    tags.aircraft = dedup_keep_order(tags.aircraft);
    tags.damage = dedup_keep_order(tags.damage);
    tags.cause = dedup_keep_order(tags.cause);
    tags
}

fn dedup_keep_order(items: Vec<String>) -> Vec<String> {
    items.into_iter().unique().collect()
}

/// Split a narrative into sentences on `.`, `!`, `?`, treating a dot between
/// digits as a decimal point rather than a boundary.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut buffer = String::new();

    for (idx, ch) in chars.iter().enumerate() {
        buffer.push(*ch);
        if is_sentence_boundary(&chars, idx) {
            let trimmed = buffer.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            buffer.clear();
        }
    }
    let trailing = buffer.trim();
    if !trailing.is_empty() {
        sentences.push(trailing.to_string());
    }
    sentences
}

fn is_sentence_boundary(chars: &[char], idx: usize) -> bool {
    match chars[idx] {
        '!' | '?' => true,
        '.' => !is_decimal_middle(chars, idx),
        _ => false,
    }
}

fn is_decimal_middle(chars: &[char], idx: usize) -> bool {
    idx > 0
        && idx + 1 < chars.len()
        && chars[idx - 1].is_ascii_digit()
        && chars[idx + 1].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedModel(Vec<NamedSpan>);

    impl NamedEntityModel for CannedModel {
        fn recognize(&self, _text: &str) -> Result<Vec<NamedSpan>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn rules_work_without_a_model() {
        let tags = tag_text(
            "The Cessna sustained substantial damage. The engine showed fatigue cracking.",
            None,
        );
        assert_eq!(tags.aircraft.len(), 1);
        assert_eq!(tags.damage.len(), 1);
        assert_eq!(tags.cause.len(), 1);
        assert!(tags.organizations.is_empty());
    }

    #[test]
    fn one_sentence_can_join_multiple_buckets() {
        let tags = tag_text("The Piper sustained substantial damage from the stall.", None);
        assert_eq!(tags.aircraft, tags.damage);
        assert_eq!(tags.damage, tags.cause);
    }

    #[test]
    fn buckets_dedup_preserving_first_seen_order() {
        let text = "Engine failure occurred. Substantial damage resulted. Engine failure occurred.";
        let tags = tag_text(text, None);
        assert_eq!(tags.cause, vec!["Engine failure occurred.".to_string()]);
    }

    #[test]
    fn model_spans_fill_general_buckets() {
        let model = CannedModel(vec![
            NamedSpan { label: EntityLabel::Organization, text: "NTSB".into() },
            NamedSpan { label: EntityLabel::Date, text: "July 3, 1998".into() },
        ]);
        let tags = tag_text("No rule matches here", Some(&model));
        assert_eq!(tags.organizations, vec!["NTSB".to_string()]);
        assert_eq!(tags.dates, vec!["July 3, 1998".to_string()]);
    }

    #[test]
    fn decimal_points_do_not_split_sentences() {
        let sentences = split_sentences("Visibility was 1.5 miles. The pilot continued.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("1.5 miles"));
    }

    #[test]
    fn no_matches_means_empty_buckets_not_errors() {
        let tags = tag_text("Nothing relevant here", None);
        assert!(tags.aircraft.is_empty());
        assert!(tags.damage.is_empty());
        assert!(tags.cause.is_empty());
    }
}
