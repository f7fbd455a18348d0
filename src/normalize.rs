//! Narrative cleaning that protects compound and model-designator tokens.
//!
//! Aircraft designators like "Boeing-747" or "PA-28" carry meaning in their
//! hyphen/digit layout, so cleaning runs in two passes: mask the protected
//! spans, strip punctuation from everything else, then restore the spans.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// Model designators ("Boeing-747") must win over the generic compound
// alternative on the same span, so they come first in the alternation.
static PRESERVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-zA-Z]+-\d+\b|\b\w+-\w+\b").expect("preserve pattern"));

static STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").expect("strip pattern"));

static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern"));

/// Clean a single narrative: lowercase, strip punctuation, collapse whitespace,
/// while leaving the internal structure of protected tokens intact.
pub fn clean_text(text: &str) -> String {
    let text: String = text.nfc().collect();

    let mut protected: Vec<(String, String)> = Vec::new();
    let masked = PRESERVE_RE.replace_all(&text, |caps: &regex::Captures| {
        let key = format!("__TOK{}__", protected.len());
        protected.push((key.clone(), caps[0].to_string()));
        key
    });

    let mut cleaned = STRIP_RE.replace_all(&masked, " ").to_lowercase();
    for (key, original) in &protected {
        cleaned = cleaned.replace(&key.to_lowercase(), &original.to_lowercase());
    }

    WS_RE.replace_all(&cleaned, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_lowercases() {
        assert_eq!(
            clean_text("The pilot (age 42) reported: ENGINE TROUBLE!"),
            "the pilot age 42 reported engine trouble"
        );
    }

    #[test]
    fn preserves_model_designators() {
        let out = clean_text("A Boeing-747 departed; the PA-28-180 followed.");
        assert!(out.contains("boeing-747"));
        assert!(out.contains("pa-28"));
        assert!(!out.contains(';'));
    }

    #[test]
    fn preserves_hyphenated_compounds() {
        assert_eq!(clean_text("a touch-and-go maneuver!"), "a touch-and-go maneuver");
        assert!(clean_text("nose-gear collapse").contains("nose-gear"));
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("   \n\t "), "");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(clean_text("a  b\n\nc\td"), "a b c d");
    }

    #[test]
    fn output_alphabet_is_restricted() {
        let out = clean_text("Mixed: CASE, punct!? and a Cessna-172 (tail N123AB).");
        assert!(out
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == ' ' || c == '-'));
    }

    #[test]
    fn clean_is_idempotent() {
        let samples = [
            "The Boeing-747 sustained substantial damage!",
            "fuel-starvation during a touch-and-go",
            "plain words only",
        ];
        for s in samples {
            let once = clean_text(s);
            assert_eq!(clean_text(&once), once);
        }
    }
}
