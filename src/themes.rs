//! Theme classification and theme-to-aircraft aggregation.
//!
//! Themes are an ordered data table of (name, regex) pairs; adding a theme is
//! a table edit, not a new code path. A record can match any number of themes.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::EnrichedRecord;

/// Failure-mode themes matched against each record's aggregated tag text.
/// Patterns assume a lowercased haystack.
pub static THEMES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("Stall / Stall_spin", r"stall|critical angle|spin|loss of lift|loss of airspeed"),
        ("Fuel starvation", r"fuel starvation|fuel selector|water in fuel|tank ran dry"),
        ("Landing_gear failure", r"landing gear (collapsed|fractured|separated)|ground loop"),
        ("Tail_strike", r"tailstrike|pitch .*degrees|toga thrust"),
        ("Wire / tree strike", r"wire strike|power line|struck (trees|power lines)"),
        ("Spatial disorientation", r"spatial disorientation|entered.*cloud|steep descent"),
        ("Engine_component failure", r"oil starvation|exhaust valve|idle valve|drive gear"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).expect("theme pattern")))
    .collect()
});

static MANUFACTURERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "airbus", "boeing", "cessna", "piper", "beech", "beechcraft", "mooney", "cirrus",
        "lancair", "ryan", "douglas", "mcdonnell", "north", "extra", "air", "airtractor",
        "aeronca", "grumman", "yak", "zenith", "glasair", "vans", "poberezny", "moth",
        "wheeler", "navion", "kitfox", "titan", "weatherly",
    ]
    .into_iter()
    .collect()
});

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").expect("year pattern"));
static TAIL_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^N\d+[A-Z]*$").expect("tail number pattern"));
static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("digit pattern"));

/// Whether a mention token plausibly names an aircraft model. Pure 4-digit
/// tokens (years) and tail numbers are registration noise, not models.
pub fn is_probable_aircraft(token: &str) -> bool {
    let token = token.trim();
    if token.is_empty() {
        return false;
    }
    if YEAR_RE.is_match(token) || TAIL_NUMBER_RE.is_match(token) {
        return false;
    }
    let first_word = match token.split_whitespace().next() {
        Some(w) => w.to_lowercase(),
        None => return false,
    };
    DIGIT_RE.is_match(token) || MANUFACTURERS.contains(first_word.as_str())
}

/// Split an aircraft mention on `;`, `/`, `,` and keep the plausible tokens.
fn plausible_tokens(mention: &str) -> impl Iterator<Item = String> + '_ {
    mention
        .split([';', '/', ','])
        .map(str::trim)
        .filter(|t| is_probable_aircraft(t))
        .map(str::to_string)
}

/// Aggregate aircraft mentions per theme over the enriched corpus. Sets come
/// back deduplicated and sorted (BTree order) for deterministic output.
pub fn themes_by_aircraft(records: &[EnrichedRecord]) -> BTreeMap<String, BTreeSet<String>> {
    let mut by_theme: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for record in records {
        let blob = record
            .damage_notes
            .iter()
            .chain(record.cause_notes.iter())
            .chain(record.keywords.iter())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        let aircraft_clean: BTreeSet<String> = record
            .aircraft
            .iter()
            .flat_map(|mention| plausible_tokens(mention))
            .collect();

        for (theme, pattern) in THEMES.iter() {
            if pattern.is_match(&blob) {
                by_theme
                    .entry(theme.to_string())
                    .or_default()
                    .extend(aircraft_clean.iter().cloned());
            }
        }
    }

    debug!(
        "Theme aggregation completed - themes_matched={}, records={}",
        by_theme.len(),
        records.len()
    );
    by_theme
}
