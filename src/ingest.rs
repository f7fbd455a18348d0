//! Loading and stage filtering of incident reports.
//!
//! Reports arrive as one JSON array produced by the upstream extraction step.
//! Missing narratives are represented as empty strings on the domain record;
//! each pipeline stage decides for itself which records it can use.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::models::IncidentRecord;
use crate::raw_types::RawReport;

/// Sentinel the extraction step writes when a section was absent in the PDF.
const NOT_FOUND: &str = "Not found";

/// Load all reports from a JSON file, mapping them into domain records.
pub fn load_records(path: &Path) -> Result<Vec<IncidentRecord>> {
    let start = std::time::Instant::now();
    let bytes = std::fs::read(path)
        .with_context(|| format!("Reading report file {}", path.display()))?;
    let raw: Vec<RawReport> = serde_json::from_slice(&bytes)
        .with_context(|| format!("Decoding JSON from {}", path.display()))?;

    let total = raw.len();
    let mut unnamed = 0usize;
    let records: Vec<IncidentRecord> = raw
        .into_iter()
        .enumerate()
        .map(|(idx, r)| {
            let file_name = match r.file_name {
                Some(name) if !name.trim().is_empty() => name.trim().to_string(),
                _ => {
                    unnamed += 1;
                    format!("unknown-{idx}")
                }
            };
            IncidentRecord {
                file_name,
                analysis_text: narrative_or_empty(r.analysis),
                cause_text: narrative_or_empty(r.probable_cause),
                aircraft_designation: r
                    .flight_info
                    .and_then(|fi| fi.aircraft)
                    .map(|a| a.trim().to_string())
                    .filter(|a| !a.is_empty()),
            }
        })
        .collect();

    if unnamed > 0 {
        warn!("Reports without a file name - count={}, assigned placeholder names", unnamed);
    }
    info!(
        "Report load completed - duration={:.2}s, records={}",
        start.elapsed().as_secs_f32(),
        total
    );
    Ok(records)
}

fn narrative_or_empty(field: Option<String>) -> String {
    match field {
        Some(text) if text.trim() != NOT_FOUND => text.trim().to_string(),
        _ => String::new(),
    }
}

/// Whether a record carries an analysis narrative the enrichment stage can use.
pub fn has_usable_analysis(record: &IncidentRecord) -> bool {
    !record.analysis_text.is_empty()
}

/// Whether a record carries a cause narrative the clustering stage can use.
/// The sentinel check is case-insensitive here because the cause consumers
/// historically compared lowercased text.
pub fn has_usable_cause(record: &IncidentRecord) -> bool {
    let cause = record.cause_text.trim();
    !cause.is_empty() && !cause.eq_ignore_ascii_case(NOT_FOUND)
}

/// Partition helper used by stage logging: how many records each stage will see.
pub fn usable_counts(records: &[IncidentRecord]) -> (usize, usize) {
    let analyses = records.iter().filter(|r| has_usable_analysis(r)).count();
    let causes = records.iter().filter(|r| has_usable_cause(r)).count();
    debug!(
        "Stage eligibility - records={}, with_analysis={}, with_cause={}",
        records.len(),
        analyses,
        causes
    );
    (analyses, causes)
}
