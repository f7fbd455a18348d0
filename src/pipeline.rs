//! End-to-end pipeline: enrichment, theme aggregation, lexical similarity,
//! cause clustering, and persistence of every output artifact.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;
use serde_json::json;
use tracing::{debug, info};

use crate::cluster::{self, group_similar_causes};
use crate::ingest::{has_usable_analysis, has_usable_cause, usable_counts};
use crate::models::{CauseGroup, EnrichedRecord, IncidentRecord, SimilarityPair};
use crate::normalize::clean_text;
use crate::render::{render_cause_groups, render_similarity_report};
use crate::similarity::pairwise_report;
use crate::stopwords::{build_stopword_set, filter_keywords};
use crate::tagger::{tag_text, NamedEntityModel};
use crate::themes::themes_by_aircraft;

#[derive(Debug, Clone, Copy)]
pub struct PipelineParams {
    /// Minimum global token count for the adaptive stopword filter.
    pub low_threshold: usize,
    /// Document-count ratio above which a token is boilerplate.
    pub high_ratio: f64,
    /// Cosine threshold for cause grouping.
    pub similarity_threshold: f64,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            low_threshold: crate::stopwords::DEFAULT_LOW_THRESHOLD,
            high_ratio: crate::stopwords::DEFAULT_HIGH_RATIO,
            similarity_threshold: cluster::DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub enriched: Vec<EnrichedRecord>,
    pub themes: BTreeMap<String, BTreeSet<String>>,
    pub similarity_pairs: Vec<SimilarityPair>,
    pub cause_groups: Vec<CauseGroup>,
}

/// Run every stage over a loaded corpus. The named-entity model is optional;
/// without one the general entity buckets stay empty and the rule tagging
/// carries the enrichment.
pub fn run_pipeline(
    records: &[IncidentRecord],
    params: &PipelineParams,
    ner: Option<&dyn NamedEntityModel>,
) -> Result<PipelineOutput> {
    let pipeline_start = std::time::Instant::now();
    info!("Pipeline started - records={}", records.len());
    usable_counts(records);

    // 1) enrichment: corpus-wide stopword statistics, then per-record
    // keywords and tags. Records without an analysis narrative sit this out.
    let enrich_start = std::time::Instant::now();
    let eligible: Vec<&IncidentRecord> =
        records.iter().filter(|r| has_usable_analysis(r)).collect();
    let cleaned: Vec<String> = eligible.iter().map(|r| clean_text(&r.analysis_text)).collect();
    let stopwords = build_stopword_set(&cleaned, params.low_threshold, params.high_ratio);

    let enriched: Vec<EnrichedRecord> = eligible
        .iter()
        .zip(cleaned.iter())
        .map(|(record, cleaned)| {
            let tags = tag_text(&record.analysis_text, ner);
            let aircraft: Vec<String> = tags
                .aircraft
                .into_iter()
                .chain(record.aircraft_designation.iter().cloned())
                .unique()
                .collect();
            EnrichedRecord {
                file_name: record.file_name.clone(),
                aircraft,
                damage_notes: tags.damage,
                cause_notes: tags.cause,
                keywords: filter_keywords(cleaned, &stopwords),
            }
        })
        .collect();
    info!(
        "Enrichment completed - duration={:.2}s, records={}",
        enrich_start.elapsed().as_secs_f32(),
        enriched.len()
    );

    // 2) theme-to-aircraft aggregation over the enriched records
    let themes = themes_by_aircraft(&enriched);
    info!("Theme aggregation - themes={}", themes.len());

    // 3) all-pairs lexical similarity over every loaded record
    let similarity_pairs = pairwise_report(records);

    // 4) cause clustering over records with usable cause text
    let clusterable: Vec<IncidentRecord> = records
        .iter()
        .filter(|r| has_usable_cause(r))
        .cloned()
        .collect();
    let cause_groups = group_similar_causes(&clusterable, params.similarity_threshold)?;

    info!(
        "Pipeline completed - total_duration={:.2}s, enriched={}, themes={}, pairs={}, groups={}",
        pipeline_start.elapsed().as_secs_f32(),
        enriched.len(),
        themes.len(),
        similarity_pairs.len(),
        cause_groups.len()
    );
    Ok(PipelineOutput {
        enriched,
        themes,
        similarity_pairs,
        cause_groups,
    })
}

/// Write every output artifact under `out_dir`.
pub fn persist_outputs(out_dir: &Path, output: &PipelineOutput) -> Result<()> {
    let start = std::time::Instant::now();
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Creating output directory {}", out_dir.display()))?;

    std::fs::write(
        out_dir.join("enriched.json"),
        serde_json::to_vec_pretty(&output.enriched)?,
    )?;
    debug!("Wrote enriched.json");

    std::fs::write(
        out_dir.join("themes.json"),
        serde_json::to_vec_pretty(&output.themes)?,
    )?;
    debug!("Wrote themes.json");

    std::fs::write(
        out_dir.join("similarities.txt"),
        render_similarity_report(&output.similarity_pairs),
    )?;
    debug!("Wrote similarities.txt");

    std::fs::write(
        out_dir.join("cause_groups.txt"),
        render_cause_groups(&output.cause_groups),
    )?;
    debug!("Wrote cause_groups.txt");

    let summary = json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "enriched_records": output.enriched.len(),
        "themes": output.themes.len(),
        "similarity_pairs": output.similarity_pairs.len(),
        "cause_groups": output.cause_groups.len(),
    });
    std::fs::write(
        out_dir.join("run_summary.json"),
        serde_json::to_vec_pretty(&summary)?,
    )?;
    debug!("Wrote run_summary.json");

    info!(
        "Output persisted - duration={:.2}s, directory={}",
        start.elapsed().as_secs_f32(),
        out_dir.display()
    );
    Ok(())
}
