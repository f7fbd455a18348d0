//! Derives structure from free-text aviation-incident narratives: normalized
//! keywords, rule-tagged entities, failure-mode themes, and two independent
//! similarity views (all-pairs lexical ratios and tf-idf cosine groups).
//!
//! The whole corpus is materialized in memory; every stage is a batch pass
//! over immutable records.

/// Greedy cosine grouping of cause narratives.
pub mod cluster;
/// Record loading and stage-eligibility filters.
pub mod ingest;
/// Domain model shared by every stage.
pub mod models;
/// Narrative cleaning with protected-token masking.
pub mod normalize;
/// Stage orchestration and output persistence.
pub mod pipeline;
/// Wire format of the upstream report JSON.
pub mod raw_types;
/// Plain-text report renderers.
pub mod render;
/// All-pairs lexical similarity reporting.
pub mod similarity;
/// Corpus-adaptive stopword construction.
pub mod stopwords;
/// Entity and keyword tagging, plus the external NER seam.
pub mod tagger;
/// Tf-idf vectorization of cause texts.
pub mod tfidf;
/// Failure-mode theme classification.
pub mod themes;

pub use cluster::{group_similar_causes, summarize_keywords, DEFAULT_THRESHOLD};
pub use ingest::load_records;
pub use models::{CauseGroup, EnrichedRecord, GroupMember, IncidentRecord, SimilarityPair};
pub use normalize::clean_text;
pub use pipeline::{persist_outputs, run_pipeline, PipelineOutput, PipelineParams};
pub use similarity::{lexical_ratio, pairwise_report};
pub use stopwords::{build_stopword_set, filter_keywords};
pub use tagger::{tag_text, EntityLabel, EntityTags, NamedEntityModel, NamedSpan};
pub use themes::{is_probable_aircraft, themes_by_aircraft};
