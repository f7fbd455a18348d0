use serde::{Deserialize, Serialize};

/// One incident report as loaded. Immutable after ingestion; every pipeline
/// stage reads it and none mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentRecord {
    pub file_name: String,
    /// "Analysis" narrative; empty when the source had none.
    pub analysis_text: String,
    /// "Probable Cause and Findings" narrative; empty when the source had none.
    pub cause_text: String,
    /// Aircraft designation lifted from the structured flight-information
    /// block, when the source carried one.
    pub aircraft_designation: Option<String>,
}

/// Per-record derived tags and keywords, the enrichment output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub file_name: String,
    pub aircraft: Vec<String>,
    pub damage_notes: Vec<String>,
    pub cause_notes: Vec<String>,
    pub keywords: Vec<String>,
}

/// Lexical similarity of one unordered record pair (indices into the loaded
/// record sequence, `entry1 < entry2`). Ratios are in [0.0, 1.0].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityPair {
    pub entry1: usize,
    pub entry2: usize,
    pub analysis_similarity: f64,
    pub cause_similarity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    pub file_name: String,
    pub cause_text: String,
}

/// A cluster of cause narratives. Every member scored at or above the
/// threshold against the group's first (seed) member; membership is not
/// transitive-closed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseGroup {
    pub group_id: String,
    pub members: Vec<GroupMember>,
    pub summary_keywords: Vec<String>,
}
