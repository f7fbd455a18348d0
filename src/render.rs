// src/render.rs
use crate::models::{CauseGroup, SimilarityPair};

/// Plain-text report of every pairwise comparison, one stanza per pair.
pub fn render_similarity_report(pairs: &[SimilarityPair]) -> String {
    let mut out = String::new();
    for p in pairs {
        out.push_str(&format!("Entry1: {}, Entry2: {}\n", p.entry1, p.entry2));
        out.push_str(&format!("Analysis Similarity: {}\n", p.analysis_similarity));
        out.push_str(&format!("Probable Cause Similarity: {}\n", p.cause_similarity));
        out.push('\n');
    }
    out
}

/// Plain-text digest of the cause groups, numbered from 1.
pub fn render_cause_groups(groups: &[CauseGroup]) -> String {
    let mut out = String::new();
    for (idx, group) in groups.iter().enumerate() {
        out.push_str(&format!("Group {} (Similar Causes of Accidents):\n", idx + 1));
        for member in &group.members {
            out.push_str(&format!("\nFile: {}\nCause:\n{}\n", member.file_name, member.cause_text));
        }
        out.push_str(&format!("\nSummary Keywords: {}\n", group.summary_keywords.join(", ")));
        out.push_str(&format!("\n{}\n\n", "=".repeat(90)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroupMember;

    #[test]
    fn similarity_report_has_one_stanza_per_pair() {
        let pairs = vec![
            SimilarityPair { entry1: 0, entry2: 1, analysis_similarity: 0.5, cause_similarity: 0.25 },
            SimilarityPair { entry1: 0, entry2: 2, analysis_similarity: 1.0, cause_similarity: 0.0 },
        ];
        let text = render_similarity_report(&pairs);
        assert!(text.contains("Entry1: 0, Entry2: 1"));
        assert!(text.contains("Analysis Similarity: 0.5"));
        assert!(text.contains("Probable Cause Similarity: 0.25"));
        assert_eq!(text.matches("Entry1:").count(), 2);
    }

    #[test]
    fn cause_groups_are_numbered_with_keywords() {
        let groups = vec![CauseGroup {
            group_id: "abc".into(),
            members: vec![GroupMember { file_name: "a.pdf".into(), cause_text: "engine failure".into() }],
            summary_keywords: vec!["engine".into(), "failure".into()],
        }];
        let text = render_cause_groups(&groups);
        assert!(text.contains("Group 1 (Similar Causes of Accidents):"));
        assert!(text.contains("File: a.pdf"));
        assert!(text.contains("Summary Keywords: engine, failure"));
    }

    #[test]
    fn empty_inputs_render_empty_reports() {
        assert!(render_similarity_report(&[]).is_empty());
        assert!(render_cause_groups(&[]).is_empty());
    }
}
