// src/render.rs
use itertools::Itertools;

use crate::models::{AnalysisReport, SimilarityMatrix};

const TOP_N: usize = 5;
const PHRASE_CHARS: usize = 80;

fn clip(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

fn pct(x: f64) -> String {
    format!("{:.1}%", x * 100.0)
}

pub fn render_similarity_table(m: &SimilarityMatrix) -> String {
    let mut out = String::new();
    out.push_str(&format!("| |{}\n", (1..=m.len()).map(|i| format!(" Doc {i} |")).join("")));
    out.push_str(&format!("|---|{}\n", "---|".repeat(m.len())));
    for (i, row) in m.iter().enumerate() {
        out.push_str(&format!(
            "| Doc {} |{}\n",
            i + 1,
            row.iter().map(|v| format!(" {:.2} |", v)).join("")
        ));
    }
    out
}

pub fn render_report_markdown(r: &AnalysisReport) -> String {
    let mut md = String::new();
    md.push_str("# Consensus / Discordance Report\n\n");

    md.push_str("## Global Statistics\n");
    md.push_str(&format!("- Documents analyzed: {}\n", r.statistics.total_docs));
    md.push_str(&format!("- Consensus rate: {}\n", pct(r.statistics.consensus_rate)));
    md.push_str(&format!("- Average similarity: {}\n\n", pct(r.statistics.avg_similarity)));

    md.push_str("## Points of Consensus\n");
    if r.consensus.is_empty() {
        md.push_str("No significant consensus detected.\n");
    } else {
        for (idx, c) in r.consensus.iter().take(TOP_N).enumerate() {
            md.push_str(&format!(
                "{}. {} (Support: {} docs, similarity {})\n",
                idx + 1,
                clip(&c.phrase, PHRASE_CHARS),
                c.support_docs,
                pct(c.avg_similarity)
            ));
        }
    }
    md.push('\n');

    md.push_str("## Points of Discordance\n");
    if r.discordances.is_empty() {
        md.push_str("No major discordance detected.\n");
    } else {
        for (idx, d) in r.discordances.iter().take(TOP_N).enumerate() {
            md.push_str(&format!(
                "{}. {} (Doc {})\n",
                idx + 1,
                clip(&d.phrase, PHRASE_CHARS),
                d.source_doc + 1
            ));
        }
    }

    if let Some(m) = &r.similarity_matrix {
        md.push_str("\n## Document Similarity\n");
        md.push_str(&render_similarity_table(m));
    }

    md
}
