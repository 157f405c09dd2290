// src/viz_export.rs
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::{fs, path::Path};

use crate::models::AnalysisReport;

const TOP_N: usize = 5;
const LABEL_CHARS: usize = 50;

/* -------------------------------------------------------------------------- */
/* Entry point                                                                */
/* -------------------------------------------------------------------------- */

/// Public entry point: write all D3-ready visualization JSONs into `out/<run_id>/`.
pub fn write_all_viz(out_dir_for_run: &Path, run_id: &str, report: &AnalysisReport) -> Result<()> {
    fs::create_dir_all(out_dir_for_run).with_context(|| format!("create {:?}", out_dir_for_run))?;

    // 1) Heatmap (document-level similarity, absent matrix => empty grid)
    let heatmap = build_heatmap(report);
    write_json(out_dir_for_run.join("viz.heatmap.json"), &heatmap)?;

    // 2) Support bars (top consensus vs top discordance)
    let support = build_support(report);
    write_json(out_dir_for_run.join("viz.support.json"), &support)?;

    // 3) Per-run index
    let idx = json!({
        "run_id": run_id,
        "version": 1,
        "generated_at": Utc::now().to_rfc3339(),
        "counts": {
            "documents": report.statistics.total_docs,
            "consensus": report.consensus.len(),
            "discordances": report.discordances.len(),
        },
        "files": [
            "viz.heatmap.json",
            "viz.support.json"
        ]
    });
    write_json(out_dir_for_run.join("viz.index.json"), &idx)
        .with_context(|| format!("write index for run {run_id}"))?;

    Ok(())
}

fn write_json<P: AsRef<Path>, T: ?Sized + Serialize>(path: P, value: &T) -> Result<()> {
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .map(|_| ())
        .map_err(|e| e.into())
}

/* -------------------------------------------------------------------------- */
/* 1) Heatmap                                                                 */
/* -------------------------------------------------------------------------- */

#[derive(Serialize)]
struct VHeatmap {
    labels: Vec<String>,
    matrix: Vec<Vec<f64>>, // rounded to 2 decimals for display
    available: bool,
}

fn build_heatmap(report: &AnalysisReport) -> VHeatmap {
    match &report.similarity_matrix {
        Some(m) => VHeatmap {
            labels: (1..=m.len()).map(|i| format!("Doc {i}")).collect(),
            matrix: m
                .iter()
                .map(|row| row.iter().map(|v| round2(*v)).collect())
                .collect(),
            available: true,
        },
        None => VHeatmap {
            labels: Vec::new(),
            matrix: Vec::new(),
            available: false,
        },
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/* -------------------------------------------------------------------------- */
/* 2) Support bars                                                            */
/* -------------------------------------------------------------------------- */

#[derive(Serialize)]
struct VSupportBar {
    phrase: String,
    support: usize,
    kind: &'static str, // "consensus" | "discordance"
}

#[derive(Serialize)]
struct VSupport {
    bars: Vec<VSupportBar>,
}

fn build_support(report: &AnalysisReport) -> VSupport {
    let consensus = report.consensus.iter().take(TOP_N).map(|c| VSupportBar {
        phrase: short_label(&c.phrase),
        support: c.support_docs,
        kind: "consensus",
    });
    // a discordant sentence is, by definition, backed by its own document only
    let discord = report.discordances.iter().take(TOP_N).map(|d| VSupportBar {
        phrase: short_label(&d.phrase),
        support: 1,
        kind: "discordance",
    });
    VSupport {
        bars: consensus.chain(discord).collect(),
    }
}

fn short_label(phrase: &str) -> String {
    let mut s: String = phrase.chars().take(LABEL_CHARS).collect();
    s.push_str("...");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConsensusItem, DiscordanceItem};

    fn report() -> AnalysisReport {
        let mut r = AnalysisReport::empty(2);
        r.similarity_matrix = Some(vec![vec![1.0, 0.12345], vec![0.12345, 1.0]]);
        r.consensus = vec![ConsensusItem {
            phrase: "y".repeat(70),
            support_docs: 2,
            avg_similarity: 0.7,
            source_doc: 1,
        }];
        r.discordances = vec![DiscordanceItem {
            phrase: "short".into(),
            source_doc: 0,
            uniqueness: 1.0,
        }];
        r
    }

    #[test]
    fn heatmap_rounds_and_labels() {
        let h = build_heatmap(&report());
        assert_eq!(h.labels, vec!["Doc 1", "Doc 2"]);
        assert_eq!(h.matrix[0][1], 0.12);
        assert!(h.available);
        assert!(!build_heatmap(&AnalysisReport::empty(1)).available);
    }

    #[test]
    fn support_bars_clip_phrases() {
        let s = build_support(&report());
        assert_eq!(s.bars.len(), 2);
        assert_eq!(s.bars[0].phrase, format!("{}...", "y".repeat(50)));
        assert_eq!(s.bars[1].support, 1);
        assert_eq!(s.bars[1].kind, "discordance");
    }

    #[test]
    fn writes_bundle_files() {
        let dir = tempfile::tempdir().unwrap();
        write_all_viz(dir.path(), "abc", &report()).unwrap();
        for f in ["viz.heatmap.json", "viz.support.json", "viz.index.json"] {
            assert!(dir.path().join(f).exists(), "{f} missing");
        }
        let idx: serde_json::Value =
            serde_json::from_slice(&fs::read(dir.path().join("viz.index.json")).unwrap()).unwrap();
        assert_eq!(idx["run_id"], "abc");
        assert_eq!(idx["counts"]["consensus"], 1);
    }
}
