use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};
use xxhash_rust::xxh3::xxh3_64;

use crate::config::AnalysisConfig;
use crate::models::{AnalysisReport, Document};
use crate::render::render_report_markdown;
use crate::report::analyze_documents;
use crate::viz_export::write_all_viz;

/// Stable digest of the input bodies (in order) and the tuning they were analyzed with.
pub fn run_id(documents: &[Document], cfg: &AnalysisConfig) -> Result<String> {
    let mut seed = serde_json::to_string(cfg).context("serializing analysis config")?;
    seed.push('\u{1e}');
    for d in documents {
        seed.push_str(&d.body);
        seed.push('\u{1e}'); // record separator keeps ["ab","c"] != ["a","bc"]
    }
    Ok(format!("{:016x}", xxh3_64(seed.as_bytes())))
}

pub struct RunOutcome {
    pub run_dir: PathBuf,
    pub report: AnalysisReport,
    pub markdown: String,
}

/// Analyze `documents` and persist report + viz bundle under `<output_dir>/<run_id>/`.
pub fn run_analysis(documents: &[Document], cfg: &AnalysisConfig, output_dir: &Path) -> Result<RunOutcome> {
    let pipeline_start = std::time::Instant::now();

    if documents.is_empty() {
        error!("No documents supplied - nothing to analyze");
        bail!("No documents supplied; pass one or more text files or use --example.");
    }
    info!("Pipeline started - documents={}, output_dir={}", documents.len(), output_dir.display());
    for (i, d) in documents.iter().enumerate() {
        debug!("Document {} - label={}, chars={}", i + 1, d.label, d.body.chars().count());
    }

    // 1) analysis (infallible)
    let report = analyze_documents(documents, cfg);
    let markdown = render_report_markdown(&report);

    // 2) persist to run-scoped directory
    let persist_start = std::time::Instant::now();
    let id = run_id(documents, cfg)?;
    let run_dir = output_dir.join(&id);
    std::fs::create_dir_all(&run_dir).with_context(|| format!("create {}", run_dir.display()))?;
    debug!("Output directory: {}", run_dir.display());

    std::fs::write(run_dir.join("report.json"), serde_json::to_vec_pretty(&report)?)
        .with_context(|| format!("write report.json in {}", run_dir.display()))?;
    debug!("Wrote report.json");

    std::fs::write(run_dir.join("report.md"), markdown.as_bytes())
        .with_context(|| format!("write report.md in {}", run_dir.display()))?;
    debug!("Wrote report.md");

    write_all_viz(&run_dir, &id, &report)?;
    debug!("Wrote viz bundle");

    info!(
        "Output persisted - duration={:.2}s, directory={}",
        persist_start.elapsed().as_secs_f32(),
        run_dir.display()
    );
    info!(
        "Pipeline completed successfully - total_duration={:.2}s, consensus={}, discordances={}",
        pipeline_start.elapsed().as_secs_f32(),
        report.consensus.len(),
        report.discordances.len()
    );

    Ok(RunOutcome {
        run_dir,
        report,
        markdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::example_documents;

    #[test]
    fn run_id_is_stable_and_order_sensitive() {
        let docs = example_documents();
        let cfg = AnalysisConfig::default();
        assert_eq!(run_id(&docs, &cfg).unwrap(), run_id(&docs, &cfg).unwrap());
        let mut rev = docs.clone();
        rev.reverse();
        assert_ne!(run_id(&docs, &cfg).unwrap(), run_id(&rev, &cfg).unwrap());
        assert_eq!(run_id(&docs, &cfg).unwrap().len(), 16);
    }

    #[test]
    fn different_tuning_gets_its_own_run_dir() {
        let dir = tempfile::tempdir().unwrap();
        let docs = example_documents();
        let strict = AnalysisConfig {
            similarity_threshold: 0.9,
            ..AnalysisConfig::default()
        };
        let a = run_analysis(&docs, &AnalysisConfig::default(), dir.path()).unwrap();
        let b = run_analysis(&docs, &strict, dir.path()).unwrap();
        assert_ne!(a.run_dir, b.run_dir);
        assert!(a.run_dir.join("report.json").exists());
        assert!(b.run_dir.join("report.json").exists());
    }

    #[test]
    fn empty_input_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run_analysis(&[], &AnalysisConfig::default(), dir.path()).is_err());
    }

    #[test]
    fn persists_report_and_viz() {
        let dir = tempfile::tempdir().unwrap();
        let docs = example_documents();
        let out = run_analysis(&docs, &AnalysisConfig::default(), dir.path()).unwrap();
        assert!(out.run_dir.starts_with(dir.path()));
        for f in ["report.json", "report.md", "viz.heatmap.json", "viz.support.json", "viz.index.json"] {
            assert!(out.run_dir.join(f).exists(), "{f} missing");
        }
        let back: AnalysisReport =
            serde_json::from_slice(&std::fs::read(out.run_dir.join("report.json")).unwrap()).unwrap();
        assert_eq!(back.statistics.total_docs, 4);
        assert_eq!(back.consensus.len(), out.report.consensus.len());
    }
}
