use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::consensus::{classify, ClassifierParams};
use crate::discordance::select_discordances;
use crate::models::{AnalysisReport, ConsensusItem, DiscordanceItem, SimilarityMatrix, Statistics};
use crate::sentences::{extract_sentences_with, flatten};
use crate::similarity::{mean_similarity, similarity_matrix};

/// Run the full consensus/discordance analysis over `documents`.
///
/// Never fails: too little text or an empty vocabulary degrades to a report
/// with no items and zeroed statistics.
pub fn analyze_documents<S: AsRef<str>>(documents: &[S], cfg: &AnalysisConfig) -> AnalysisReport {
    let start = Instant::now();
    let total_docs = documents.len();
    info!("Analysis started - documents={}", total_docs);

    let by_doc: Vec<Vec<String>> = documents
        .iter()
        .map(|d| extract_sentences_with(d.as_ref(), cfg.min_sentence_chars))
        .collect();
    let sentences = flatten(&by_doc);
    debug!(
        "Sentences extracted - total={}, per_doc={:?}",
        sentences.len(),
        by_doc.iter().map(Vec::len).collect::<Vec<_>>()
    );

    let params = ClassifierParams {
        threshold: cfg.similarity_threshold,
        max_items: cfg.max_consensus_items,
        max_features: cfg.sentence_max_features,
    };
    let Some(classification) = classify(&sentences, total_docs, &params) else {
        warn!(
            "Analysis degraded to empty report - documents={}, sentences={}",
            total_docs,
            sentences.len()
        );
        return AnalysisReport::empty(total_docs);
    };

    let discordances = select_discordances(
        &by_doc,
        &classification.claimed,
        cfg.opening_sentences,
        cfg.max_discordance_items,
    );

    let doc_matrix = similarity_matrix(documents, cfg.document_max_features);
    let report = build_report(total_docs, classification.consensus, discordances, doc_matrix);

    info!(
        "Analysis completed - duration={:.3}s, consensus={}, discordances={}, consensus_rate={:.3}, avg_similarity={:.3}",
        start.elapsed().as_secs_f32(),
        report.consensus.len(),
        report.discordances.len(),
        report.statistics.consensus_rate,
        report.statistics.avg_similarity
    );
    report
}

/// Assemble statistics from already-capped item lists.
pub fn build_report(
    total_docs: usize,
    consensus: Vec<ConsensusItem>,
    discordances: Vec<DiscordanceItem>,
    similarity_matrix: Option<SimilarityMatrix>,
) -> AnalysisReport {
    let c = consensus.len();
    let consensus_rate = c as f64 / (c + discordances.len()).max(1) as f64;
    let avg_similarity = similarity_matrix.as_ref().map(mean_similarity).unwrap_or(0.0);

    AnalysisReport {
        consensus,
        discordances,
        statistics: Statistics {
            total_docs,
            consensus_rate,
            avg_similarity,
        },
        similarity_matrix,
    }
}
