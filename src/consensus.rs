use std::collections::{BTreeSet, HashSet};
use tracing::{debug, info};

use crate::models::{ConsensusItem, Sentence, SimilarityMatrix};
use crate::similarity::similarity_matrix;

pub struct ClassifierParams {
    pub threshold: f64,       // e.g., 0.30, strictly exceeded
    pub max_items: usize,     // keep the top N by avg similarity
    pub max_features: usize,  // sentence-level vocabulary cap
}

/// Consensus items plus the sentence texts they claimed.
///
/// `claimed` is per-call state; the discordance selector reads it and nothing
/// else retains it.
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub consensus: Vec<ConsensusItem>,
    pub claimed: HashSet<String>,
}

/// Minimum number of other documents that must echo a sentence.
pub fn majority_support(total_docs: usize) -> usize {
    (total_docs / 2).max(1)
}

/// Vectorize `sentences` and classify them.
///
/// `None` when there are fewer than two sentences or the sentence vocabulary
/// collapses; the caller falls back to an empty report.
pub fn classify(
    sentences: &[Sentence],
    total_docs: usize,
    params: &ClassifierParams,
) -> Option<Classification> {
    if sentences.len() < 2 {
        debug!("Classification skipped - sentences={}", sentences.len());
        return None;
    }
    let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
    let matrix = similarity_matrix(&texts, params.max_features)?;
    Some(classify_with_matrix(sentences, &matrix, total_docs, params))
}

/// Scan sentences in order against a precomputed sentence similarity matrix.
pub fn classify_with_matrix(
    sentences: &[Sentence],
    matrix: &SimilarityMatrix,
    total_docs: usize,
    params: &ClassifierParams,
) -> Classification {
    let needed = majority_support(total_docs);
    debug!(
        "Classification started - sentences={}, docs={}, threshold={}, needed_support={}",
        sentences.len(), total_docs, params.threshold, needed
    );

    let mut claimed: HashSet<String> = HashSet::new();
    let mut consensus = Vec::new();
    let total = sentences.len();

    for (i, s) in sentences.iter().enumerate() {
        if i % 200 == 0 && i > 0 {
            let pct = (i as f32 / total as f32 * 100.0) as u32;
            info!("Classification progress - processed={}/{} ({}%), consensus={}", i, total, pct, consensus.len());
        }
        // literal-text collapse: an identical sentence elsewhere was already judged
        if claimed.contains(&s.text) {
            continue;
        }

        let mut similar_docs = BTreeSet::new();
        let mut scores = Vec::new();
        for (j, other) in sentences.iter().enumerate() {
            if i == j || other.doc == s.doc {
                continue;
            }
            let score = matrix[i][j];
            if score > params.threshold {
                similar_docs.insert(other.doc);
                scores.push(score);
            }
        }

        if similar_docs.len() >= needed {
            let avg = if scores.is_empty() {
                0.0
            } else {
                scores.iter().sum::<f64>() / scores.len() as f64
            };
            consensus.push(ConsensusItem {
                phrase: s.text.clone(),
                support_docs: similar_docs.len() + 1,
                avg_similarity: avg,
                source_doc: s.doc,
            });
            claimed.insert(s.text.clone());
        }
    }

    let found = consensus.len();
    // stable: equal averages keep encounter order
    consensus.sort_by(|a, b| b.avg_similarity.total_cmp(&a.avg_similarity));
    consensus.truncate(params.max_items);
    debug!("Classification finished - candidates={}, kept={}, claimed={}", found, consensus.len(), claimed.len());

    Classification { consensus, claimed }
}
