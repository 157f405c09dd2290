use serde::{Deserialize, Serialize};

/// A loaded document body; its position in the input collection is its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub label: String, // file name or example tag, display only
    pub body: String,
}

impl AsRef<str> for Document {
    fn as_ref(&self) -> &str {
        &self.body
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub doc: usize, // owning document ordinal
}

/// Square, symmetric, unit diagonal; rows follow the order of the compared units.
pub type SimilarityMatrix = Vec<Vec<f64>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusItem {
    pub phrase: String,
    pub support_docs: usize, // supporting docs + the source doc
    pub avg_similarity: f64,
    pub source_doc: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscordanceItem {
    pub phrase: String,
    pub source_doc: usize,
    pub uniqueness: f64, // always 1.0, not a calibrated score
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Statistics {
    pub total_docs: usize,
    pub consensus_rate: f64,  // [0.0, 1.0]
    pub avg_similarity: f64,  // [0.0, 1.0]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnalysisReport {
    pub consensus: Vec<ConsensusItem>,
    pub discordances: Vec<DiscordanceItem>,
    pub statistics: Statistics,
    pub similarity_matrix: Option<SimilarityMatrix>,
}

impl AnalysisReport {
    /// Report for inputs that could not be analyzed at all: no items, zeroed statistics.
    pub fn empty(total_docs: usize) -> Self {
        Self {
            statistics: Statistics {
                total_docs,
                ..Statistics::default()
            },
            ..Self::default()
        }
    }

    pub fn has_findings(&self) -> bool {
        !self.consensus.is_empty() || !self.discordances.is_empty()
    }
}
